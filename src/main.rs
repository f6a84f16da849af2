use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use medcert_rs::certificate::render_text;
use medcert_rs::config::AppConfig;
use medcert_rs::error::WizardError;
use medcert_rs::forms::{FieldDefinition, FieldKind, FormLoader};
use medcert_rs::print::{print_current, FileSurface, MemorySurface, PrintOutcome, PrintSurface};
use medcert_rs::wizard::{EventKind, ProgressStatus, Step, View, WizardController, WizardEvent};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the examination wizard interactively
    Run {
        /// Directory printed certificates are written to
        #[arg(short, long)]
        print_dir: Option<PathBuf>,

        /// Keep printed certificates in memory instead of writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// List the form fields
    Fields {
        /// Only this form (tier1, consent or tier2)
        #[arg(short, long)]
        form: Option<String>,
    },
    /// Dump the initial wizard state as JSON
    ShowState,
}

/// Whether the interactive loop keeps going
enum Flow {
    Continue,
    Quit,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Run { print_dir, dry_run } => {
            let config = AppConfig::from_env()?;
            let mut surface: Box<dyn PrintSurface> = if dry_run {
                log::info!("Dry run: printed certificates are kept in memory");
                Box::new(MemorySurface::new())
            } else {
                let print_dir = print_dir.unwrap_or(config.print_dir.clone());
                log::info!("Printing certificates to {}", print_dir.display());
                Box::new(FileSurface::new(print_dir))
            };

            let mut controller =
                WizardController::builtin()?.with_letterhead(config.letterhead());
            let stdin = io::stdin();
            let mut input = stdin.lock();

            loop {
                print_progress(&controller);
                let flow = match controller.current_step() {
                    Step::Tier1Exam => fill_form(&mut controller, &mut input, WizardEvent::SubmitTier1)?,
                    Step::Tier2Exam => fill_form(&mut controller, &mut input, WizardEvent::SubmitTier2)?,
                    Step::Consent => give_consent(&mut controller, &mut input)?,
                    Step::Tier1Certificate | Step::FinalCertificate => {
                        certificate_menu(&mut controller, surface.as_mut(), &mut input)?
                    }
                };
                if let Flow::Quit = flow {
                    break;
                }
            }
        }
        Commands::Fields { form } => {
            let catalog = FormLoader::builtin()?;
            let forms: Vec<_> = match &form {
                Some(id) => vec![catalog
                    .form(id)
                    .with_context(|| format!("No form named '{}'", id))?],
                None => catalog.forms.iter().collect(),
            };
            for form in forms {
                println!("{} ({})", form.title, form.id);
                for field in form.fields() {
                    println!("{}", field_row(field));
                }
            }
        }
        Commands::ShowState => {
            let controller = WizardController::builtin()?;
            let state = serde_json::json!({
                "step": controller.current_step(),
                "progress": controller.progress(),
                "available_events": controller.available_events(),
                "record": controller.record(),
            });
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}

/// One line of the `fields` listing
fn field_row(field: &FieldDefinition) -> String {
    format!(
        "  {:<40} {:<9} {:<9} {}",
        field.path,
        field.kind.as_str(),
        if field.required { "required" } else { "" },
        field.label
    )
}

fn print_progress(controller: &WizardController) {
    let line: Vec<String> = controller
        .progress()
        .iter()
        .map(|entry| match entry.status {
            ProgressStatus::Done => format!("[x] {}", entry.label),
            ProgressStatus::Current => format!("[>] {}", entry.label),
            ProgressStatus::Upcoming => format!("[ ] {}", entry.label),
        })
        .collect();
    println!("\n{}\n", line.join("  "));
}

/// Read one line; `None` at end of input
fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

fn ask_field(
    controller: &mut WizardController,
    input: &mut impl BufRead,
    field: &FieldDefinition,
) -> anyhow::Result<Flow> {
    let current = controller.field(&field.path).map(|v| v.to_string());
    let mut text = field.label.clone();
    if field.kind == FieldKind::Choice {
        let options: Vec<String> = field
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}) {}", i + 1, o.label))
            .collect();
        text.push_str(&format!(" [{}]", options.join(", ")));
    }
    if field.required {
        text.push_str(" *");
    }
    if let Some(current) = &current {
        text.push_str(&format!(" ({})", current));
    }
    text.push_str(": ");

    loop {
        let Some(raw) = prompt(input, &text)? else {
            return Ok(Flow::Quit);
        };
        if raw.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        match field.accept(&raw) {
            Ok(value) => match controller.set_field(&field.path, value) {
                Ok(()) => return Ok(Flow::Continue),
                Err(e) => println!("  {}", e),
            },
            Err(e) => println!("  {}", e),
        }
    }
}

fn fill_form(
    controller: &mut WizardController,
    input: &mut impl BufRead,
    submit: WizardEvent,
) -> anyhow::Result<Flow> {
    let form = match controller.view()? {
        View::Tier1Exam(view) | View::Tier2Exam(view) => view.form.clone(),
        other => anyhow::bail!("{} is not a form step", other.step()),
    };

    println!("{}", form.title);
    for section in &form.sections {
        println!("\n-- {} --", section.title);
        for field in &section.fields {
            if !field.is_visible(controller.record()) {
                continue;
            }
            if let Flow::Quit = ask_field(controller, input, field)? {
                return Ok(Flow::Quit);
            }
        }
    }

    match controller.submit(submit) {
        Ok(step) => println!("\nSubmitted. Next: {}", step),
        Err(WizardError::MissingRequired { fields, .. }) => {
            println!("\nPlease complete the required fields:");
            for path in fields {
                let label = form.field(&path).map(|f| f.label.as_str()).unwrap_or(&path);
                println!("  - {}", label);
            }
        }
        Err(e) => return Err(e.into()),
    }
    Ok(Flow::Continue)
}

fn give_consent(
    controller: &mut WizardController,
    input: &mut impl BufRead,
) -> anyhow::Result<Flow> {
    let (title, statement, applicant) = match controller.view()? {
        View::Consent(view) => (
            view.form.title.clone(),
            view.form.statement.clone(),
            view.applicant,
        ),
        other => anyhow::bail!("{} is not the consent step", other.step()),
    };

    println!("{}\n", title);
    println!("I, {}, agree to the terms below.\n", applicant);
    for paragraph in &statement {
        println!("{}", paragraph);
    }

    let Some(answer) = prompt(input, "\nType 'yes' to confirm consent (q to quit): ")? else {
        return Ok(Flow::Quit);
    };
    match answer.trim().to_lowercase().as_str() {
        "q" => return Ok(Flow::Quit),
        "yes" => {
            controller.submit(WizardEvent::SubmitConsent { agreed: true })?;
        }
        _ => match controller.submit(WizardEvent::SubmitConsent { agreed: false }) {
            Err(WizardError::ConsentNotGiven) => {
                println!("Consent is required to continue to the Tier 2 examinations.")
            }
            Err(e) => return Err(e.into()),
            Ok(_) => {}
        },
    }
    Ok(Flow::Continue)
}

fn certificate_menu(
    controller: &mut WizardController,
    surface: &mut dyn PrintSurface,
    input: &mut impl BufRead,
) -> anyhow::Result<Flow> {
    if let Some(certificate) = controller.current_certificate() {
        println!("{}", render_text(&certificate));
    }

    let can_proceed = controller.available_events().contains(&EventKind::Proceed);
    let menu = if can_proceed {
        "[p]rint  [n]ext: Tier 2  [r]eset  [q]uit > "
    } else {
        "[p]rint  [r]eset  [q]uit > "
    };

    let Some(choice) = prompt(input, menu)? else {
        return Ok(Flow::Quit);
    };
    match choice.trim().to_lowercase().as_str() {
        "p" => match print_current(controller, surface) {
            Ok(PrintOutcome::Printed { destination }) => println!("Printed to {}", destination),
            Ok(PrintOutcome::Cancelled) => println!("Print cancelled"),
            Err(e) => println!("Print failed: {}", e),
        },
        "n" if can_proceed => {
            controller.fire(WizardEvent::Proceed)?;
        }
        "r" => controller.reset(),
        "q" => return Ok(Flow::Quit),
        other => println!("Unknown choice '{}'", other),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn surname_field() -> FieldDefinition {
        FormLoader::builtin()
            .unwrap()
            .form("tier1")
            .unwrap()
            .field("tier1.personal.surname")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_parse_run_dry_run() {
        let args = Args::try_parse_from(["medcert", "run", "--dry-run"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Run {
                dry_run: true,
                print_dir: None
            }
        ));
    }

    #[test]
    fn test_field_row_uses_kind_name() {
        let catalog = FormLoader::builtin().unwrap();
        let field = catalog
            .form("tier1")
            .unwrap()
            .field("tier1.history.family")
            .unwrap();
        let row = field_row(field);
        assert!(row.contains(" textarea "));
        assert!(row.starts_with("  tier1.history.family"));
    }

    #[test]
    fn test_ask_field_stores_value() {
        let mut controller = WizardController::builtin().unwrap();
        let mut input = Cursor::new("Kaupa\n");

        let flow = ask_field(&mut controller, &mut input, &surname_field()).unwrap();

        assert!(matches!(flow, Flow::Continue));
        assert_eq!(controller.record().text("tier1.personal.surname"), Some("Kaupa"));
    }

    #[test]
    fn test_ask_field_reprompts_on_record_error() {
        let mut controller = WizardController::builtin().unwrap();
        controller.set_field("tier1.personal", "flat").unwrap();
        let before = controller.record().clone();
        // the rejected write is followed by an empty line that skips the field
        let mut input = Cursor::new("Kaupa\n\n");

        let flow = ask_field(&mut controller, &mut input, &surname_field()).unwrap();

        assert!(matches!(flow, Flow::Continue));
        assert_eq!(controller.record(), &before);
    }

    #[test]
    fn test_ask_field_quits_at_end_of_input() {
        let mut controller = WizardController::builtin().unwrap();
        let mut input = Cursor::new("");
        let flow = ask_field(&mut controller, &mut input, &surname_field()).unwrap();
        assert!(matches!(flow, Flow::Quit));
    }

    #[test]
    fn test_certificate_menu_prints_to_memory() {
        let mut controller = WizardController::builtin().unwrap();
        controller.fire(WizardEvent::SubmitTier1).unwrap();
        let mut surface = MemorySurface::new();
        let mut input = Cursor::new("p\n");

        let flow = certificate_menu(&mut controller, &mut surface, &mut input).unwrap();

        assert!(matches!(flow, Flow::Continue));
        assert_eq!(surface.documents().len(), 1);
        assert_eq!(surface.restore_count(), 1);
        assert_eq!(controller.current_step(), Step::Tier1Certificate);
    }
}
