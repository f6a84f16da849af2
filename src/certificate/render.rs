// SPDX-License-Identifier: MIT

//! Plain-text certificate rendering

use super::model::Certificate;

const WIDTH: usize = 64;

/// Render a certificate as plain text.
///
/// Only certificate content is produced; no navigation or prompts.
pub fn render_text(certificate: &Certificate) -> String {
    let rule = "=".repeat(WIDTH);
    let mut out = Vec::new();

    out.push(rule.clone());
    out.push(centered(&certificate.organisation));
    out.push(centered(&certificate.title));
    out.push(rule.clone());

    for section in &certificate.sections {
        out.push(String::new());
        out.push(section.heading.clone());
        out.push("-".repeat(section.heading.chars().count()));
        for field in &section.fields {
            out.push(format!("  {}: {}", field.label, field.value));
        }
    }

    out.push(String::new());
    for line in &certificate.footer {
        out.push(centered(line));
    }
    out.push(rule);

    out.join("\n") + "\n"
}

fn centered(text: &str) -> String {
    let len = text.chars().count();
    if len >= WIDTH {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((WIDTH - len) / 2), text)
}
