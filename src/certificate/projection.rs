// SPDX-License-Identifier: MIT

//! Record-to-certificate projection

use chrono::NaiveDate;

use super::model::{Certificate, CertificateField, CertificateKind, CertificateSection, Letterhead};
use crate::condition;
use crate::record::{ApplicationRecord, Recommendation, Tier};

pub const NOT_AVAILABLE: &str = "N/A";

/// Tier 2 comments only appear for outcomes that need explaining
const SHOW_TIER2_COMMENTS: &str =
    "tier2.recommendation.status in ['ineligible', 'deferred', 'pending']";

/// Build the certificate of the given kind
pub fn project(
    kind: CertificateKind,
    record: &ApplicationRecord,
    letterhead: &Letterhead,
    generated_on: NaiveDate,
) -> Certificate {
    match kind {
        CertificateKind::Tier1 => tier1_certificate(record, letterhead, generated_on),
        CertificateKind::Final => final_certificate(record, letterhead, generated_on),
    }
}

pub fn tier1_certificate(
    record: &ApplicationRecord,
    letterhead: &Letterhead,
    generated_on: NaiveDate,
) -> Certificate {
    let applicant = CertificateSection {
        heading: "Applicant Details".to_string(),
        fields: vec![
            CertificateField::new("Full Name", full_name(record)),
            CertificateField::new("Date of Birth", or_na(record, "tier1.personal.dob")),
        ],
    };

    let summary = CertificateSection {
        heading: "Tier 1 Examination Summary".to_string(),
        fields: vec![
            CertificateField::new(
                "Recommendation",
                status(record, "tier1.officerReport.recommendation", Tier::Tier1),
            ),
            CertificateField::new(
                "Height",
                format!("{} cm", or_na(record, "tier1.officerReport.height")),
            ),
            CertificateField::new(
                "Weight",
                format!("{} kg", or_na(record, "tier1.officerReport.weight")),
            ),
            CertificateField::new(
                "Blood Pressure",
                format!(
                    "{} / {}",
                    or_na(record, "tier1.officerReport.bpSystolic"),
                    or_na(record, "tier1.officerReport.bpDiastolic")
                ),
            ),
            CertificateField::new(
                "Pulse",
                format!("{} /min", or_na(record, "tier1.officerReport.pulse")),
            ),
        ],
    };

    Certificate {
        kind: CertificateKind::Tier1,
        organisation: letterhead.organisation.clone(),
        title: CertificateKind::Tier1.title().to_string(),
        sections: vec![applicant, summary],
        footer: vec![
            format!("Official Document of the {} - Tier 1", letterhead.issuer),
            generated_line(generated_on),
        ],
    }
}

pub fn final_certificate(
    record: &ApplicationRecord,
    letterhead: &Letterhead,
    generated_on: NaiveDate,
) -> Certificate {
    let applicant = CertificateSection {
        heading: "Applicant Details".to_string(),
        fields: vec![
            CertificateField::new("Full Name", full_name(record)),
            CertificateField::new("Date of Birth", or_na(record, "tier1.personal.dob")),
            CertificateField::new("Phone", or_na(record, "tier1.personal.phone")),
            CertificateField::new("Email", or_na(record, "tier1.personal.email")),
        ],
    };

    let tier1 = CertificateSection {
        heading: "Tier 1 Examination Summary".to_string(),
        fields: vec![CertificateField::new(
            "Recommendation",
            status(record, "tier1.officerReport.recommendation", Tier::Tier1),
        )],
    };

    let mut tier2_fields = vec![CertificateField::new(
        "Final Recommendation",
        status(record, "tier2.recommendation.status", Tier::Tier2),
    )];
    if shows_tier2_comments(record) {
        tier2_fields.push(CertificateField::new(
            "Comments",
            or_na(record, "tier2.recommendation.comments"),
        ));
    }
    for (label, path) in [
        ("ECG", "tier2.exams.ecg.result"),
        ("Spirometry", "tier2.exams.spiro.result"),
        ("Audiometry", "tier2.exams.audio.result"),
        ("Drug Screen", "tier2.exams.drugs.result"),
        ("HIV Status", "tier2.exams.serology.hiv"),
        ("Blood Group", "tier2.exams.blood.group"),
    ] {
        tier2_fields.push(CertificateField::new(label, or_na(record, path)));
    }

    let tier2 = CertificateSection {
        heading: "Tier 2 Examination Summary".to_string(),
        fields: tier2_fields,
    };

    Certificate {
        kind: CertificateKind::Final,
        organisation: letterhead.organisation.clone(),
        title: CertificateKind::Final.title().to_string(),
        sections: vec![applicant, tier1, tier2],
        footer: vec![
            format!("Official Document of the {}", letterhead.issuer),
            generated_line(generated_on),
        ],
    }
}

fn or_na(record: &ApplicationRecord, path: &str) -> String {
    record.text(path).unwrap_or(NOT_AVAILABLE).to_string()
}

fn full_name(record: &ApplicationRecord) -> String {
    let parts: Vec<&str> = ["tier1.personal.givenNames", "tier1.personal.surname"]
        .iter()
        .filter_map(|p| record.text(p))
        .map(str::trim)
        .collect();
    if parts.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        parts.join(" ")
    }
}

fn status(record: &ApplicationRecord, path: &str, tier: Tier) -> String {
    record
        .text(path)
        .and_then(|v| Recommendation::parse_for(tier, v))
        .map(|r| r.badge().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn shows_tier2_comments(record: &ApplicationRecord) -> bool {
    match condition::check(SHOW_TIER2_COMMENTS, record) {
        Ok(show) => show,
        Err(e) => {
            log::error!("Failed to evaluate comments guard: {}", e);
            false
        }
    }
}

fn generated_line(date: NaiveDate) -> String {
    format!("Date Generated: {}", date.format("%d/%m/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn record(pairs: &[(&str, &str)]) -> ApplicationRecord {
        let mut record = ApplicationRecord::empty();
        for (path, value) in pairs {
            record.set_in_place(path, *value).unwrap();
        }
        record
    }

    #[test]
    fn test_tier1_empty_record_is_all_na() {
        let cert = tier1_certificate(&ApplicationRecord::empty(), &Letterhead::default(), date());

        assert_eq!(cert.field("Full Name"), Some("N/A"));
        assert_eq!(cert.field("Date of Birth"), Some("N/A"));
        assert_eq!(cert.field("Recommendation"), Some("N/A"));
        assert_eq!(cert.field("Height"), Some("N/A cm"));
        assert_eq!(cert.field("Blood Pressure"), Some("N/A / N/A"));
        assert_eq!(cert.field("Pulse"), Some("N/A /min"));
        assert_eq!(cert.footer[1], "Date Generated: 19/10/2026");
    }

    #[test]
    fn test_tier1_filled() {
        let rec = record(&[
            ("tier1.personal.givenNames", "John"),
            ("tier1.personal.surname", "Kaupa"),
            ("tier1.personal.dob", "2001-03-09"),
            ("tier1.officerReport.recommendation", "eligible"),
            ("tier1.officerReport.height", "172"),
            ("tier1.officerReport.bpSystolic", "120"),
        ]);
        let cert = tier1_certificate(&rec, &Letterhead::default(), date());

        assert_eq!(cert.organisation, "ROYAL PAPUA NEW GUINEA CONSTABULARY");
        assert_eq!(cert.title, "Tier 1 Medical Certificate");
        assert_eq!(cert.field("Full Name"), Some("John Kaupa"));
        assert_eq!(cert.field("Recommendation"), Some("ELIGIBLE"));
        assert_eq!(cert.field("Height"), Some("172 cm"));
        assert_eq!(cert.field("Blood Pressure"), Some("120 / N/A"));
        assert_eq!(
            cert.footer[0],
            "Official Document of the RPNGC Medical Services - Tier 1"
        );
    }

    #[test]
    fn test_full_name_with_one_part() {
        let rec = record(&[("tier1.personal.surname", "Kaupa")]);
        let cert = tier1_certificate(&rec, &Letterhead::default(), date());
        assert_eq!(cert.field("Full Name"), Some("Kaupa"));
    }

    #[test]
    fn test_tier1_rejects_pending() {
        let rec = record(&[("tier1.officerReport.recommendation", "pending")]);
        let cert = tier1_certificate(&rec, &Letterhead::default(), date());
        assert_eq!(cert.field("Recommendation"), Some("N/A"));
    }

    #[test]
    fn test_final_comments_hidden_when_eligible() {
        let rec = record(&[
            ("tier2.recommendation.status", "eligible"),
            ("tier2.recommendation.comments", "Fit"),
        ]);
        let cert = final_certificate(&rec, &Letterhead::default(), date());
        assert_eq!(cert.field("Final Recommendation"), Some("ELIGIBLE"));
        assert_eq!(cert.field("Comments"), None);
    }

    #[test]
    fn test_final_comments_shown_when_pending() {
        let rec = record(&[("tier2.recommendation.status", "pending")]);
        let cert = final_certificate(&rec, &Letterhead::default(), date());
        assert_eq!(cert.field("Final Recommendation"), Some("PENDING REVIEW"));
        assert_eq!(cert.field("Comments"), Some("N/A"));
    }

    #[test]
    fn test_final_exam_rows() {
        let rec = record(&[
            ("tier2.exams.ecg.result", "normal"),
            ("tier2.exams.blood.group", "O"),
        ]);
        let cert = final_certificate(&rec, &Letterhead::default(), date());
        assert_eq!(cert.field("ECG"), Some("normal"));
        assert_eq!(cert.field("Blood Group"), Some("O"));
        assert_eq!(cert.field("Spirometry"), Some("N/A"));
        assert_eq!(cert.sections.len(), 3);
        assert_eq!(cert.footer[0], "Official Document of the RPNGC Medical Services");
    }

    #[test]
    fn test_custom_letterhead() {
        let letterhead = Letterhead {
            organisation: "TEST CONSTABULARY".to_string(),
            issuer: "Test Clinic".to_string(),
        };
        let cert = project(
            CertificateKind::Final,
            &ApplicationRecord::empty(),
            &letterhead,
            date(),
        );
        assert_eq!(cert.organisation, "TEST CONSTABULARY");
        assert_eq!(cert.footer[0], "Official Document of the Test Clinic");
    }
}
