// SPDX-License-Identifier: MIT

//! Certificates: read-only projections of the record
//!
//! Missing values always show as `N/A`.

mod model;
mod projection;
mod render;

pub use model::{Certificate, CertificateField, CertificateKind, CertificateSection, Letterhead};
pub use projection::{final_certificate, project, tier1_certificate, NOT_AVAILABLE};
pub use render::render_text;
