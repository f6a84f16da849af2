// SPDX-License-Identifier: MIT

//! Runtime configuration from the environment (and `.env`)

use dotenv::dotenv;
use std::path::PathBuf;

use crate::certificate::Letterhead;
use crate::error::ConfigError;

pub const PRINT_DIR_VAR: &str = "MEDCERT_PRINT_DIR";
pub const ORGANISATION_VAR: &str = "MEDCERT_ORGANISATION";
pub const ISSUER_VAR: &str = "MEDCERT_ISSUER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where `FileSurface` writes printed certificates
    pub print_dir: PathBuf,
    pub organisation: String,
    pub issuer: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let letterhead = Letterhead::default();
        Self {
            print_dir: std::env::temp_dir().join("medcert"),
            organisation: letterhead.organisation,
            issuer: letterhead.issuer,
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys fall back to defaults; keys set
    /// to blank are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                None => Ok(None),
                Some(v) if v.trim().is_empty() => Err(ConfigError::Empty(key)),
                Some(v) => Ok(Some(v.trim().to_string())),
            }
        };

        let mut config = Self::default();
        if let Some(dir) = read(PRINT_DIR_VAR)? {
            config.print_dir = PathBuf::from(dir);
        }
        if let Some(organisation) = read(ORGANISATION_VAR)? {
            config.organisation = organisation;
        }
        if let Some(issuer) = read(ISSUER_VAR)? {
            config.issuer = issuer;
        }
        log::debug!("Loaded config: {:?}", config);
        Ok(config)
    }

    pub fn letterhead(&self) -> Letterhead {
        Letterhead {
            organisation: self.organisation.clone(),
            issuer: self.issuer.clone(),
        }
    }
}
