//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every network has a usable endpoint URL and keystore path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProjectConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the registry

use thiserror::Error;

use crate::config::schema::ProjectConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network name must not be empty")]
    EmptyNetworkName,

    #[error("network '{network}': url must not be empty")]
    EmptyUrl { network: String },

    #[error("network '{network}': invalid url '{url}': {reason}")]
    InvalidUrl {
        network: String,
        url: String,
        reason: String,
    },

    #[error("network '{network}': keystore path must not be empty")]
    EmptyKeystore { network: String },
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProjectConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (name, entry) in &config.networks {
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyNetworkName);
        }

        if entry.url.trim().is_empty() {
            errors.push(ValidationError::EmptyUrl {
                network: name.clone(),
            });
        } else if !is_ipc_path(&entry.url) {
            if let Err(e) = url::Url::parse(&entry.url) {
                errors.push(ValidationError::InvalidUrl {
                    network: name.clone(),
                    url: entry.url.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if entry.keystore.trim().is_empty() {
            errors.push(ValidationError::EmptyKeystore {
                network: name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Plain socket paths are dialed as IPC and are not URLs.
fn is_ipc_path(url: &str) -> bool {
    url.ends_with(".ipc")
}
