//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! deploy.toml (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProjectConfig (validated, immutable)
//!     → NetworkRegistry::from_config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LoggingConfig, NetworkEntry, ProjectConfig, PROJECT_CONFIG_FILENAME};
pub use validation::ValidationError;
