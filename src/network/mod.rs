//! Network resolution and connection subsystem.
//!
//! # Data Flow
//! ```text
//! deploy.toml [networks]
//!     → registry.rs (name → url + keystore)
//!     → connection.rs (RPC transport + provider + credential store)
//!     → signer::TransactionAuthorization (per-identity signing)
//! ```

pub mod connection;
pub mod registry;
pub mod types;

pub use connection::Connection;
pub use registry::{NetworkConfig, NetworkRegistry};
pub use types::{NetworkError, NetworkResult};
