//! Network and account layer for contract deployment.
//!
//! Resolves named networks to RPC endpoints and keystores, dials them,
//! unlocks signing keys and produces identity-bound transaction signers.

pub mod config;
pub mod keystore;
pub mod network;
pub mod observability;
pub mod signer;

pub use config::ProjectConfig;
pub use keystore::{CredentialStore, Identity, PassphraseProvider};
pub use network::{Connection, NetworkConfig, NetworkError, NetworkRegistry, NetworkResult};
pub use signer::TransactionAuthorization;
