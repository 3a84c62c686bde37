//! Local key storage.
//!
//! # Data Flow
//! ```text
//! keystore directory (one encrypted key file per account)
//!     → store.rs (enumerate, create, unlock, sign)
//!     → identity.rs (address + key file reference)
//!     → passphrase.rs (terminal prompt or programmatic source)
//! ```
//!
//! # Security Constraints
//! - Private keys never leave the CredentialStore
//! - Passphrases are zeroized on drop and never logged

pub mod envelope;
pub mod identity;
pub mod passphrase;
pub mod store;

pub use identity::Identity;
pub use passphrase::{PassphraseProvider, StaticPassphrase, TerminalPrompt};
pub use store::CredentialStore;
