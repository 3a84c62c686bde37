//! Error definitions shared by the network, keystore and signer subsystems.

use std::path::PathBuf;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while resolving, dialing or signing for a network.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Configuration file missing, malformed or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The requested network is not in the registry.
    #[error("No such network {0}")]
    UnknownNetwork(String),

    /// The RPC transport could not be established.
    #[error("Failed to connect to {url}: {reason}")]
    Connection { url: String, reason: String },

    /// The network's keystore holds no signing identities.
    #[error(
        "No accounts configured for network {network} (keystore {}), did you set the keystore path?",
        keystore.display()
    )]
    NoAccounts { network: String, keystore: PathBuf },

    /// Decryption of the key file failed with the supplied passphrase.
    #[error("Invalid passphrase for account {0}")]
    InvalidPassphrase(Address),

    /// Signing was requested for an identity that was never unlocked.
    #[error("Account {0} is locked")]
    LockedIdentity(Address),

    /// An authorization was asked to sign for an address it is not bound to.
    #[error("Not authorized to sign for {requested}: authorization is bound to {bound}")]
    UnauthorizedSigner { bound: Address, requested: Address },

    /// Key file unreadable or corrupt.
    #[error("Key file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ECDSA backend rejected the signing request.
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl NetworkError {
    /// Build an `Io` error for a key file whose content cannot be used.
    pub(crate) fn corrupt_key(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, reason.into()),
        }
    }

    /// Whether the caller may retry with different input: another network
    /// name or another passphrase.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownNetwork(_) | Self::InvalidPassphrase(_) | Self::LockedIdentity(_)
        )
    }
}

/// Result type for network operations.
pub type NetworkResult<T> = Result<T, NetworkError>;
