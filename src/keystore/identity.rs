//! Signing identities discovered in a keystore directory.

use std::fmt;
use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::Deserialize;

/// One signing key: a public address plus the key file that encrypts it.
///
/// The private key is never held here; it only exists inside the
/// [`CredentialStore`](super::CredentialStore) once unlocked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    address: Address,
    path: PathBuf,
}

impl Identity {
    pub(crate) fn new(address: Address, path: PathBuf) -> Self {
        Self { address, path }
    }

    /// The account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Location of the encrypted key file.
    pub fn key_path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.path.display())
    }
}

/// The only part of a key file read during enumeration.
#[derive(Deserialize)]
struct KeyFileHeader {
    address: Option<String>,
}

/// Work out the address a key file belongs to.
///
/// The `address` field wins; files written without one fall back to the
/// `UTC--<timestamp>--<address>` naming convention.
pub(crate) fn address_of_key_file(path: &Path, contents: &str) -> Option<Address> {
    let header: KeyFileHeader = serde_json::from_str(contents).ok()?;
    if let Some(address) = header.address.as_deref().and_then(parse_address) {
        return Some(address);
    }

    let name = path.file_name()?.to_str()?;
    let (_, suffix) = name.rsplit_once("--")?;
    parse_address(suffix)
}

/// Conventional file name for a new key: `UTC--<timestamp>--<address hex>`.
pub(crate) fn key_file_name(address: Address, now: chrono::DateTime<chrono::Utc>) -> String {
    format!(
        "UTC--{}--{}",
        now.format("%Y-%m-%dT%H-%M-%S%.9fZ"),
        hex::encode(address)
    )
}

fn parse_address(raw: &str) -> Option<Address> {
    let clean = raw.strip_prefix("0x").unwrap_or(raw);
    if clean.len() != 40 {
        return None;
    }
    clean.parse().ok()
}
