//! Encrypted key repository backed by a directory of Web3 Secret Storage files.
//!
//! # Security
//! - Key material is only held in memory after a successful unlock
//! - Unlocked keys stay usable until the store is dropped; there is no
//!   auto-lock timeout
//! - Passphrases and keys are never logged

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use alloy::primitives::{Address, Signature, B256};
use alloy::signers::local::{LocalSignerError, PrivateKeySigner};
use alloy::signers::SignerSync;
use dashmap::DashMap;

use crate::keystore::envelope;
use crate::keystore::identity::{address_of_key_file, key_file_name, Identity};
use crate::network::types::{NetworkError, NetworkResult};

/// A keystore directory plus the set of identities unlocked in this process.
///
/// Key derivation parameters are read from each key file on decryption, so
/// files written by other Ethereum tooling unlock unchanged. New keys are
/// always sealed at the standard `n = 2^18, p = 1` scrypt cost.
#[derive(Debug)]
pub struct CredentialStore {
    dir: PathBuf,
    /// Decrypted keys by address. Unlock holds the shard write lock, signing a
    /// read lock, so the two never interleave on the same identity.
    unlocked: DashMap<Address, PrivateKeySigner>,
    signatures: AtomicU64,
}

impl CredentialStore {
    /// Open a store rooted at `dir`. The directory need not exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            unlocked: DashMap::new(),
            signatures: AtomicU64::new(0),
        }
    }

    /// The keystore directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Enumerate every identity with a key file in the directory.
    ///
    /// A missing or empty directory yields an empty list. Entries that are
    /// not key files are skipped.
    pub fn list_identities(&self) -> NetworkResult<Vec<Identity>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(NetworkError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut identities = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| NetworkError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let path = entry.path();

            if is_hidden(&path) || !path.is_file() {
                continue;
            }

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "Skipping unreadable keystore entry"
                    );
                    continue;
                }
            };

            match address_of_key_file(&path, &contents) {
                Some(address) => identities.push(Identity::new(address, path)),
                None => {
                    tracing::debug!(path = %path.display(), "Skipping non-key file in keystore");
                }
            }
        }

        identities.sort_by(|a, b| a.key_path().cmp(b.key_path()));
        Ok(identities)
    }

    /// Look up the identity for `address`.
    pub fn find(&self, address: Address) -> NetworkResult<Option<Identity>> {
        Ok(self
            .list_identities()?
            .into_iter()
            .find(|identity| identity.address() == address))
    }

    /// Generate a new key, encrypt it with `passphrase` and write it to the
    /// directory using the `UTC--<timestamp>--<address>` naming convention.
    pub fn create_identity(&self, passphrase: &str) -> NetworkResult<Identity> {
        fs::create_dir_all(&self.dir).map_err(|source| NetworkError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let key = PrivateKeySigner::random();
        let address = key.address();
        let name = key_file_name(address, chrono::Utc::now());
        let path = self.dir.join(&name);

        let sealed = envelope::seal(key.to_bytes(), address, passphrase)
            .map_err(|reason| NetworkError::corrupt_key(&path, reason))?;
        let json = serde_json::to_vec_pretty(&sealed)
            .map_err(|e| NetworkError::corrupt_key(&path, e.to_string()))?;
        write_private(&path, &json).map_err(|source| NetworkError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(address = %address, path = %path.display(), "Created new account");
        Ok(Identity::new(address, path))
    }

    /// Decrypt the identity's key with `passphrase` and keep it in memory.
    ///
    /// A failed unlock leaves the identity exactly as locked (or unlocked) as
    /// it was before.
    pub fn unlock(&self, identity: &Identity, passphrase: &str) -> NetworkResult<()> {
        let path = identity.key_path();

        let key = PrivateKeySigner::decrypt_keystore(path, passphrase).map_err(|e| match e {
            LocalSignerError::EthKeystoreError(eth_keystore::KeystoreError::MacMismatch) => {
                NetworkError::InvalidPassphrase(identity.address())
            }
            LocalSignerError::EthKeystoreError(eth_keystore::KeystoreError::StdIo(reason)) => {
                NetworkError::Io {
                    path: path.to_path_buf(),
                    source: io::Error::other(reason),
                }
            }
            LocalSignerError::IoError(source) => NetworkError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => NetworkError::corrupt_key(path, other.to_string()),
        })?;

        if key.address() != identity.address() {
            return Err(NetworkError::corrupt_key(
                path,
                format!(
                    "key content mismatch: have account {}, want {}",
                    key.address(),
                    identity.address()
                ),
            ));
        }

        self.unlocked.insert(identity.address(), key);
        tracing::info!(address = %identity.address(), "Account unlocked");
        Ok(())
    }

    /// Whether the identity has been unlocked in this process.
    pub fn is_unlocked(&self, identity: &Identity) -> bool {
        self.unlocked.contains_key(&identity.address())
    }

    /// Sign a 32-byte digest with an unlocked identity's key.
    pub fn sign(&self, identity: &Identity, digest: B256) -> NetworkResult<Signature> {
        let key = self
            .unlocked
            .get(&identity.address())
            .ok_or(NetworkError::LockedIdentity(identity.address()))?;

        self.signatures.fetch_add(1, Ordering::SeqCst);
        key.sign_hash_sync(&digest)
            .map_err(|e| NetworkError::Signing(e.to_string()))
    }

    /// Number of signing operations performed by this store.
    pub fn signatures_issued(&self) -> u64 {
        self.signatures.load(Ordering::SeqCst)
    }
}

/// Key files are readable by the owner only.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)?.write_all(contents)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
