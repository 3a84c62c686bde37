//! Shared fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use deploy_net::keystore::{CredentialStore, Identity};
use tempfile::TempDir;

/// A throwaway project directory with a `deploy.toml`.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    /// Create a project whose networks map name → (url, keystore relative to the project).
    pub fn new(networks: &[(&str, &str, &str)]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = String::new();
        for (name, url, keystore) in networks {
            config.push_str(&format!(
                "[networks.{name}]\nurl = \"{url}\"\nkeystore = \"{keystore}\"\n\n"
            ));
        }
        fs::write(dir.path().join("deploy.toml"), config).unwrap();
        Self { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("deploy.toml")
    }

    pub fn keystore(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a new encrypted key into `relative` and return its identity.
    pub fn add_account(&self, relative: &str, passphrase: &str) -> Identity {
        create_account(&self.keystore(relative), passphrase)
    }
}

pub fn create_account(keystore: &Path, passphrase: &str) -> Identity {
    CredentialStore::open(keystore)
        .create_identity(passphrase)
        .unwrap()
}
