//! Passphrase sources for unlocking identities.

use std::io::{self, Write};

use zeroize::Zeroizing;

use crate::keystore::Identity;

/// Supplies the passphrase for an identity about to be unlocked.
pub trait PassphraseProvider {
    fn passphrase(&self, identity: &Identity) -> io::Result<Zeroizing<String>>;
}

/// Prompts on the controlling terminal with echo disabled.
///
/// The prompt names the account address so the operator can confirm which
/// key is being unlocked. The terminal echoes the newline that ends input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PassphraseProvider for TerminalPrompt {
    fn passphrase(&self, identity: &Identity) -> io::Result<Zeroizing<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt_for(identity))?;
        stdout.flush()?;

        rpassword::read_password().map(Zeroizing::new)
    }
}

/// A fixed passphrase, for scripted use and tests.
#[derive(Clone)]
pub struct StaticPassphrase(Zeroizing<String>);

impl StaticPassphrase {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(Zeroizing::new(passphrase.into()))
    }
}

impl std::fmt::Debug for StaticPassphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticPassphrase(..)")
    }
}

impl PassphraseProvider for StaticPassphrase {
    fn passphrase(&self, _identity: &Identity) -> io::Result<Zeroizing<String>> {
        Ok(self.0.clone())
    }
}

pub(crate) fn prompt_for(identity: &Identity) -> String {
    format!("Enter passphrase for account {}: ", identity.address())
}
