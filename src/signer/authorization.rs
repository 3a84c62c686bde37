//! Identity-bound transaction signing.

use std::sync::Arc;

use alloy::consensus::{SignableTransaction, Signed};
use alloy::primitives::{Address, Signature};

use crate::keystore::{CredentialStore, Identity};
use crate::network::types::{NetworkError, NetworkResult};

/// Signing capability for exactly one identity.
#[derive(Debug, Clone)]
pub struct TransactionAuthorization {
    identity: Identity,
    store: Arc<CredentialStore>,
}

impl TransactionAuthorization {
    pub fn new(identity: Identity, store: Arc<CredentialStore>) -> Self {
        Self { identity, store }
    }

    /// The sender address transactions are signed for.
    pub fn from(&self) -> Address {
        self.identity.address()
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Sign `tx` on behalf of `target`.
    ///
    /// Fails with `UnauthorizedSigner` before any signing happens when
    /// `target` is not the bound address, and with `LockedIdentity` when the
    /// identity has not been unlocked.
    pub fn sign<T>(&self, target: Address, tx: T) -> NetworkResult<Signed<T>>
    where
        T: SignableTransaction<Signature>,
    {
        if target != self.identity.address() {
            return Err(NetworkError::UnauthorizedSigner {
                bound: self.identity.address(),
                requested: target,
            });
        }

        let digest = tx.signature_hash();
        let signature = self.store.sign(&self.identity, digest)?;

        tracing::debug!(from = %target, digest = %digest, "Transaction signed");
        Ok(tx.into_signed(signature))
    }
}
