//! Live session with one network.
//!
//! # Responsibilities
//! - Open the RPC transport and wrap it in a provider
//! - Attach the network's credential store
//! - Expose account listing, unlocking and transaction authorization
//!
//! # Design Decisions
//! - One dial attempt; retry policy belongs to the caller
//! - No timeouts: a hung dial or prompt blocks the calling task
//! - A keystore with no accounts makes the network unusable, so dialing fails

use std::path::Path;
use std::sync::Arc;

use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::client::{ClientBuilder, RpcClient};

use crate::keystore::{CredentialStore, Identity, PassphraseProvider, TerminalPrompt};
use crate::network::registry::NetworkConfig;
use crate::network::types::{NetworkError, NetworkResult};
use crate::signer::TransactionAuthorization;

/// An open connection to a configured network.
#[derive(Clone)]
pub struct Connection {
    config: Arc<NetworkConfig>,
    rpc_client: RpcClient,
    provider: Arc<dyn Provider + Send + Sync>,
    keystore: Arc<CredentialStore>,
}

impl Connection {
    /// Dial the network described by `config`.
    pub async fn open(config: Arc<NetworkConfig>) -> NetworkResult<Self> {
        let rpc_client = ClientBuilder::default()
            .connect(config.rpc_url())
            .await
            .map_err(|e| NetworkError::Connection {
                url: config.rpc_url().to_string(),
                reason: e.to_string(),
            })?;

        let provider = Arc::new(ProviderBuilder::new().connect_client(rpc_client.clone()))
            as Arc<dyn Provider + Send + Sync>;

        let keystore = Arc::new(CredentialStore::open(config.keystore_path()));
        let accounts = keystore.list_identities()?;
        if accounts.is_empty() {
            return Err(NetworkError::NoAccounts {
                network: config.name().to_string(),
                keystore: config.keystore_path().to_path_buf(),
            });
        }

        tracing::info!(
            network = %config.name(),
            rpc_url = %config.rpc_url(),
            accounts = accounts.len(),
            "Connected to network"
        );

        Ok(Self {
            config,
            rpc_client,
            provider,
            keystore,
        })
    }

    pub fn name(&self) -> &str {
        self.config.name()
    }

    pub fn url(&self) -> &str {
        self.config.rpc_url()
    }

    pub fn keystore_path(&self) -> &Path {
        self.config.keystore_path()
    }

    /// The raw JSON-RPC transport.
    pub fn rpc_client(&self) -> &RpcClient {
        &self.rpc_client
    }

    /// The chain client built on the transport.
    pub fn provider(&self) -> &(dyn Provider + Send + Sync) {
        self.provider.as_ref()
    }

    /// The credential store attached to this network.
    pub fn keystore(&self) -> &Arc<CredentialStore> {
        &self.keystore
    }

    /// Query the endpoint's chain id.
    pub async fn chain_id(&self) -> NetworkResult<u64> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| NetworkError::Connection {
                url: self.url().to_string(),
                reason: e.to_string(),
            })
    }

    /// Identities available in the network's keystore.
    pub fn accounts(&self) -> NetworkResult<Vec<Identity>> {
        self.keystore.list_identities()
    }

    /// Unlock `identity` with a known passphrase.
    pub fn unlock(&self, identity: &Identity, passphrase: &str) -> NetworkResult<()> {
        self.keystore.unlock(identity, passphrase)
    }

    /// Unlock `identity` with a passphrase obtained from `provider`.
    pub fn unlock_with(
        &self,
        identity: &Identity,
        provider: &dyn PassphraseProvider,
    ) -> NetworkResult<()> {
        let passphrase = provider
            .passphrase(identity)
            .map_err(|source| NetworkError::Io {
                path: identity.key_path().to_path_buf(),
                source,
            })?;
        self.unlock(identity, &passphrase)
    }

    /// Prompt on the terminal for the passphrase, then unlock.
    pub fn unlock_interactive(&self, identity: &Identity) -> NetworkResult<()> {
        self.unlock_with(identity, &TerminalPrompt)
    }

    /// Authorization that signs only for `identity`.
    pub fn new_authorization(&self, identity: &Identity) -> TransactionAuthorization {
        TransactionAuthorization::new(identity.clone(), self.keystore.clone())
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("name", &self.config.name())
            .field("rpc_url", &self.config.rpc_url())
            .field("keystore", &self.config.keystore_path())
            .finish()
    }
}
