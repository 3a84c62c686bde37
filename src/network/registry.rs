//! Named deployment targets.
//!
//! # Responsibilities
//! - Build the name → endpoint/keystore table once from configuration
//! - Resolve names, failing explicitly for unknown ones
//! - Dial resolved networks
//!
//! # Design Decisions
//! - The registry is a plain value constructed at startup and passed by
//!   reference; independent registries can coexist (tests)
//! - Read-only after construction, so concurrent lookups need no locking

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{load_config, ProjectConfig};
use crate::network::connection::Connection;
use crate::network::types::{NetworkError, NetworkResult};

/// Connection parameters for one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    name: String,
    rpc_url: String,
    keystore_path: PathBuf,
}

impl NetworkConfig {
    pub fn new(
        name: impl Into<String>,
        rpc_url: impl Into<String>,
        keystore_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            keystore_path: keystore_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    pub fn keystore_path(&self) -> &Path {
        &self.keystore_path
    }
}

/// Table of every configured network.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    networks: BTreeMap<String, Arc<NetworkConfig>>,
}

impl NetworkRegistry {
    /// Build a registry from parsed configuration.
    ///
    /// Relative keystore paths are joined onto `root`.
    pub fn from_config(config: &ProjectConfig, root: &Path) -> Self {
        let networks = config
            .networks
            .iter()
            .map(|(name, entry)| {
                let keystore = Path::new(&entry.keystore);
                let keystore = if keystore.is_absolute() {
                    keystore.to_path_buf()
                } else {
                    root.join(keystore)
                };
                let network = NetworkConfig::new(name.clone(), entry.url.clone(), keystore);
                (name.clone(), Arc::new(network))
            })
            .collect();

        Self { networks }
    }

    /// Build a registry from the configuration read out of `path`, resolving
    /// relative keystore paths against the file's directory.
    pub fn from_config_file(config: &ProjectConfig, path: &Path) -> Self {
        let root = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_config(config, root)
    }

    /// Load the configuration file at `path` and build the registry from its
    /// `networks` section.
    pub fn load(path: &Path) -> NetworkResult<Self> {
        let config = load_config(path)?;
        let registry = Self::from_config_file(&config, path);

        tracing::info!(
            config = %path.display(),
            networks = registry.len(),
            "Network registry initialized"
        );
        Ok(registry)
    }

    /// Build a registry directly from network configs.
    pub fn from_networks(networks: impl IntoIterator<Item = NetworkConfig>) -> Self {
        let networks = networks
            .into_iter()
            .map(|network| (network.name.clone(), Arc::new(network)))
            .collect();
        Self { networks }
    }

    /// Look up a network by name.
    pub fn resolve(&self, name: &str) -> NetworkResult<Arc<NetworkConfig>> {
        self.networks
            .get(name)
            .cloned()
            .ok_or_else(|| NetworkError::UnknownNetwork(name.to_string()))
    }

    /// Resolve `name` and open a connection to it.
    pub async fn dial(&self, name: &str) -> NetworkResult<Connection> {
        let config = self.resolve(name)?;
        Connection::open(config).await
    }

    /// Configured network names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, ConfigError};

    fn sample() -> ProjectConfig {
        parse_config(
            r#"
            [networks.dev]
            url = "http://localhost:8545"
            keystore = "keystore/dev"

            [networks.prod]
            url = "https://rpc.example.org"
            keystore = "/var/keys/prod"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_known_network() {
        let registry = NetworkRegistry::from_config(&sample(), Path::new("/project"));
        let dev = registry.resolve("dev").unwrap();
        assert_eq!(dev.name(), "dev");
        assert_eq!(dev.rpc_url(), "http://localhost:8545");
        assert_eq!(dev.keystore_path(), Path::new("/project/keystore/dev"));

        let prod = registry.resolve("prod").unwrap();
        assert_eq!(prod.keystore_path(), Path::new("/var/keys/prod"));
    }

    #[test]
    fn test_resolve_unknown_network() {
        let registry = NetworkRegistry::from_config(&sample(), Path::new("/project"));
        let err = registry.resolve("mainnet").unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNetwork(ref n) if n == "mainnet"));
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = NetworkRegistry::from_config(&sample(), Path::new("/project"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["dev", "prod"]);
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_registries_are_independent() {
        let a = NetworkRegistry::from_networks([NetworkConfig::new("a", "http://a:8545", "/ka")]);
        let b = NetworkRegistry::from_networks([NetworkConfig::new("b", "http://b:8545", "/kb")]);
        assert!(a.resolve("b").is_err());
        assert!(b.resolve("a").is_err());
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = NetworkRegistry::load(&dir.path().join("deploy.toml")).unwrap_err();
        assert!(matches!(err, NetworkError::Config(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_config_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, "[networks.dev]\nurl = \"\"\nkeystore = \"ks\"\n").unwrap();

        let err = NetworkRegistry::load(&path).unwrap_err();
        assert!(matches!(err, NetworkError::Config(ConfigError::Validation(_))));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_load_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(
            &path,
            "[networks.dev]\nurl = \"http://localhost:8545\"\nkeystore = \"ks\"\n",
        )
        .unwrap();

        let registry = NetworkRegistry::load(&path).unwrap();
        let dev = registry.resolve("dev").unwrap();
        assert_eq!(dev.keystore_path(), dir.path().join("ks"));
    }
}
