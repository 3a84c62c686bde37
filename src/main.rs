//! deploy-net command line.
//!
//! Thin driver over the library: list networks, inspect and create
//! accounts, and check that an account unlocks on a given network.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use deploy_net::config::{load_config, PROJECT_CONFIG_FILENAME};
use deploy_net::keystore::CredentialStore;
use deploy_net::observability::init_logging;
use deploy_net::NetworkRegistry;

#[derive(Parser)]
#[command(name = "deploy-net")]
#[command(about = "Network and account management for contract deployment", long_about = None)]
struct Cli {
    /// Project configuration file.
    #[arg(short, long, default_value = PROJECT_CONFIG_FILENAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured networks
    Networks,
    /// Dial a network and list its accounts
    Accounts { network: String },
    /// Create a new encrypted account in a keystore directory
    NewAccount { keystore: PathBuf },
    /// Dial a network and unlock one of its accounts
    Unlock {
        network: String,
        /// Account to unlock (defaults to the first one)
        #[arg(short, long)]
        account: Option<Address>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Networks => {
            let registry = open_registry(&cli.config)?;
            for name in registry.names() {
                let network = registry.resolve(name)?;
                println!(
                    "{}\t{}\t{}",
                    network.name(),
                    network.rpc_url(),
                    network.keystore_path().display()
                );
            }
        }
        Commands::Accounts { network } => {
            let conn = open_registry(&cli.config)?.dial(&network).await?;
            for identity in conn.accounts()? {
                println!("{identity}");
            }
        }
        Commands::NewAccount { keystore } => {
            init_logging("info");
            new_account(&keystore)?;
        }
        Commands::Unlock { network, account } => {
            let conn = open_registry(&cli.config)?.dial(&network).await?;
            let accounts = conn.accounts()?;
            let identity = match account {
                Some(address) => accounts
                    .into_iter()
                    .find(|identity| identity.address() == address)
                    .with_context(|| format!("account {address} not found on {network}"))?,
                None => accounts
                    .into_iter()
                    .next()
                    .with_context(|| format!("no accounts on {network}"))?,
            };

            conn.unlock_interactive(&identity)?;
            println!("Unlocked {}", identity.address());
        }
    }

    Ok(())
}

/// Read the project config, start logging at its level and build the registry.
fn open_registry(config_path: &Path) -> Result<NetworkRegistry> {
    let config = load_config(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    init_logging(&config.logging.level);
    Ok(NetworkRegistry::from_config_file(&config, config_path))
}

fn new_account(keystore: &Path) -> Result<()> {
    let passphrase = zeroize::Zeroizing::new(rpassword::prompt_password("Passphrase: ")?);
    let repeat = zeroize::Zeroizing::new(rpassword::prompt_password("Repeat passphrase: ")?);
    if *passphrase != *repeat {
        bail!("passphrases do not match");
    }

    let identity = CredentialStore::open(keystore).create_identity(&passphrase)?;
    println!("Address: {}", identity.address());
    println!("Key file: {}", identity.key_path().display());
    Ok(())
}
