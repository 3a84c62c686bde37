//! End-to-end behavior of registry, connection, unlock and authorization.

use std::sync::Arc;

use alloy::consensus::{SignableTransaction, TxLegacy};
use alloy::primitives::{Address, TxKind, B256, U256};
use deploy_net::keystore::{CredentialStore, StaticPassphrase};
use deploy_net::{NetworkError, NetworkRegistry};

mod common;

use common::TestProject;

fn transfer(nonce: u64) -> TxLegacy {
    TxLegacy {
        chain_id: Some(31337),
        nonce,
        gas_price: 2_000_000_000,
        gas_limit: 21_000,
        to: TxKind::Call(Address::repeat_byte(0xcd)),
        value: U256::from(10u64),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_dev_network_scenario() {
    let project = TestProject::new(&[("dev", "http://localhost:8545", "ks")]);
    let identity = project.add_account("ks", "correct");

    let registry = NetworkRegistry::load(&project.config_path()).unwrap();
    let conn = registry.dial("dev").await.unwrap();

    let accounts = conn.accounts().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].address(), identity.address());

    let err = conn.unlock(&accounts[0], "wrong").unwrap_err();
    assert!(matches!(err, NetworkError::InvalidPassphrase(_)));

    conn.unlock(&accounts[0], "correct").unwrap();

    let auth = conn.new_authorization(&accounts[0]);
    let signed = auth.sign(identity.address(), transfer(0)).unwrap();
    let recovered = signed
        .signature()
        .recover_address_from_prehash(&signed.tx().signature_hash())
        .unwrap();
    assert_eq!(recovered, identity.address());
}

#[tokio::test]
async fn test_unknown_network_fails_before_any_io() {
    // The endpoint is unroutable and the keystore does not exist; resolution
    // must fail first.
    let project = TestProject::new(&[("dev", "http://10.255.255.1:8545", "missing")]);
    let registry = NetworkRegistry::load(&project.config_path()).unwrap();

    for name in ["mainnet", "Dev", "", "dev "] {
        let err = registry.dial(name).await.unwrap_err();
        assert!(matches!(err, NetworkError::UnknownNetwork(ref n) if n == name));
    }
    assert!(!project.keystore("missing").exists());
}

#[tokio::test]
async fn test_empty_keystore_rejects_dial() {
    let project = TestProject::new(&[("dev", "http://localhost:8545", "ks")]);
    std::fs::create_dir_all(project.keystore("ks")).unwrap();

    let registry = NetworkRegistry::load(&project.config_path()).unwrap();
    let result = registry.dial("dev").await;
    assert!(matches!(result, Err(NetworkError::NoAccounts { .. })));
}

#[tokio::test]
async fn test_failed_unlock_does_not_partially_unlock() {
    let project = TestProject::new(&[("dev", "http://localhost:8545", "ks")]);
    let identity = project.add_account("ks", "correct");

    let registry = NetworkRegistry::load(&project.config_path()).unwrap();
    let conn = registry.dial("dev").await.unwrap();

    let err = conn
        .unlock_with(&identity, &StaticPassphrase::new("incorrect"))
        .unwrap_err();
    assert!(matches!(err, NetworkError::InvalidPassphrase(_)));

    let err = conn
        .new_authorization(&identity)
        .sign(identity.address(), transfer(0))
        .unwrap_err();
    assert!(matches!(err, NetworkError::LockedIdentity(_)));
    assert_eq!(conn.keystore().signatures_issued(), 0);
}

#[tokio::test]
async fn test_authorization_rejects_every_other_identity() {
    let project = TestProject::new(&[("dev", "http://localhost:8545", "ks")]);
    let identities: Vec<_> = (0..3)
        .map(|i| project.add_account("ks", &format!("pw{i}")))
        .collect();

    let registry = NetworkRegistry::load(&project.config_path()).unwrap();
    let conn = registry.dial("dev").await.unwrap();
    for (i, identity) in identities.iter().enumerate() {
        conn.unlock(identity, &format!("pw{i}")).unwrap();
    }

    for a in &identities {
        for b in &identities {
            if a == b {
                continue;
            }
            let err = conn
                .new_authorization(a)
                .sign(b.address(), transfer(0))
                .unwrap_err();
            assert!(matches!(err, NetworkError::UnauthorizedSigner { .. }));
        }
    }

    assert_eq!(conn.keystore().signatures_issued(), 0);
}

#[test]
fn test_identity_survives_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let created = CredentialStore::open(dir.path())
        .create_identity("persist")
        .unwrap();

    // A new store over the same directory starts with nothing unlocked.
    let store = CredentialStore::open(dir.path());
    let listed = store.list_identities().unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert!(!store.is_unlocked(&listed[0]));

    store.unlock(&listed[0], "persist").unwrap();
    let digest = B256::repeat_byte(0x5a);
    let signature = store.sign(&listed[0], digest).unwrap();
    assert_eq!(
        signature.recover_address_from_prehash(&digest).unwrap(),
        created.address()
    );
}

#[test]
fn test_concurrent_signing_on_one_identity() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(CredentialStore::open(dir.path()));
    let identity = store.create_identity("shared").unwrap();
    store.unlock(&identity, "shared").unwrap();

    std::thread::scope(|scope| {
        for worker in 0..8u8 {
            let store = store.clone();
            let identity = identity.clone();
            scope.spawn(move || {
                for round in 0..16u8 {
                    let mut bytes = [0u8; 32];
                    bytes[0] = worker;
                    bytes[1] = round;
                    bytes[31] = 1;
                    let digest = B256::from(bytes);

                    let signature = store.sign(&identity, digest).unwrap();
                    let recovered = signature.recover_address_from_prehash(&digest).unwrap();
                    assert_eq!(recovered, identity.address());
                }
            });
        }
    });

    assert_eq!(store.signatures_issued(), 8 * 16);
}

#[test]
fn test_invalid_config_is_config_error() {
    let project = TestProject::new(&[("dev", "not a url", "ks")]);
    let err = NetworkRegistry::load(&project.config_path()).unwrap_err();
    assert!(err.to_string().contains("invalid url"));
}
