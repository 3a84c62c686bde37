//! Web3 Secret Storage (v3) envelope for newly created keys.
//!
//! Keys are sealed with scrypt at the standard cost (`n = 2^18, r = 8,
//! p = 1`), AES-128-CTR and a Keccak-256 MAC, and carry their `address` so
//! geth-compatible tooling lists them. Decryption goes through the keystore
//! library, which reads the parameters back from the file.

use aes::cipher::{KeyIvInit, StreamCipher};
use alloy::primitives::{keccak256, Address, B256};
use rand::RngCore;
use serde::Serialize;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

/// log2 of the scrypt CPU/memory cost.
pub const STANDARD_SCRYPT_LOG_N: u8 = 18;
/// scrypt block size.
pub const STANDARD_SCRYPT_R: u32 = 8;
/// scrypt parallelism.
pub const STANDARD_SCRYPT_P: u32 = 1;

const DKLEN: usize = 32;

#[derive(Debug, Serialize)]
pub(crate) struct KeyFile {
    address: String,
    crypto: CryptoSection,
    id: String,
    version: u8,
}

#[derive(Debug, Serialize)]
struct CryptoSection {
    cipher: &'static str,
    ciphertext: String,
    cipherparams: CipherParams,
    kdf: &'static str,
    kdfparams: KdfParams,
    mac: String,
}

#[derive(Debug, Serialize)]
struct CipherParams {
    iv: String,
}

#[derive(Debug, Serialize)]
struct KdfParams {
    dklen: usize,
    n: u32,
    p: u32,
    r: u32,
    salt: String,
}

/// Encrypt `secret` under `passphrase` for `address`.
pub(crate) fn seal(secret: B256, address: Address, passphrase: &str) -> Result<KeyFile, String> {
    let mut rng = rand::thread_rng();
    let mut salt = [0u8; 32];
    let mut iv = [0u8; 16];
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let params = scrypt::Params::new(
        STANDARD_SCRYPT_LOG_N,
        STANDARD_SCRYPT_R,
        STANDARD_SCRYPT_P,
        DKLEN,
    )
    .map_err(|e| format!("scrypt parameters: {e}"))?;
    let mut derived = zeroize::Zeroizing::new(vec![0u8; DKLEN]);
    scrypt::scrypt(passphrase.as_bytes(), &salt, &params, &mut derived[..])
        .map_err(|e| format!("scrypt: {e}"))?;

    let mut ciphertext = secret.to_vec();
    let mut cipher = Aes128Ctr::new(derived[..16].into(), iv[..].into());
    cipher.apply_keystream(&mut ciphertext);

    let mac = keccak256([&derived[16..32], ciphertext.as_slice()].concat());

    Ok(KeyFile {
        address: hex::encode(address),
        crypto: CryptoSection {
            cipher: "aes-128-ctr",
            ciphertext: hex::encode(&ciphertext),
            cipherparams: CipherParams {
                iv: hex::encode(iv),
            },
            kdf: "scrypt",
            kdfparams: KdfParams {
                dklen: DKLEN,
                n: 1 << STANDARD_SCRYPT_LOG_N,
                p: STANDARD_SCRYPT_P,
                r: STANDARD_SCRYPT_R,
                salt: hex::encode(salt),
            },
            mac: hex::encode(mac),
        },
        id: uuid::Uuid::new_v4().to_string(),
        version: 3,
    })
}
