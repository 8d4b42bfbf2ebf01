//! Deterministic key and address derivation on secp256k1

use k256::ecdsa::SigningKey;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::Zeroizing;

use super::ecdsa::{sign, Signature};
use super::packed::keccak256;
use crate::error::{Result, SignerError};
use crate::types::Address;

/// 32-byte secp256k1 secret, wiped from memory on drop
#[derive(Clone)]
pub struct PrivateKey(Zeroizing<[u8; 32]>);

impl PrivateKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        PrivateKey(Zeroizing::new(bytes))
    }

    /// Parse a hex private key (with or without 0x prefix)
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let cleaned = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let decoded = Zeroizing::new(
            hex::decode(cleaned)
                .map_err(|_| SignerError::SigningError("private key is not valid hex".to_string()))?,
        );
        let bytes: [u8; 32] = decoded.as_slice().try_into().map_err(|_| {
            SignerError::SigningError(format!(
                "private key must be 32 bytes, got {}",
                decoded.len()
            ))
        })?;
        Ok(PrivateKey::from_bytes(bytes))
    }

    pub(crate) fn signing_key(&self) -> Result<SigningKey> {
        SigningKey::from_slice(self.0.as_slice()).map_err(|_| {
            SignerError::SigningError("private key is not a valid secp256k1 scalar".to_string())
        })
    }
}

// Never print key material
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Derive a private key from a seed: SHA-256(seed)
pub fn derive_key(seed: &[u8]) -> PrivateKey {
    let digest: [u8; 32] = Sha256::digest(seed).into();
    PrivateKey::from_bytes(digest)
}

/// Derive the Ethereum address of a private key
///
/// The address is the last 20 bytes of Keccak-256 over the uncompressed
/// public key without its 0x04 tag.
pub fn derive_address(private_key: &PrivateKey) -> Result<Address> {
    let signing_key = private_key.signing_key()?;
    let point = signing_key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// A private key together with its cached address
#[derive(Clone)]
pub struct Keypair {
    private_key: PrivateKey,
    address: Address,
}

impl Keypair {
    /// Validates the key and computes its address
    pub fn from_private_key(private_key: PrivateKey) -> Result<Self> {
        let address = derive_address(&private_key)?;
        Ok(Self { private_key, address })
    }

    /// Same seed, same keypair
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        Self::from_private_key(derive_key(seed))
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte digest with this keypair's private key
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Signature> {
        sign(digest, &self.private_key)
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
