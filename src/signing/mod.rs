//! IDEX order signing: packed hashing, personal-message wrapping and ECDSA
//!
//! Every signed payload goes through the same three stages:
//!
//! 1. `content_hash` - Keccak-256 over the tightly packed field tuple
//!    (`abi.encodePacked` rules: 20-byte addresses, 32-byte uint256, raw bytes)
//! 2. `signable_digest` - Keccak-256 over
//!    `"\x19Ethereum Signed Message:\n32" ++ content_hash`
//! 3. `sign` - deterministic secp256k1 ECDSA, encoded as `{v, r, s}` with
//!    `v` in {27, 28}
//!
//! The exchange contract recomputes stages 1 and 2 and checks the signer with
//! `ecrecover`, so field order and widths must match the contract exactly.

mod ecdsa;
mod keys;
mod packed;
mod personal;

#[cfg(test)]
mod tests;

pub use ecdsa::{sign, Signature};
pub use keys::{derive_address, derive_key, Keypair, PrivateKey};
pub use packed::{content_hash, encode_packed, encode_uint256, keccak256, PackedValue};
pub use personal::{signable_digest, signable_digest_of};

use crate::error::{Result, SignerError};

/// Convert a 32-byte hash to 0x-prefixed lowercase hex
pub fn hash_to_hex(hash: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a 0x-prefixed (or bare) 32-byte hex hash
pub fn hex_to_hash(hex_str: &str) -> Result<[u8; 32]> {
    let cleaned = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes = hex::decode(cleaned)
        .map_err(|e| SignerError::InvalidField(format!("'{}' is not hex: {}", hex_str, e)))?;
    bytes.as_slice().try_into().map_err(|_| {
        SignerError::InvalidField(format!("hash must be 32 bytes, got {}", bytes.len()))
    })
}

/// Sign a content hash: wrap it as a personal message, then sign the digest
pub fn sign_content_hash(content_hash: &[u8; 32], keypair: &Keypair) -> Result<Signature> {
    let digest = signable_digest(content_hash);
    tracing::debug!("Signable digest: {}", hash_to_hex(&digest));
    keypair.sign_digest(&digest)
}
