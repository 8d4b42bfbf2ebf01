//! Tightly packed ABI encoding and Keccak-256 content hashing

use num_bigint::BigUint;
use sha3::{Digest, Keccak256};
use std::str::FromStr;

use crate::error::{Result, SignerError};

/// Keccak-256 of arbitrary bytes
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// A typed value in a packed tuple
///
/// Mirrors the Solidity types used by `abi.encodePacked`:
/// - `Address`: 20 raw bytes
/// - `Uint256`: decimal string, encoded big-endian and left-padded to 32 bytes
/// - `Bytes`: raw bytes of any length, no padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackedValue<'a> {
    Address(&'a [u8]),
    Uint256(&'a str),
    Bytes(&'a [u8]),
}

/// Encode a decimal string as a 32-byte big-endian word
///
/// Fails for anything that is not a non-negative integer below 2^256.
pub fn encode_uint256(value: &str) -> Result<[u8; 32]> {
    // BigUint also accepts '+' and '_' separators, which Solidity tooling does not
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SignerError::InvalidField(format!(
            "uint256 '{}' is not a non-negative integer",
            value
        )));
    }

    let parsed = BigUint::from_str(value).map_err(|e| {
        SignerError::InvalidField(format!("uint256 '{}' is not a non-negative integer: {}", value, e))
    })?;

    if parsed.bits() > 256 {
        return Err(SignerError::InvalidField(format!(
            "uint256 '{}' exceeds 2^256-1",
            value
        )));
    }

    let bytes = parsed.to_bytes_be();
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

/// Concatenate the packed encoding of every field, in order
pub fn encode_packed(fields: &[PackedValue<'_>]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(fields.len() * 32);

    for (index, field) in fields.iter().enumerate() {
        match field {
            PackedValue::Address(bytes) => {
                if bytes.len() != 20 {
                    return Err(SignerError::InvalidField(format!(
                        "field {}: address must be 20 bytes, got {}",
                        index,
                        bytes.len()
                    )));
                }
                out.extend_from_slice(bytes);
            }
            PackedValue::Uint256(value) => {
                let word = encode_uint256(value)
                    .map_err(|e| SignerError::InvalidField(format!("field {}: {}", index, e)))?;
                out.extend_from_slice(&word);
            }
            PackedValue::Bytes(bytes) => out.extend_from_slice(bytes),
        }
    }

    Ok(out)
}

/// Keccak-256 of the packed encoding (Solidity `keccak256(abi.encodePacked(...))`)
pub fn content_hash(fields: &[PackedValue<'_>]) -> Result<[u8; 32]> {
    let packed = encode_packed(fields)?;
    tracing::trace!("Packed {} fields into {} bytes", fields.len(), packed.len());
    Ok(keccak256(&packed))
}
