//! Deterministic (RFC 6979) ECDSA signing on secp256k1

use serde::{Deserialize, Serialize};

use super::keys::PrivateKey;
use crate::error::{Result, SignerError};

/// Recoverable ECDSA signature in the form the exchange contract verifies
///
/// `v` is 27 or 28; `r` and `s` are 0x-prefixed, 64-digit lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSignature")]
pub struct Signature {
    pub v: u8,
    pub r: String,
    pub s: String,
}

/// Wire form, validated through `Signature::from_parts` on the way in
#[derive(Deserialize)]
struct RawSignature {
    v: u8,
    r: String,
    s: String,
}

impl TryFrom<RawSignature> for Signature {
    type Error = SignerError;

    fn try_from(raw: RawSignature) -> Result<Self> {
        let r = hex_to_scalar("r", &raw.r)?;
        let s = hex_to_scalar("s", &raw.s)?;
        Signature::from_parts(raw.v, &r, &s)
    }
}

impl Signature {
    /// Build from raw components, checking each one
    pub fn from_parts(v: u8, r: &[u8], s: &[u8]) -> Result<Self> {
        check_v(v)?;
        Ok(Self {
            v,
            r: scalar_to_hex("r", r)?,
            s: scalar_to_hex("s", s)?,
        })
    }

    /// `r ‖ s ‖ v`, the 65-byte layout expected by `ecrecover` wrappers
    pub fn to_bytes(&self) -> Result<[u8; 65]> {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&hex_to_scalar("r", &self.r)?);
        bytes[32..64].copy_from_slice(&hex_to_scalar("s", &self.s)?);
        bytes[64] = check_v(self.v)?;
        Ok(bytes)
    }
}

fn check_v(v: u8) -> Result<u8> {
    if v != 27 && v != 28 {
        return Err(SignerError::SigningError(format!(
            "recovery id {} is outside 27..=28",
            v
        )));
    }
    Ok(v)
}

fn scalar_to_hex(name: &str, bytes: &[u8]) -> Result<String> {
    if bytes.len() != 32 || bytes.iter().all(|b| *b == 0) {
        return Err(SignerError::SigningError(format!(
            "{} must be a non-zero 32-byte scalar",
            name
        )));
    }
    Ok(format!("0x{}", hex::encode(bytes)))
}

fn hex_to_scalar(name: &str, hex_str: &str) -> Result<[u8; 32]> {
    let cleaned = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let decoded = hex::decode(cleaned)
        .map_err(|e| SignerError::SigningError(format!("{} is not hex: {}", name, e)))?;
    decoded
        .as_slice()
        .try_into()
        .map_err(|_| SignerError::SigningError(format!("{} must be 32 bytes", name)))
}

/// Sign a 32-byte digest
///
/// The nonce is derived from key and digest (RFC 6979), so the same inputs
/// always give the same signature. `s` is normalized to the lower half of the
/// curve order and the recovery id adjusted to match.
pub fn sign(digest: &[u8; 32], private_key: &PrivateKey) -> Result<Signature> {
    let signing_key = private_key.signing_key()?;

    let (signature, recovery_id) = signing_key
        .sign_prehash_recoverable(digest)
        .map_err(|e| SignerError::SigningError(format!("ECDSA signing failed: {}", e)))?;

    if recovery_id.is_x_reduced() {
        return Err(SignerError::SigningError(
            "signature r was reduced modulo the curve order".to_string(),
        ));
    }

    let v = 27 + recovery_id.to_byte();
    let (r, s) = signature.split_bytes();

    Signature::from_parts(v, &r, &s)
}
