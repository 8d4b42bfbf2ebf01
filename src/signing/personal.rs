//! Ethereum "personal message" hashing (`eth_sign` convention)

use super::packed::keccak256;

const PERSONAL_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Hash an arbitrary message the way `personal_sign` does:
/// `keccak256("\x19Ethereum Signed Message:\n" ++ len(message) ++ message)`
pub fn signable_digest_of(message: &[u8]) -> [u8; 32] {
    let length = message.len().to_string();

    let mut buffer =
        Vec::with_capacity(PERSONAL_MESSAGE_PREFIX.len() + length.len() + message.len());
    buffer.extend_from_slice(PERSONAL_MESSAGE_PREFIX);
    buffer.extend_from_slice(length.as_bytes());
    buffer.extend_from_slice(message);

    keccak256(&buffer)
}

/// Digest actually signed for a 32-byte content hash
pub fn signable_digest(content_hash: &[u8; 32]) -> [u8; 32] {
    signable_digest_of(content_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signable_digest_layout() {
        let hash = [0xabu8; 32];

        let mut expected = [0u8; 60];
        expected[..28].copy_from_slice(b"\x19Ethereum Signed Message:\n32");
        expected[28..].copy_from_slice(&hash);

        assert_eq!(signable_digest(&hash), keccak256(&expected));
    }

    #[test]
    fn test_signable_digest_differs_from_content_hash() {
        let hash = keccak256(b"order");
        assert_ne!(signable_digest(&hash), hash);
        assert_eq!(signable_digest(&hash), signable_digest(&hash));
    }

    #[test]
    fn test_known_personal_message_hash() {
        assert_eq!(
            hex::encode(signable_digest_of(b"Some data")),
            "1da44b586eb0729ff70a73c326926f6ed5a25f5b056e7f47fbc6e58d86871655"
        );
    }
}
