//! Known-answer vectors and cross-stage checks for the signing pipeline

use super::*;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

const WEB3_DOCS_KEY: &str = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

/// Recover the signer's address from a digest and signature
fn recover_address(digest: &[u8; 32], signature: &Signature) -> crate::types::Address {
    let bytes = signature.to_bytes().unwrap();
    let sig = EcdsaSignature::from_slice(&bytes[..64]).unwrap();
    let recovery_id = RecoveryId::from_byte(bytes[64] - 27).unwrap();
    let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id).unwrap();
    let point = key.to_encoded_point(false);
    crate::types::Address::from_slice(&keccak256(&point.as_bytes()[1..])[12..]).unwrap()
}

#[test]
fn test_personal_sign_known_vector() {
    // web3.eth.accounts.sign("Some data", key)
    let key = PrivateKey::from_hex(WEB3_DOCS_KEY).unwrap();
    let digest = signable_digest_of(b"Some data");
    let signature = sign(&digest, &key).unwrap();

    assert_eq!(signature.v, 28);
    assert_eq!(
        signature.r,
        "0xb91467e570a6466aa9e9876cbcd013baba02900b8979d43fe208a4a4f339f5fd"
    );
    assert_eq!(
        signature.s,
        "0x6007e74cd82e037b800186422fc2da167c747ef045e5d18a5f5d4300f8e1a029"
    );
}

#[test]
fn test_sign_content_hash_recovers_keypair_address() {
    let keypair = Keypair::from_seed(b"recovery seed").unwrap();
    let hash = content_hash(&[
        PackedValue::Address(keypair.address().as_bytes()),
        PackedValue::Uint256("12345"),
    ])
    .unwrap();

    let signature = sign_content_hash(&hash, &keypair).unwrap();

    // The contract recovers from the wrapped digest, not the raw hash
    assert_eq!(recover_address(&signable_digest(&hash), &signature), keypair.address());
    assert_ne!(recover_address(&hash, &signature), keypair.address());
}

#[test]
fn test_signature_bytes_layout() {
    let keypair = Keypair::from_seed(b"layout seed").unwrap();
    let signature = sign_content_hash(&keccak256(b"payload"), &keypair).unwrap();
    let bytes = signature.to_bytes().unwrap();

    assert_eq!(format!("0x{}", hex::encode(&bytes[..32])), signature.r);
    assert_eq!(format!("0x{}", hex::encode(&bytes[32..64])), signature.s);
    assert_eq!(bytes[64], signature.v);
}

#[test]
fn test_low_s_signatures() {
    // secp256k1 order / 2
    let half_order = hex_to_hash("0x7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0").unwrap();
    let keypair = Keypair::from_seed(b"low s seed").unwrap();

    for i in 0u8..16 {
        let signature = keypair.sign_digest(&keccak256(&[i])).unwrap();
        let s = hex_to_hash(&signature.s).unwrap();
        assert!(s <= half_order, "s not normalized for digest {}", i);
    }
}

// Fixed vectors from an independent keccak/secp256k1 implementation
#[test]
fn test_payload_known_answer_vectors() {
    use crate::config::ExchangeConfig;
    use crate::orders::{cancel_hash, cancel_order, place_order, request_withdrawal, withdrawal_hash};
    use crate::types::{
        Address, CancelIntent, OrderIntent, OrderSide, TokenDescriptor, WithdrawalRequest,
    };

    let config = ExchangeConfig::default();
    let keypair = Keypair::from_seed(b"idex known answer seed").unwrap();
    assert_eq!(
        keypair.address().to_string(),
        "0x3e60d5f950060d98731cbb84306f29fd20c06eca"
    );

    let intent = OrderIntent {
        side: OrderSide::Buy,
        amount_token: "100".to_string(),
        amount_eth: "1".to_string(),
        token: TokenDescriptor {
            contract: Address([0xaa; 20]),
            factor: 18,
        },
        nonce: 5,
        address: Address([0xbb; 20]),
    };

    let order = place_order(&config, &intent, &keypair).unwrap();
    assert_eq!(order.amount_buy, "100000000000000000000");
    assert_eq!(order.amount_sell, "1000000000000000000");
    assert_eq!(order.signature.v, 28);
    assert_eq!(
        order.signature.r,
        "0x9d9f3ea569fa84a8855783d4bc586a4340ebbcf3906dad35f07577c59b462121"
    );
    assert_eq!(
        order.signature.s,
        "0x2ccb08cdcef30ab2a6183aca56b61435ffe3bcef413bdd0d7558dd9456ca23ec"
    );

    let cancel = CancelIntent {
        order: OrderIntent { nonce: 6, ..intent },
        nonce_of_order: 5,
    };
    let signed_cancel = cancel_order(&config, &cancel, &keypair).unwrap();
    assert_eq!(
        signed_cancel.order_hash,
        "0x16e85cfd43473210cb6e580fe1711eb447b9775d93c32876b96313efeae49539"
    );
    let order_hash = hex_to_hash(&signed_cancel.order_hash).unwrap();
    assert_eq!(
        hash_to_hex(&cancel_hash(&order_hash, 6).unwrap()),
        "0x945640164b6d685fa7cd31ce5fa29e2fb85f36a1eda31df834eb24505992001c"
    );
    assert_eq!(signed_cancel.signature.v, 28);
    assert_eq!(
        signed_cancel.signature.r,
        "0x8504b545ba807113cc66323985098006ee7882bb48db1eb8d48c0dd6edd9e050"
    );
    assert_eq!(
        signed_cancel.signature.s,
        "0x53eb7a7275dbe3d48dbeb28dfeea78046c46f921fd5848a431e33743f002af8e"
    );

    let withdrawal = WithdrawalRequest {
        token: TokenDescriptor {
            contract: Address([0xaa; 20]),
            factor: 6,
        },
        amount: "2.5".to_string(),
        nonce: 11,
        address: Address([0xbb; 20]),
    };
    let signed_withdrawal = request_withdrawal(&config, &withdrawal, &keypair).unwrap();
    assert_eq!(signed_withdrawal.amount, "2500000");
    assert_eq!(
        hash_to_hex(
            &withdrawal_hash(
                &config,
                &withdrawal.token.contract,
                "2500000",
                &withdrawal.address,
                11
            )
            .unwrap()
        ),
        "0xddfe5a4a6dbb054f01918e11f3811c6039a03d2e7deb78bc8637a9624a4e65e5"
    );
    assert_eq!(signed_withdrawal.signature.v, 28);
    assert_eq!(
        signed_withdrawal.signature.r,
        "0x49bd612279f9f00fb45d5dd7c255fc349cc99083ced16e8936323c9e58b9bff6"
    );
    assert_eq!(
        signed_withdrawal.signature.s,
        "0x3576880271978935500add8534f3b28c7cd7bc0285574395b3d7304e74822ce9"
    );
}
