//! `serde` support for public keys.

#![cfg(feature = "serde")]

use hex_literal::hex;
use x25519::PublicKey;

const BOB_PUBLIC: [u8; 32] =
    hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");

#[test]
fn public_key_to_json() {
    let public = PublicKey::from(BOB_PUBLIC);
    let json = serde_json::to_string(&public).unwrap();
    assert_eq!(
        json,
        "\"de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f\""
    );

    let decoded: PublicKey = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, public);
}

#[test]
fn wrong_length_json_rejected() {
    let short = "\"de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b\"";
    assert!(serde_json::from_str::<PublicKey>(short).is_err());

    let long = "\"de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f00\"";
    assert!(serde_json::from_str::<PublicKey>(long).is_err());

    let empty = "\"\"";
    assert!(serde_json::from_str::<PublicKey>(empty).is_err());
}
