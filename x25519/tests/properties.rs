//! Property tests for the key exchange.

use proptest::{
    collection::vec, prelude::any, prop_assert, prop_assert_eq, prop_compose, proptest,
    strategy::Strategy,
};
use x25519::{Error, PublicKey, Secret, clamp_integer, x25519};

prop_compose! {
    fn secret()(bytes in any::<[u8; 32]>()) -> Secret {
        Secret::from(bytes)
    }
}

prop_compose! {
    fn wrong_length()(bytes in vec(any::<u8>(), 0..96usize)
        .prop_filter("exactly 32 bytes", |b| b.len() != 32)) -> Vec<u8> {
        bytes
    }
}

proptest! {
    #[test]
    fn exchange_is_symmetric(a in secret(), b in secret()) {
        let a_pub = a.public_key();
        let b_pub = b.public_key();
        let ab = a.diffie_hellman(&b_pub);
        let ba = b.diffie_hellman(&a_pub);
        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
    }

    #[test]
    fn derivation_is_deterministic(bytes in any::<[u8; 32]>()) {
        let first = Secret::from(bytes).public_key();
        let second = Secret::from(bytes).public_key();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn clamped_bits_do_not_matter(bytes in any::<[u8; 32]>(), flip in any::<u8>()) {
        let mut altered = bytes;
        // bits 0, 1, 2 of byte 0
        altered[0] ^= flip & 0b0000_0111;
        // bits 254 and 255
        altered[31] ^= flip & 0b1100_0000;

        prop_assert_eq!(
            Secret::from(bytes).public_key(),
            Secret::from(altered).public_key()
        );
        prop_assert_eq!(clamp_integer(bytes), clamp_integer(altered));
    }

    #[test]
    fn clamping_fixes_low_and_high_bits(bytes in any::<[u8; 32]>()) {
        let clamped = clamp_integer(bytes);
        prop_assert_eq!(clamped[0] & 0b111, 0);
        prop_assert_eq!(clamped[31] >> 6, 0b01);
        prop_assert_eq!(&clamped[1..31], &bytes[1..31]);
    }

    #[test]
    fn top_bit_of_peer_key_is_ignored(scalar in any::<[u8; 32]>(), u in any::<[u8; 32]>()) {
        let mut high = u;
        high[31] |= 0x80;
        let mut low = u;
        low[31] &= 0x7f;
        prop_assert_eq!(x25519(scalar, high), x25519(scalar, low));
    }

    #[test]
    fn wrong_lengths_are_rejected(bytes in wrong_length()) {
        let expected = Error::InvalidKeyLength { expected: 32, actual: bytes.len() };
        prop_assert_eq!(Secret::from_bytes(&bytes).err(), Some(expected));
        prop_assert_eq!(PublicKey::from_bytes(&bytes).err(), Some(expected));
    }

    #[test]
    fn any_32_bytes_are_accepted(bytes in any::<[u8; 32]>()) {
        prop_assert!(Secret::from_bytes(&bytes).is_ok());
        let public = PublicKey::from_bytes(&bytes);
        prop_assert!(public.is_ok());
        prop_assert_eq!(public.map(|p| p.to_bytes()).ok(), Some(bytes));
    }
}
