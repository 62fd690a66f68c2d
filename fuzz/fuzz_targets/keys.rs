#![no_main]
// Checks decoding of keys from slices of arbitrary length.
use libfuzzer_sys::fuzz_target;
use x25519::{Error, KEY_SIZE, PublicKey, Secret};

fuzz_target!(|data: &[u8]| {
    let expected = Error::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: data.len(),
    };

    match PublicKey::from_bytes(data) {
        Ok(public) => assert_eq!(&public.to_bytes()[..], data),
        Err(err) => assert_eq!(err, expected),
    }

    match Secret::from_bytes(data) {
        Ok(secret) => {
            assert_eq!(&secret.to_bytes()[..], data);
            let _ = secret.public_key();
        }
        Err(err) => assert_eq!(err, expected),
    }
});
