#![no_main]
// Checks the algebraic properties of the exchange on arbitrary keys.
use libfuzzer_sys::fuzz_target;
use x25519::{MontgomeryPoint, PublicKey, Secret, clamp_integer, x25519};

fuzz_target!(|data: [[u8; 32]; 3]| {
    let [a, b, u] = data;

    // Symmetry of the exchange
    let alice = Secret::from(a);
    let bob = Secret::from(b);
    let ab = alice.diffie_hellman(&bob.public_key());
    let ba = bob.diffie_hellman(&alice.public_key());
    assert_eq!(ab.as_bytes(), ba.as_bytes());

    // Clamping happens on use
    assert_eq!(x25519(a, u), x25519(clamp_integer(a), u));

    // Bit 255 of the peer key is ignored
    let mut high = u;
    high[31] ^= 0x80;
    assert_eq!(x25519(a, u), x25519(a, high));

    // Low order keys, and only those, give the all-zero output
    let peer = PublicKey::from(u);
    let shared = alice.diffie_hellman(&peer);
    if peer.is_low_order() {
        assert!(!shared.was_contributory());
    }
    if !shared.was_contributory() {
        assert!(MontgomeryPoint(u).is_low_order());
    }
});
