//! X25519 key types and the Diffie-Hellman exchange.

use crate::montgomery::MontgomeryPoint;
use crate::scalar::clamp_integer;
use crate::{Error, Result};
use core::fmt;
use rand_core::{CryptoRng, TryCryptoRng};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

#[cfg(feature = "os_rng")]
use rand_core::OsRng;

/// Length in bytes of every X25519 key and shared secret.
pub const KEY_SIZE: usize = 32;

/// A PublicKey is the u-coordinate of a point on Curve25519.
///
/// Derived from a [`Secret`] by multiplying the base point, or decoded from
/// 32 bytes received from a peer. Every 32-byte string is accepted.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct PublicKey(MontgomeryPoint);

/// An X25519 secret key: 32 bytes interpreted as a scalar after clamping.
///
/// The bytes are kept exactly as supplied; clamping is applied on every scalar
/// multiplication, so keys imported from arbitrary 32-byte strings behave the
/// same as generated ones. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; KEY_SIZE]);

/// A SharedSecret is the raw u-coordinate output of X25519.
///
/// This is not uniformly random and must go through a key derivation function
/// before being used as key material. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(MontgomeryPoint);

impl Secret {
    /// Generate a new `Secret` from an infallible cryptographic RNG.
    pub fn new<R>(csprng: &mut R) -> Self
    where
        R: CryptoRng + ?Sized,
    {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        csprng.fill_bytes(&mut bytes[..]);
        Secret(clamp_integer(*bytes))
    }

    /// Generate a new `Secret` from a fallible cryptographic RNG.
    ///
    /// Returns [`Error::Entropy`] if the RNG reports a failure.
    pub fn try_from_rng<R>(csprng: &mut R) -> Result<Self>
    where
        R: TryCryptoRng + ?Sized,
    {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        csprng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|_| Error::Entropy)?;
        Ok(Secret(clamp_integer(*bytes)))
    }

    /// Generate a new `Secret` using the operating system's entropy source.
    ///
    /// Returns [`Error::Entropy`] if the entropy source is unavailable.
    #[cfg(feature = "os_rng")]
    pub fn generate() -> Result<Self> {
        Self::try_from_rng(&mut OsRng)
    }

    /// Decode a `Secret` from a byte slice.
    ///
    /// Returns [`Error::InvalidKeyLength`] unless the slice is 32 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Secret(to_array(bytes)?))
    }

    /// The secret key bytes, as stored (before clamping).
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Copy out the secret key bytes, as stored (before clamping).
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0
    }

    /// Derive the public key for this secret.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self)
    }

    /// Perform a Diffie-Hellman key exchange with a peer's public key.
    ///
    /// Never fails. A low order `public_key` yields an all-zero secret; use
    /// [`SharedSecret::was_contributory`] where the protocol must reject that.
    pub fn diffie_hellman(&self, public_key: &PublicKey) -> SharedSecret {
        SharedSecret(public_key.0.mul_clamped(&self.0))
    }
}

impl From<[u8; KEY_SIZE]> for Secret {
    fn from(bytes: [u8; KEY_SIZE]) -> Secret {
        Secret(bytes)
    }
}

impl TryFrom<&[u8]> for Secret {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").finish_non_exhaustive()
    }
}

impl PublicKey {
    /// Decode a `PublicKey` from a byte slice.
    ///
    /// Returns [`Error::InvalidKeyLength`] unless the slice is 32 bytes long.
    /// No other check is made: bit 255 is ignored when the key is used, and
    /// low order points are accepted.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(PublicKey(MontgomeryPoint(to_array(bytes)?)))
    }

    /// The public key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Copy out the public key bytes.
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0.0
    }

    /// Returns true if this key is one of the known low order points, for which
    /// every exchange produces the all-zero shared secret.
    pub fn is_low_order(&self) -> bool {
        self.0.is_low_order()
    }
}

/// Given a Secret Key, compute the corresponding public key
/// using the generator specified in RFC7748
impl From<&Secret> for PublicKey {
    fn from(secret: &Secret) -> PublicKey {
        PublicKey(MontgomeryPoint::mul_base_clamped(&secret.0))
    }
}

impl From<[u8; KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; KEY_SIZE]) -> PublicKey {
        PublicKey(MontgomeryPoint(bytes))
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "serde")]
impl serdect::serde::Serialize for PublicKey {
    fn serialize<S>(&self, s: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serdect::serde::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(self.as_bytes(), s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serdect::serde::Deserialize<'de> for PublicKey {
    fn deserialize<D>(d: D) -> core::result::Result<Self, D::Error>
    where
        D: serdect::serde::Deserializer<'de>,
    {
        use serdect::serde::de::Error as _;

        let mut bytes = [0u8; KEY_SIZE];
        let len = serdect::array::deserialize_hex_or_bin(&mut bytes, d)?.len();
        if len != KEY_SIZE {
            return Err(D::Error::invalid_length(len, &"32 bytes"));
        }
        Ok(PublicKey::from(bytes))
    }
}

impl SharedSecret {
    /// The shared secret bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Copy out the shared secret bytes.
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0.0
    }

    /// Returns false if the exchange produced the all-zero output, i.e. the
    /// peer's key was of low order and contributed nothing.
    ///
    /// The check is constant-time.
    pub fn was_contributory(&self) -> bool {
        !bool::from(self.0.0.ct_eq(&[0u8; KEY_SIZE]))
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

fn to_array(bytes: &[u8]) -> Result<[u8; KEY_SIZE]> {
    <[u8; KEY_SIZE]>::try_from(bytes).map_err(|_| Error::InvalidKeyLength {
        expected: KEY_SIZE,
        actual: bytes.len(),
    })
}

/// The X25519 function of RFC 7748.
///
/// Clamps `scalar`, ignores bit 255 of `u`, and returns the u-coordinate of
/// the product. Low order inputs yield all zeros; nothing is rejected.
pub fn x25519(scalar: [u8; KEY_SIZE], u: [u8; KEY_SIZE]) -> [u8; KEY_SIZE] {
    let scalar = Zeroizing::new(scalar);
    MontgomeryPoint(u).mul_clamped(&scalar).0
}

/// The X25519 base point, u = 9.
pub const X25519_BASEPOINT_BYTES: [u8; KEY_SIZE] = MontgomeryPoint::GENERATOR.0;
