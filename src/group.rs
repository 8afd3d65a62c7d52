// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The prime-order group the protocols in this crate are defined over.
//!
//! Everything above this module is generic over nothing: there is exactly
//! one [`Suite`] in the crate, [`DefaultSuite`], which instantiates the
//! group as Ed25519's prime-order subgroup via the Ristretto encoding (so
//! every encoded [`Point`] is a genuine prime-order element, with no
//! cofactor to reason about) and the hash-to-scalar function as
//! `reduce(SHA3-256(·))`.
//!
//! A `Suite` is a value, constructed once by the caller and passed by
//! reference into every protocol operation. There is no ambient global
//! suite: two processes (or two tests in the same process) can each hold
//! their own `DefaultSuite` without interfering with one another.

use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use rand_core::{CryptoRng, RngCore};
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use zeroize::DefaultIsZeroes;

use crate::error::Error;

/// Byte length of the canonical encoding of a [`Scalar`] or a [`Point`].
pub const ENCODED_LEN: usize = 32;

/// An element of Z_q, the scalar field of the group.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Scalar(pub(crate) DalekScalar);

// `curve25519_dalek::scalar::Scalar` has no `Default` impl of its own (there
// is no privileged "zero" representation at that layer), so this is written
// out rather than derived.
impl Default for Scalar {
    fn default() -> Self {
        Scalar(DalekScalar::zero())
    }
}

impl DefaultIsZeroes for Scalar {}

impl Scalar {
    /// Encodes this scalar as its canonical little-endian byte string.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        self.0.to_bytes()
    }

    /// Decodes a canonical scalar encoding, rejecting non-canonical input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != ENCODED_LEN {
            return Err(Error::Decode("scalar must be 32 bytes"));
        }
        let mut buf = [0u8; ENCODED_LEN];
        buf.copy_from_slice(bytes);
        let scalar = DalekScalar::from_canonical_bytes(buf)
            .ok_or(Error::Decode("non-canonical scalar encoding"))?;
        Ok(Scalar(scalar))
    }
}

impl std::ops::Add for Scalar {
    type Output = Scalar;
    fn add(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Scalar {
    type Output = Scalar;
    fn sub(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Scalar {
    type Output = Scalar;
    fn mul(self, rhs: Scalar) -> Scalar {
        Scalar(self.0 * rhs.0)
    }
}

impl std::iter::Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Scalar {
        iter.fold(Scalar(DalekScalar::zero()), |acc, x| acc + x)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let bytes = de.deserialize_bytes(ThirtyTwoBytesVisitor)?;
        Scalar::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// An element of the prime-order group G.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Point(pub(crate) RistrettoPoint);

impl Point {
    /// Encodes this point as its canonical compressed byte string.
    pub fn to_bytes(&self) -> [u8; ENCODED_LEN] {
        self.0.compress().to_bytes()
    }

    /// Decodes a compressed point encoding, rejecting invalid encodings.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != ENCODED_LEN {
            return Err(Error::Decode("point must be 32 bytes"));
        }
        let mut buf = [0u8; ENCODED_LEN];
        buf.copy_from_slice(bytes);
        CompressedRistretto(buf)
            .decompress()
            .map(Point)
            .ok_or(Error::Decode("invalid point encoding"))
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point(self.0 + rhs.0)
    }
}

impl std::iter::Sum for Point {
    fn sum<I: Iterator<Item = Point>>(mut iter: I) -> Point {
        let first = iter.next().expect("sum of an empty point sequence");
        iter.fold(first, |acc, x| acc + x)
    }
}

impl std::ops::Mul<Point> for Scalar {
    type Output = Point;
    fn mul(self, rhs: Point) -> Point {
        Point(self.0 * rhs.0)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_bytes(&self.to_bytes())
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let bytes = de.deserialize_bytes(ThirtyTwoBytesVisitor)?;
        Point::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

struct ThirtyTwoBytesVisitor;

impl<'de> Visitor<'de> for ThirtyTwoBytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a bytestring of length {}", ENCODED_LEN)
    }

    fn visit_bytes<E: serde::de::Error>(self, b: &[u8]) -> Result<Self::Value, E> {
        Ok(b.to_vec())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut buf = Vec::with_capacity(ENCODED_LEN);
        while let Some(byte) = seq.next_element()? {
            buf.push(byte);
        }
        Ok(buf)
    }
}

/// The concrete group/hash instantiation a set of protocol operations runs
/// against, held as an explicit value rather than a global default.
pub trait Suite {
    /// The fixed generator of the group.
    fn basepoint(&self) -> Point;

    /// Samples a uniformly random scalar using the supplied CSPRNG.
    fn random_scalar<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Scalar {
        Scalar(DalekScalar::random(rng))
    }

    /// The domain hash H: bytes -> Z_q used throughout the protocols.
    fn hash_to_scalar(&self, bytes: &[u8]) -> Scalar {
        let digest = Sha3_256::digest(bytes);
        Scalar(DalekScalar::from_bytes_mod_order(digest.into()))
    }
}

/// Ed25519's prime-order subgroup (via Ristretto) with `reduce(SHA3-256(·))`
/// as the domain hash. The only [`Suite`] this crate ships, but kept as a
/// trait so callers own their suite value rather than reaching for a global.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultSuite;

impl Suite for DefaultSuite {
    fn basepoint(&self) -> Point {
        Point(RISTRETTO_BASEPOINT_POINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_encoding_round_trips() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let s = suite.random_scalar(&mut rng);
        let decoded = Scalar::from_bytes(&s.to_bytes()).unwrap();
        assert_eq!(s, decoded);
    }

    #[test]
    fn point_encoding_round_trips() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let s = suite.random_scalar(&mut rng);
        let p = s * suite.basepoint();
        let decoded = Point::from_bytes(&p.to_bytes()).unwrap();
        assert_eq!(p, decoded);
    }

    #[test]
    fn point_decode_rejects_non_canonical_encoding() {
        // All-0xff is not a valid compressed Ristretto encoding.
        let bytes = [0xffu8; ENCODED_LEN];
        assert!(Point::from_bytes(&bytes).is_err());
    }

    #[test]
    fn hash_to_scalar_is_deterministic() {
        let suite = DefaultSuite;
        let a = suite.hash_to_scalar(b"hello");
        let b = suite.hash_to_scalar(b"hello");
        assert_eq!(a, b);
        let c = suite.hash_to_scalar(b"hellp");
        assert_ne!(a, c);
    }
}
