// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Single-signer Schnorr key material.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::Error;
use crate::group::{Point, Scalar, Suite};

/// A signing keypair: a secret scalar `x` and its public point `Y = x*G`.
///
/// `x` is zeroized on drop. The public half can be extracted at any time
/// via [`SchnorrKeypair::public`] without retaining a reference to the
/// secret.
#[derive(Clone, Serialize, Deserialize)]
pub struct SchnorrKeypair {
    x: Scalar,
    #[serde(rename = "Y")]
    y: Point,
}

impl Drop for SchnorrKeypair {
    fn drop(&mut self) {
        self.x.zeroize();
    }
}

impl SchnorrKeypair {
    /// Generates a fresh keypair: samples `x` uniformly and computes `Y = x*G`.
    pub fn generate<S: Suite, R: RngCore + CryptoRng>(suite: &S, rng: &mut R) -> Self {
        let x = suite.random_scalar(rng);
        let y = x * suite.basepoint();
        SchnorrKeypair { x, y }
    }

    /// The secret scalar `x`.
    pub(crate) fn secret(&self) -> Scalar {
        self.x
    }

    /// The public half of this keypair.
    pub fn public(&self) -> SchnorrPublicKey {
        SchnorrPublicKey { y: self.y }
    }

    /// Encodes this keypair as `enc(x) || enc(Y)`, matching the on-disk
    /// keypair file format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        out.extend_from_slice(&self.x.to_bytes());
        out.extend_from_slice(&self.y.to_bytes());
        out
    }

    /// Decodes a keypair previously produced by [`SchnorrKeypair::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::Decode("keypair must be 64 bytes"));
        }
        let x = Scalar::from_bytes(&bytes[..32])?;
        let y = Point::from_bytes(&bytes[32..])?;
        Ok(SchnorrKeypair { x, y })
    }
}

/// The public half of a [`SchnorrKeypair`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrPublicKey {
    #[serde(rename = "Y")]
    pub(crate) y: Point,
}

impl SchnorrPublicKey {
    /// The underlying group element.
    pub fn point(&self) -> Point {
        self.y
    }

    /// Encodes this public key as `enc(Y)`, matching the on-disk pubkey
    /// file format.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.y.to_bytes()
    }

    /// Decodes a public key previously produced by
    /// [`SchnorrPublicKey::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(SchnorrPublicKey {
            y: Point::from_bytes(bytes)?,
        })
    }
}

impl std::ops::Add for SchnorrPublicKey {
    type Output = SchnorrPublicKey;

    /// Aggregates two public keys by summing their points; the basis of the
    /// multi-sig joint key (see [`crate::multisig::algebra`]).
    fn add(self, rhs: SchnorrPublicKey) -> SchnorrPublicKey {
        SchnorrPublicKey {
            y: self.y + rhs.y,
        }
    }
}
