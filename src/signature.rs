// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Standard (non-interactive) Schnorr signing and verification.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::group::{Scalar, Suite};
use crate::keys::{SchnorrKeypair, SchnorrPublicKey};

/// A Schnorr signature `(s, e)`.
///
/// Wire form is `enc(s) || enc(e)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrSignature {
    #[serde(rename = "S")]
    pub(crate) s: Scalar,
    #[serde(rename = "E")]
    pub(crate) e: Scalar,
}

impl SchnorrSignature {
    /// Encodes this signature as `enc(s) || enc(e)`.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.s.to_bytes());
        out[32..].copy_from_slice(&self.e.to_bytes());
        out
    }

    /// Decodes a signature previously produced by
    /// [`SchnorrSignature::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::Decode("signature must be 64 bytes"));
        }
        Ok(SchnorrSignature {
            s: Scalar::from_bytes(&bytes[..32])?,
            e: Scalar::from_bytes(&bytes[32..])?,
        })
    }
}

/// Signs `msg` with the secret key in `keypair`.
///
/// Samples a fresh nonce `k`, computes `R = k*G`, `e = H(msg || enc(R))`,
/// `s = k - x*e`.
pub fn sign<S: Suite, R: RngCore + CryptoRng>(
    suite: &S,
    keypair: &SchnorrKeypair,
    rng: &mut R,
    msg: &[u8],
) -> SchnorrSignature {
    let k = suite.random_scalar(rng);
    let r = k * suite.basepoint();

    let mut preimage = Vec::with_capacity(msg.len() + 32);
    preimage.extend_from_slice(msg);
    preimage.extend_from_slice(&r.to_bytes());
    let e = suite.hash_to_scalar(&preimage);

    let s = k - keypair.secret() * e;
    SchnorrSignature { s, e }
}

/// Verifies `sig` against `pubkey` and `msg`.
///
/// Recomputes `R' = s*G + e*Y` and checks `e == H(msg || enc(R'))`.
pub fn verify<S: Suite>(
    suite: &S,
    pubkey: &SchnorrPublicKey,
    msg: &[u8],
    sig: &SchnorrSignature,
) -> bool {
    let r_prime = sig.s * suite.basepoint() + sig.e * pubkey.point();

    let mut preimage = Vec::with_capacity(msg.len() + 32);
    preimage.extend_from_slice(msg);
    preimage.extend_from_slice(&r_prime.to_bytes());
    let expected_e = suite.hash_to_scalar(&preimage);

    expected_e == sig.e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::DefaultSuite;

    #[test]
    fn sign_then_verify_succeeds() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let kp = SchnorrKeypair::generate(&suite, &mut rng);
        let msg = b"transfer 10 coins to alice";

        let sig = sign(&suite, &kp, &mut rng, msg);
        assert!(verify(&suite, &kp.public(), msg, &sig));
    }

    #[test]
    fn verify_rejects_wrong_message() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let kp = SchnorrKeypair::generate(&suite, &mut rng);

        let sig = sign(&suite, &kp, &mut rng, b"original message");
        assert!(!verify(&suite, &kp.public(), b"tampered message", &sig));
    }

    #[test]
    fn signature_encoding_round_trips() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let kp = SchnorrKeypair::generate(&suite, &mut rng);
        let sig = sign(&suite, &kp, &mut rng, b"msg");

        let decoded = SchnorrSignature::from_bytes(&sig.to_bytes()).unwrap();
        assert_eq!(sig, decoded);
    }
}
