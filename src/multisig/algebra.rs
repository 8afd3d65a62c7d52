// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Pure algebra for the Schnorr multi-signature scheme: joint-key
//! aggregation, per-signer commitments, aggregate commitment, the
//! collective challenge, per-signer responses, and signature assembly.
//!
//! None of this module talks to the network; [`crate::multisig::client`]
//! and [`crate::multisig::signer`] drive these functions across a session.

use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::group::{Point, Scalar, Suite};
use crate::keys::{SchnorrKeypair, SchnorrPublicKey};
use crate::signature::SchnorrSignature;

/// A signer's private per-session commitment: `v` and `T = v*G`.
///
/// MUST be used for at most one session and discarded immediately after the
/// response is computed; `v` is zeroized on drop.
pub struct PrivateCommitment {
    v: Scalar,
    t: Point,
}

impl Drop for PrivateCommitment {
    fn drop(&mut self) {
        self.v.zeroize();
    }
}

/// The public half of a [`PrivateCommitment`], safe to send to the client.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PublicCommitment {
    #[serde(rename = "T")]
    pub(crate) t: Point,
}

impl PrivateCommitment {
    /// Samples a fresh `v` and computes `T = v*G`.
    pub fn generate<S: Suite, R: RngCore + CryptoRng>(suite: &S, rng: &mut R) -> Self {
        let v = suite.random_scalar(rng);
        let t = v * suite.basepoint();
        PrivateCommitment { v, t }
    }

    /// The public commitment to release to the client.
    pub fn public(&self) -> PublicCommitment {
        PublicCommitment { t: self.t }
    }

    /// Computes this signer's response `r = v - c*x` to the collective
    /// challenge `c`, consuming the commitment (its secret `v` is used
    /// exactly once).
    pub fn respond(self, challenge: Scalar, keypair: &SchnorrKeypair) -> Response {
        Response {
            r: self.v - challenge * keypair.secret(),
        }
    }
}

/// The sum of all signers' commitment points, `P = sum(T_i)`.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct AggregateCommitment {
    #[serde(rename = "P")]
    pub(crate) p: Point,
}

/// A single signer's response `r_i` to the collective challenge.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "R")]
    pub(crate) r: Scalar,
}

impl Response {
    /// Encodes this response as a bare scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.r.to_bytes()
    }

    /// Decodes a response previously produced by [`Response::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::error::Error> {
        Ok(Response {
            r: Scalar::from_bytes(bytes)?,
        })
    }
}

impl PublicCommitment {
    /// Encodes this commitment as a bare point.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.t.to_bytes()
    }

    /// Decodes a commitment previously produced by
    /// [`PublicCommitment::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::error::Error> {
        Ok(PublicCommitment {
            t: Point::from_bytes(bytes)?,
        })
    }
}

impl AggregateCommitment {
    /// Encodes this aggregate commitment as a bare point.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.p.to_bytes()
    }

    /// Decodes an aggregate commitment previously produced by
    /// [`AggregateCommitment::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::error::Error> {
        Ok(AggregateCommitment {
            p: Point::from_bytes(bytes)?,
        })
    }
}

/// Sums individual public keys into the joint key under which the final
/// signature verifies. Addition of points is commutative, so the order of
/// `pubkeys` does not affect the result.
pub fn joint_public_key(pubkeys: &[SchnorrPublicKey]) -> SchnorrPublicKey {
    pubkeys
        .iter()
        .copied()
        .reduce(|a, b| a + b)
        .expect("joint key requires at least one member")
}

/// Sums per-signer public commitments into the aggregate commitment `P`.
pub fn aggregate_commitment(commitments: &[PublicCommitment]) -> AggregateCommitment {
    let p = commitments
        .iter()
        .map(|c| c.t)
        .reduce(|a, b| a + b)
        .expect("aggregate commitment requires at least one commitment");
    AggregateCommitment { p }
}

/// Computes the collective challenge `c = H(msg || enc(P))`.
pub fn collective_challenge<S: Suite>(
    suite: &S,
    msg: &[u8],
    aggregate: &AggregateCommitment,
) -> Scalar {
    let mut preimage = Vec::with_capacity(msg.len() + 32);
    preimage.extend_from_slice(msg);
    preimage.extend_from_slice(&aggregate.to_bytes());
    suite.hash_to_scalar(&preimage)
}

/// Sums per-signer responses and pairs the sum with the collective
/// challenge to produce the final signature `(r, c)`.
pub fn assemble_signature(challenge: Scalar, responses: &[Response]) -> SchnorrSignature {
    let r = responses
        .iter()
        .map(|resp| resp.r)
        .reduce(|a, b| a + b)
        .expect("signature assembly requires at least one response");
    SchnorrSignature { s: r, e: challenge }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::DefaultSuite;
    use crate::signature::verify;

    fn fresh_signer(suite: &DefaultSuite, rng: &mut impl RngCore) -> (SchnorrKeypair, PrivateCommitment) {
        let kp = SchnorrKeypair::generate(suite, rng);
        let commitment = PrivateCommitment::generate(suite, rng);
        (kp, commitment)
    }

    #[test]
    fn n_of_n_multisig_verifies() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let msg = b"joint transaction";

        let mut keypairs = Vec::new();
        let mut commitments = Vec::new();
        for _ in 0..5 {
            let (kp, c) = fresh_signer(&suite, &mut rng);
            keypairs.push(kp);
            commitments.push(c);
        }

        let joint_key = joint_public_key(
            &keypairs.iter().map(|kp| kp.public()).collect::<Vec<_>>(),
        );
        let public_commitments: Vec<_> = commitments.iter().map(|c| c.public()).collect();
        let aggregate = aggregate_commitment(&public_commitments);
        let challenge = collective_challenge(&suite, msg, &aggregate);

        let responses: Vec<_> = keypairs
            .iter()
            .zip(commitments)
            .map(|(kp, c)| c.respond(challenge, kp))
            .collect();

        let sig = assemble_signature(challenge, &responses);
        assert!(verify(&suite, &joint_key, msg, &sig));
    }

    #[test]
    fn tampered_response_fails_verification() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let msg = b"joint transaction";

        let (kp1, c1) = fresh_signer(&suite, &mut rng);
        let (kp2, c2) = fresh_signer(&suite, &mut rng);

        let joint_key = joint_public_key(&[kp1.public(), kp2.public()]);
        let aggregate = aggregate_commitment(&[c1.public(), c2.public()]);
        let challenge = collective_challenge(&suite, msg, &aggregate);

        let r1 = c1.respond(challenge, &kp1);
        let mut r2 = c2.respond(challenge, &kp2);
        // tamper: bump the second response by one generator-worth of scalar.
        r2.r = r2.r + Scalar::from_bytes(&suite.random_scalar(&mut rng).to_bytes()).unwrap();

        let sig = assemble_signature(challenge, &[r1, r2]);
        assert!(!verify(&suite, &joint_key, msg, &sig));
    }

    #[test]
    fn member_order_does_not_affect_joint_key() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let a = SchnorrKeypair::generate(&suite, &mut rng).public();
        let b = SchnorrKeypair::generate(&suite, &mut rng).public();
        let c = SchnorrKeypair::generate(&suite, &mut rng).public();

        let forward = joint_public_key(&[a, b, c]);
        let reversed = joint_public_key(&[c, b, a]);
        assert_eq!(forward, reversed);
    }
}
