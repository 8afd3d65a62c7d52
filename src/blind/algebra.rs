// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Pure algebra for the partially-blind Schnorr-style signature scheme.
//!
//! The signer learns only the public `info` string, never the message it
//! signs; the user learns a valid signature but the signer cannot later
//! recognize it in a transcript of the exchange.
//!
//! Known limitation, carried over unchanged from the construction this
//! protocol was distilled from: `Z` is derived as `z*G` where `z =
//! H(info)`, a scalar the signer can also compute. A construction using a
//! point with no known discrete log would be preferable, but this crate
//! preserves the original algebra for interoperability and documents the
//! gap rather than silently "fixing" it into a different protocol.

use rand_core::{CryptoRng, RngCore};

use crate::error::Error;
use crate::group::{Point, Scalar, Suite};
use crate::keys::{SchnorrKeypair, SchnorrPublicKey};

/// Derives the info-bound point `Z = H(info)*G`.
pub fn derive_z<S: Suite>(suite: &S, info: &[u8]) -> Point {
    let z_scalar = suite.hash_to_scalar(info);
    z_scalar * suite.basepoint()
}

/// The signer's private per-session parameters.
pub struct SignerPrivateParams {
    u: Scalar,
    s: Scalar,
    d: Scalar,
    z: Point,
}

/// The signer's public per-session parameters, sent to the user first.
#[derive(Copy, Clone, Debug)]
pub struct SignerPublicParams {
    /// `A = u*G`.
    pub a: Point,
    /// `B = s*G + d*Z`.
    pub b: Point,
}

impl SignerPublicParams {
    /// Encodes as `enc(A) || enc(B)`.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.a.to_bytes());
        out[32..].copy_from_slice(&self.b.to_bytes());
        out
    }

    /// Decodes public params previously produced by
    /// [`SignerPublicParams::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 64 {
            return Err(Error::Decode("signer public params must be 64 bytes"));
        }
        Ok(SignerPublicParams {
            a: Point::from_bytes(&bytes[..32])?,
            b: Point::from_bytes(&bytes[32..])?,
        })
    }
}

impl SignerPrivateParams {
    /// Samples `u, s, d` and computes `A = u*G`, `B = s*G + d*Z` for the
    /// shared `info`.
    pub fn generate<S: Suite, R: RngCore + CryptoRng>(suite: &S, rng: &mut R, info: &[u8]) -> Self {
        let z = derive_z(suite, info);
        let u = suite.random_scalar(rng);
        let s = suite.random_scalar(rng);
        let d = suite.random_scalar(rng);
        SignerPrivateParams { u, s, d, z }
    }

    /// The public parameters to release to the user.
    pub fn public<S: Suite>(&self, suite: &S) -> SignerPublicParams {
        SignerPublicParams {
            a: self.u * suite.basepoint(),
            b: self.s * suite.basepoint() + self.d * self.z,
        }
    }

    /// Computes the signer's response `(r, c, s, d)` to challenge `e`,
    /// given the signer's long-term secret `x`.
    pub fn respond(self, e: Scalar, keypair: &SchnorrKeypair) -> SignerResponse {
        let c = e - self.d;
        let r = self.u - c * keypair.secret();
        SignerResponse {
            r,
            c,
            s: self.s,
            d: self.d,
        }
    }
}

/// The signer's response to the user's challenge.
#[derive(Copy, Clone, Debug)]
pub struct SignerResponse {
    /// `r = u - c*x`.
    pub r: Scalar,
    /// `c = e - d`, the de-blinded challenge the signer actually signed.
    pub c: Scalar,
    /// The signer's private `s` from [`SignerPublicParams`], carried through unblinded.
    pub s: Scalar,
    /// The signer's private `d` from [`SignerPublicParams`], carried through unblinded.
    pub d: Scalar,
}

impl SignerResponse {
    /// Encodes as `enc(r) || enc(c) || enc(s) || enc(d)`.
    pub fn to_bytes(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..64].copy_from_slice(&self.c.to_bytes());
        out[64..96].copy_from_slice(&self.s.to_bytes());
        out[96..].copy_from_slice(&self.d.to_bytes());
        out
    }

    /// Decodes a response previously produced by
    /// [`SignerResponse::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 128 {
            return Err(Error::Decode("signer response must be 128 bytes"));
        }
        Ok(SignerResponse {
            r: Scalar::from_bytes(&bytes[..32])?,
            c: Scalar::from_bytes(&bytes[32..64])?,
            s: Scalar::from_bytes(&bytes[64..96])?,
            d: Scalar::from_bytes(&bytes[96..])?,
        })
    }
}

/// The user's private per-session blinding factors.
pub struct UserPrivateParams {
    t1: Scalar,
    t2: Scalar,
    t3: Scalar,
    t4: Scalar,
    z: Point,
}

/// The challenge the user sends to the signer.
#[derive(Copy, Clone, Debug)]
pub struct Challenge(pub Scalar);

impl Challenge {
    /// Encodes this challenge as a bare scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Decodes a challenge previously produced by [`Challenge::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Challenge(Scalar::from_bytes(bytes)?))
    }
}

impl UserPrivateParams {
    /// Blinds the signer's public parameters for `(info, msg)`: samples
    /// `t1..t4`, computes `alpha`, `beta`, and the challenge `e = H(enc
    /// (alpha) || enc(beta) || enc(Z) || msg) - t2 - t4`.
    pub fn generate<S: Suite, R: RngCore + CryptoRng>(
        suite: &S,
        rng: &mut R,
        signer_params: &SignerPublicParams,
        signer_pubkey: &SchnorrPublicKey,
        info: &[u8],
        msg: &[u8],
    ) -> (Self, Challenge) {
        let z = derive_z(suite, info);
        let t1 = suite.random_scalar(rng);
        let t2 = suite.random_scalar(rng);
        let t3 = suite.random_scalar(rng);
        let t4 = suite.random_scalar(rng);

        let alpha = signer_params.a + t1 * suite.basepoint() + t2 * signer_pubkey.point();
        let beta = signer_params.b + t3 * suite.basepoint() + t4 * z;

        let epsilon = hash_challenge(suite, &alpha, &beta, &z, msg);
        let e = epsilon - t2 - t4;

        (
            UserPrivateParams { t1, t2, t3, t4, z },
            Challenge(e),
        )
    }

    /// Unblinds the signer's response into the final signature
    /// `(rho, omega, sigma, delta)` and runs the local consistency check.
    /// Returns [`Error::BlindingCheckFailed`] if the check does not hold.
    pub fn unblind<S: Suite>(
        &self,
        suite: &S,
        response: &SignerResponse,
        signer_pubkey: &SchnorrPublicKey,
        msg: &[u8],
    ) -> Result<BlindSignature, Error> {
        let rho = response.r + self.t1;
        let omega = response.c + self.t2;
        let sigma = response.s + self.t3;
        let delta = response.d + self.t4;

        let sig = BlindSignature {
            rho,
            omega,
            sigma,
            delta,
        };

        let lhs = rho * suite.basepoint() + omega * signer_pubkey.point();
        let rhs = sigma * suite.basepoint() + delta * self.z;
        let h = hash_challenge(suite, &lhs, &rhs, &self.z, msg);

        if h == omega + delta {
            Ok(sig)
        } else {
            Err(Error::BlindingCheckFailed)
        }
    }
}

/// The final, unblinded signature.
#[derive(Copy, Clone, Debug)]
pub struct BlindSignature {
    pub rho: Scalar,
    pub omega: Scalar,
    pub sigma: Scalar,
    pub delta: Scalar,
}

impl BlindSignature {
    /// Encodes as `enc(rho) || enc(omega) || enc(sigma) || enc(delta)`.
    pub fn to_bytes(&self) -> [u8; 128] {
        let mut out = [0u8; 128];
        out[..32].copy_from_slice(&self.rho.to_bytes());
        out[32..64].copy_from_slice(&self.omega.to_bytes());
        out[64..96].copy_from_slice(&self.sigma.to_bytes());
        out[96..].copy_from_slice(&self.delta.to_bytes());
        out
    }

    /// Decodes a signature previously produced by
    /// [`BlindSignature::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != 128 {
            return Err(Error::Decode("blind signature must be 128 bytes"));
        }
        Ok(BlindSignature {
            rho: Scalar::from_bytes(&bytes[..32])?,
            omega: Scalar::from_bytes(&bytes[32..64])?,
            sigma: Scalar::from_bytes(&bytes[64..96])?,
            delta: Scalar::from_bytes(&bytes[96..])?,
        })
    }
}

/// Verifies a [`BlindSignature`] against the signer's long-term public key,
/// the shared `info`, and the message.
pub fn verify<S: Suite>(
    suite: &S,
    signer_pubkey: &SchnorrPublicKey,
    sig: &BlindSignature,
    info: &[u8],
    msg: &[u8],
) -> bool {
    let z = derive_z(suite, info);
    let lhs = sig.rho * suite.basepoint() + sig.omega * signer_pubkey.point();
    let rhs = sig.sigma * suite.basepoint() + sig.delta * z;
    let h = hash_challenge(suite, &lhs, &rhs, &z, msg);
    h == sig.omega + sig.delta
}

fn hash_challenge<S: Suite>(suite: &S, p: &Point, q: &Point, z: &Point, msg: &[u8]) -> Scalar {
    let mut preimage = Vec::with_capacity(96 + msg.len());
    preimage.extend_from_slice(&p.to_bytes());
    preimage.extend_from_slice(&q.to_bytes());
    preimage.extend_from_slice(&z.to_bytes());
    preimage.extend_from_slice(msg);
    suite.hash_to_scalar(&preimage)
}
