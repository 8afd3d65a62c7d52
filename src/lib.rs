#![deny(missing_docs)]

//! Two interactive Schnorr-family signature protocols over a prime-order
//! group: an N-of-N multi-signature ([`multisig`]) whose joint key is the
//! unweighted sum of the participants' public keys, and a partially-blind
//! signature ([`blind`]) in which the signer learns only an agreed-upon
//! `info` string and never the signed message.
//!
//! [`group`] fixes the concrete group (Ed25519's prime-order subgroup,
//! via the Ristretto encoding) and hash function (`reduce(SHA3-256(·))`)
//! both protocols are built over, and [`signature`]/[`keys`] implement
//! plain, non-interactive Schnorr signing on top of it. [`persistence`]
//! handles key/config file formats.

pub mod blind;
pub mod error;
pub mod group;
pub mod keys;
pub mod multisig;
pub mod persistence;
pub mod signature;

pub use error::Error;
pub use group::{DefaultSuite, Point, Scalar, Suite};
pub use keys::{SchnorrKeypair, SchnorrPublicKey};
pub use signature::SchnorrSignature;
