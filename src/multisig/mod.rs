// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The Schnorr multi-signature protocol: an N-of-N unweighted joint
//! signature under the sum of the participants' public keys.

pub mod algebra;
pub mod client;
pub mod config;
pub mod signer;
pub mod wire;

pub use algebra::{joint_public_key, AggregateCommitment, PrivateCommitment, PublicCommitment, Response};
pub use client::run_client_protocol;
pub use config::GroupConfig;
