// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The partially-blind Schnorr-style signature protocol.

pub mod algebra;
pub mod signer;
pub mod user;
pub mod wire;

pub use algebra::{derive_z, verify, BlindSignature};
pub use user::run_user_protocol;
