// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

use thiserror::Error;

/// The crate-wide error type.
///
/// Verification failure is represented as a plain `bool`, not as a variant
/// here: an invalid signature is an expected outcome of `verify`, not an
/// exceptional one.
#[derive(Debug, Error)]
pub enum Error {
    /// A network or filesystem I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scalar, point, or composite wire message was malformed.
    #[error("malformed encoding: {0}")]
    Decode(&'static str),

    /// The system RNG failed to produce randomness.
    #[error("RNG failure: {0}")]
    Rng(String),

    /// A session violated the expected frame sequence, timed out, or
    /// received a reply count other than the number of participants.
    #[error("protocol error: {0}")]
    Protocol(&'static str),

    /// A blind signature failed the user-side consistency check after
    /// unblinding.
    #[error("blinding consistency check failed")]
    BlindingCheckFailed,

    /// A group configuration or key file did not parse.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
