// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The user side of a blind-sig session: connect, receive the signer's
//! public params, blind a challenge, send it, receive the response,
//! unblind, and report the final signature.

use std::time::Duration;

use rand_core::{CryptoRng, RngCore};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{info, instrument};

use crate::blind::algebra::{BlindSignature, SignerPublicParams, SignerResponse, UserPrivateParams};
use crate::blind::wire;
use crate::error::Error;
use crate::group::Suite;
use crate::keys::SchnorrPublicKey;

/// Default session deadline for the blind-sig user protocol.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs the blind-sig user protocol against a signer listening at
/// `(host, port)`, returning the unblinded, verified-consistent signature
/// on `msg` under the shared `info`.
#[instrument(skip(suite, rng, signer_pubkey, info_bytes, msg), fields(host, port))]
pub async fn run_user_protocol<S: Suite, R: RngCore + CryptoRng>(
    suite: &S,
    rng: &mut R,
    host: &str,
    port: u16,
    signer_pubkey: &SchnorrPublicKey,
    info_bytes: &[u8],
    msg: &[u8],
) -> Result<BlindSignature, Error> {
    timeout(
        DEFAULT_SESSION_TIMEOUT,
        run_user_protocol_inner(suite, rng, host, port, signer_pubkey, info_bytes, msg),
    )
    .await
    .map_err(|_| Error::Protocol("session timed out"))?
}

async fn run_user_protocol_inner<S: Suite, R: RngCore + CryptoRng>(
    suite: &S,
    rng: &mut R,
    host: &str,
    port: u16,
    signer_pubkey: &SchnorrPublicKey,
    info_bytes: &[u8],
    msg: &[u8],
) -> Result<BlindSignature, Error> {
    let mut stream = TcpStream::connect((host, port)).await?;
    info!(host, port, "connected to blind signer");

    let params_bytes = wire::read_exact(&mut stream, 64).await?;
    let public_params = SignerPublicParams::from_bytes(&params_bytes)?;

    let (user_priv, challenge) =
        UserPrivateParams::generate(suite, rng, &public_params, signer_pubkey, info_bytes, msg);
    wire::write_exact(&mut stream, &challenge.to_bytes()).await?;

    let response_bytes = wire::read_exact(&mut stream, 128).await?;
    let response = SignerResponse::from_bytes(&response_bytes)?;

    user_priv.unblind(suite, &response, signer_pubkey, msg)
}
