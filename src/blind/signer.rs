// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The signer side of a blind-sig session: generate params, send them,
//! read the user's challenge, respond, close.

use rand_core::{CryptoRng, RngCore};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, instrument};

use crate::blind::algebra::{Challenge, SignerPrivateParams};
use crate::blind::wire;
use crate::error::Error;
use crate::group::Suite;
use crate::keys::SchnorrKeypair;

/// Serves one blind-signing session on an already-accepted connection.
#[instrument(skip(suite, keypair, rng, stream, info_bytes), fields(signer = "blindsig"))]
pub async fn serve_session<S, R, Conn>(
    suite: &S,
    keypair: &SchnorrKeypair,
    rng: &mut R,
    info_bytes: &[u8],
    mut stream: Conn,
) -> Result<(), Error>
where
    S: Suite,
    R: RngCore + CryptoRng,
    Conn: AsyncRead + AsyncWrite + Unpin,
{
    let private_params = SignerPrivateParams::generate(suite, rng, info_bytes);
    let public_params = private_params.public(suite);
    wire::write_exact(&mut stream, &public_params.to_bytes()).await?;
    info!("sent signer public params");

    let challenge_bytes = wire::read_exact(&mut stream, 32).await?;
    let challenge = Challenge::from_bytes(&challenge_bytes)?;

    let response = private_params.respond(challenge.0, keypair);
    wire::write_exact(&mut stream, &response.to_bytes()).await?;

    info!("session complete");
    Ok(())
}
