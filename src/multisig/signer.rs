// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The signer side of a multi-sig session: a per-connection state machine
//! that goes INIT -> MESSAGE -> COMMITMENT -> done.
//!
//! A frame whose tag does not match the expected next state is ignored
//! (the connection stays where it was); an unexpected close or decode
//! failure aborts just this connection, never the signer process.

use rand_core::{CryptoRng, RngCore};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{info, instrument, warn};

use crate::error::Error;
use crate::group::Suite;
use crate::keys::SchnorrKeypair;
use crate::multisig::algebra::{self, AggregateCommitment, PrivateCommitment, Response};
use crate::multisig::wire::{self, Tag};

/// Serves one multi-sig signing session on an already-accepted connection.
///
/// Runs to completion (or to the first I/O or decode error) and then
/// returns; the caller is expected to have spawned this per connection.
#[instrument(skip(suite, keypair, rng, stream), fields(signer = "multisig"))]
pub async fn serve_session<S, R, Conn>(
    suite: &S,
    keypair: &SchnorrKeypair,
    rng: &mut R,
    mut stream: Conn,
) -> Result<(), Error>
where
    S: Suite,
    R: RngCore + CryptoRng,
    Conn: AsyncRead + AsyncWrite + Unpin,
{
    // INIT -> MESSAGE: wait for the message to be signed.
    let msg = loop {
        let frame = wire::read_frame(&mut stream, MAX_MESSAGE_LEN).await?;
        match frame.tag {
            Tag::Message => break frame.body,
            Tag::Commitment => {
                warn!("ignoring out-of-order COMMITMENT frame while awaiting MESSAGE");
                continue;
            }
        }
    };
    // msg is exactly MAX_MESSAGE_LEN bytes; the client zero-pads shorter
    // messages up to that length and hashes the padded form, so the
    // collective challenge below must hash these bytes as received, not a
    // trimmed version of them.
    info!(bytes = msg.len(), "received message to sign");

    let commitment = PrivateCommitment::generate(suite, rng);
    wire::write_bare(&mut stream, &commitment.public().to_bytes()).await?;

    // MESSAGE -> COMMITMENT: wait for the aggregate commitment.
    let aggregate = loop {
        let frame = wire::read_frame(&mut stream, 32).await?;
        match frame.tag {
            Tag::Commitment => {
                break AggregateCommitment::from_bytes(&frame.body)?;
            }
            Tag::Message => {
                warn!("ignoring out-of-order MESSAGE frame while awaiting COMMITMENT");
                continue;
            }
        }
    };

    let challenge = algebra::collective_challenge(suite, &msg, &aggregate);
    let response: Response = commitment.respond(challenge, keypair);
    wire::write_bare(&mut stream, &response.to_bytes()).await?;

    info!("session complete");
    Ok(())
}

/// Reference size for the fixed-length message frame, matching the
/// original reference implementation's 1024-byte messages. Messages
/// shorter than this are zero-padded by the client.
pub const MAX_MESSAGE_LEN: usize = 1024;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::DefaultSuite;
    use crate::multisig::algebra::PublicCommitment;
    use tokio::io::duplex;

    #[tokio::test]
    async fn signer_completes_a_full_session() {
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        let keypair = SchnorrKeypair::generate(&suite, &mut rng);

        let (client_side, server_side) = duplex(4096);
        let mut client_side = client_side;

        let kp_clone_pub = keypair.public();
        let handle = tokio::spawn(async move {
            let suite = DefaultSuite;
            let mut rng = rand::thread_rng();
            serve_session(&suite, &keypair, &mut rng, server_side)
                .await
                .unwrap();
        });

        let mut msg = [0u8; MAX_MESSAGE_LEN];
        msg[..3].copy_from_slice(b"hi!");
        wire::write_frame(&mut client_side, Tag::Message, &msg)
            .await
            .unwrap();
        let commitment_bytes = wire::read_bare(&mut client_side, 32).await.unwrap();
        let commitment = PublicCommitment::from_bytes(&commitment_bytes).unwrap();

        let aggregate = algebra::aggregate_commitment(&[commitment]);
        wire::write_frame(&mut client_side, Tag::Commitment, &aggregate.to_bytes())
            .await
            .unwrap();
        let response_bytes = wire::read_bare(&mut client_side, 32).await.unwrap();
        let response = Response::from_bytes(&response_bytes).unwrap();

        let challenge = algebra::collective_challenge(&suite, &msg, &aggregate);
        let sig = algebra::assemble_signature(challenge, &[response]);
        assert!(crate::signature::verify(&suite, &kp_clone_pub, &msg, &sig));

        handle.await.unwrap();
    }
}
