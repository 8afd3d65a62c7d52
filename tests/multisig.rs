// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! End-to-end multi-sig sessions over real loopback TCP connections.

use tokio::net::{TcpListener, TcpStream};

use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::keys::SchnorrKeypair;
use schnorr_sessions::multisig::client::run_client_protocol;
use schnorr_sessions::multisig::config::{GroupConfig, Member};
use schnorr_sessions::multisig::signer::serve_session;
use schnorr_sessions::signature::verify;

/// Spawns `n` signer processes, each on its own loopback listener, and
/// returns a `GroupConfig` wired up to point at them.
async fn spawn_signers(n: usize) -> GroupConfig {
    let suite = DefaultSuite;
    let mut rng = rand::thread_rng();

    let mut members = Vec::with_capacity(n);
    for _ in 0..n {
        let keypair = SchnorrKeypair::generate(&suite, &mut rng);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let pubkey = keypair.public();
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(x) => x,
                    Err(_) => return,
                };
                let keypair = keypair.clone();
                tokio::spawn(async move {
                    let suite = DefaultSuite;
                    let mut rng = rand::thread_rng();
                    let _ = serve_session(&suite, &keypair, &mut rng, stream).await;
                });
            }
        });

        members.push((addr.ip().to_string(), addr.port(), pubkey));
    }

    GroupConfig::from_members(members)
}

async fn run_scenario(n: usize) {
    let suite = DefaultSuite;
    let config = spawn_signers(n).await;

    let mut msg = vec![0u8; 1024];
    for (i, b) in msg.iter_mut().enumerate() {
        *b = (i % 251) as u8;
    }

    let sig = run_client_protocol(&suite, &config, &msg).await.unwrap();
    assert!(verify(&suite, &config.joint_key.0, &msg, &sig));
}

#[tokio::test]
async fn two_signer_session_produces_a_valid_signature() {
    run_scenario(2).await;
}

#[tokio::test]
async fn five_signer_session_produces_a_valid_signature() {
    run_scenario(5).await;
}

#[tokio::test]
async fn wrong_message_fails_verification() {
    let suite = DefaultSuite;
    let config = spawn_signers(3).await;

    let msg = vec![7u8; 1024];
    let sig = run_client_protocol(&suite, &config, &msg).await.unwrap();

    let mut other = msg.clone();
    other[0] ^= 0xff;
    assert!(!verify(&suite, &config.joint_key.0, &other, &sig));
}

#[tokio::test]
async fn a_signer_refusing_to_connect_fails_the_session() {
    let suite = DefaultSuite;
    // one real signer, one address nobody is listening on
    let mut config = spawn_signers(1).await;
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener); // release the port without ever accepting

    config.members.push(Member {
        host_name: dead_addr.ip().to_string(),
        port: dead_addr.port(),
        pkey: config.members[0].pkey,
    });

    let msg = vec![1u8; 1024];
    let result = run_client_protocol(&suite, &config, &msg).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn direct_tcp_connection_round_trips_a_session() {
    // Exercises serve_session against a real socket rather than an
    // in-process duplex pipe, independent of the client orchestrator.
    let suite = DefaultSuite;
    let mut rng = rand::thread_rng();
    let keypair = SchnorrKeypair::generate(&suite, &mut rng);
    let pubkey = keypair.public();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let suite = DefaultSuite;
        let mut rng = rand::thread_rng();
        serve_session(&suite, &keypair, &mut rng, stream)
            .await
            .unwrap();
    });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut msg = vec![0u8; 1024];
    msg[..5].copy_from_slice(b"hello");

    use schnorr_sessions::multisig::algebra::{self, PublicCommitment, Response};
    use schnorr_sessions::multisig::wire::{self, Tag};

    wire::write_frame(&mut stream, Tag::Message, &msg)
        .await
        .unwrap();
    let commitment_bytes = wire::read_bare(&mut stream, 32).await.unwrap();
    let commitment = PublicCommitment::from_bytes(&commitment_bytes).unwrap();

    let aggregate = algebra::aggregate_commitment(&[commitment]);
    wire::write_frame(&mut stream, Tag::Commitment, &aggregate.to_bytes())
        .await
        .unwrap();
    let response_bytes = wire::read_bare(&mut stream, 32).await.unwrap();
    let response = Response::from_bytes(&response_bytes).unwrap();

    let challenge = algebra::collective_challenge(&suite, &msg, &aggregate);
    let sig = algebra::assemble_signature(challenge, &[response]);
    assert!(verify(&suite, &pubkey, &msg, &sig));
}
