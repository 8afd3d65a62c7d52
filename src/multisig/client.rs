// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! The client side of a multi-sig session: N workers dial N signers and a
//! controller fans out/fans in their commitments and responses.
//!
//! The controller blocks on its channels rather than polling: there is no
//! `select!` with a `default` branch burning CPU while waiting for
//! replies, unlike the reference implementation this protocol was
//! distilled from.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{info, instrument};

use crate::error::Error;
use crate::group::Suite;
use crate::multisig::algebra::{self, AggregateCommitment, PublicCommitment, Response};
use crate::multisig::config::GroupConfig;
use crate::multisig::signer::MAX_MESSAGE_LEN;
use crate::multisig::wire::{self, Tag};
use crate::signature::SchnorrSignature;

/// Default session deadline: if not every signer has replied within this
/// window, the whole session is abandoned (see REDESIGN FLAGS: no
/// partial-failure recovery is attempted).
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30);

/// A report from worker `member_index` carrying its current-step payload.
struct Report {
    member_index: usize,
    payload: Vec<u8>,
}

/// Runs the multi-sig client protocol against every member of `config`,
/// returning the assembled signature on `msg`. The caller is responsible
/// for verifying the result against `config.joint_key`.
#[instrument(skip(suite, config, msg), fields(members = config.members.len()))]
pub async fn run_client_protocol<S: Suite>(
    suite: &S,
    config: &GroupConfig,
    msg: &[u8],
) -> Result<SchnorrSignature, Error> {
    run_client_protocol_with_timeout(suite, config, msg, DEFAULT_SESSION_TIMEOUT).await
}

/// Like [`run_client_protocol`] but with an explicit session deadline.
pub async fn run_client_protocol_with_timeout<S: Suite>(
    suite: &S,
    config: &GroupConfig,
    msg: &[u8],
    deadline: Duration,
) -> Result<SchnorrSignature, Error> {
    timeout(deadline, run_client_protocol_inner(suite, config, msg))
        .await
        .map_err(|_| Error::Protocol("session timed out"))?
}

async fn run_client_protocol_inner<S: Suite>(
    suite: &S,
    config: &GroupConfig,
    msg: &[u8],
) -> Result<SchnorrSignature, Error> {
    let n = config.members.len();
    let mut padded_msg = vec![0u8; MAX_MESSAGE_LEN];
    let copy_len = msg.len().min(MAX_MESSAGE_LEN);
    padded_msg[..copy_len].copy_from_slice(&msg[..copy_len]);

    let (report_tx, mut report_rx) = mpsc::channel::<Report>(n);
    let mut aggregate_txs = Vec::with_capacity(n);
    let mut worker_handles = Vec::with_capacity(n);

    for (member_index, member) in config.members.iter().enumerate() {
        let (aggregate_tx, aggregate_rx) = oneshot::channel::<Vec<u8>>();
        aggregate_txs.push(Some(aggregate_tx));

        let host = member.host_name.clone();
        let port = member.port;
        let padded_msg = padded_msg.clone();
        let report_tx = report_tx.clone();

        worker_handles.push(tokio::spawn(async move {
            worker(member_index, &host, port, padded_msg, report_tx, aggregate_rx).await
        }));
    }
    drop(report_tx);

    // Fan-in: block until every worker has reported its commitment.
    let mut commitments: Vec<Option<PublicCommitment>> = vec![None; n];
    let mut received = 0;
    while received < n {
        let report = report_rx
            .recv()
            .await
            .ok_or(Error::Protocol("a worker disconnected before reporting a commitment"))?;
        commitments[report.member_index] = Some(PublicCommitment::from_bytes(&report.payload)?);
        received += 1;
    }
    let commitments: Vec<PublicCommitment> = commitments
        .into_iter()
        .map(|c| c.expect("all slots filled by the loop above"))
        .collect();

    let aggregate = algebra::aggregate_commitment(&commitments);
    let aggregate_bytes = aggregate.to_bytes().to_vec();

    // Fan-out: broadcast the aggregate to each worker so it can send its
    // second request. Every worker receives this before any worker's
    // second round-trip begins, since each worker blocks on its own
    // oneshot until this send completes.
    for tx in aggregate_txs.into_iter().flatten() {
        let _ = tx.send(aggregate_bytes.clone());
    }

    // Fan-in: block until every worker has reported its response.
    let mut responses: Vec<Option<Response>> = vec![None; n];
    let mut received = 0;
    while received < n {
        let report = report_rx
            .recv()
            .await
            .ok_or(Error::Protocol("a worker disconnected before reporting a response"))?;
        responses[report.member_index] = Some(Response::from_bytes(&report.payload)?);
        received += 1;
    }
    let responses: Vec<Response> = responses
        .into_iter()
        .map(|r| r.expect("all slots filled by the loop above"))
        .collect();

    for handle in worker_handles {
        handle.await.map_err(|_| Error::Protocol("worker task panicked"))??;
    }

    let challenge = algebra::collective_challenge(suite, &padded_msg, &aggregate);
    Ok(algebra::assemble_signature(challenge, &responses))
}

async fn worker(
    member_index: usize,
    host: &str,
    port: u16,
    msg: Vec<u8>,
    report_tx: mpsc::Sender<Report>,
    aggregate_rx: oneshot::Receiver<Vec<u8>>,
) -> Result<(), Error> {
    let mut stream = TcpStream::connect((host, port)).await?;
    info!(member_index, host, port, "connected to signer");

    wire::write_frame(&mut stream, Tag::Message, &msg).await?;
    let commitment_bytes = wire::read_bare(&mut stream, 32).await?;
    report_tx
        .send(Report {
            member_index,
            payload: commitment_bytes,
        })
        .await
        .map_err(|_| Error::Protocol("controller dropped the report channel"))?;

    let aggregate_bytes = aggregate_rx
        .await
        .map_err(|_| Error::Protocol("controller dropped the aggregate channel"))?;
    wire::write_frame(&mut stream, Tag::Commitment, &aggregate_bytes).await?;

    let response_bytes = wire::read_bare(&mut stream, 32).await?;
    report_tx
        .send(Report {
            member_index,
            payload: response_bytes,
        })
        .await
        .map_err(|_| Error::Protocol("controller dropped the report channel"))?;

    Ok(())
}
