// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Loads a group configuration, generates (or loads) a message, runs the
//! multi-sig client protocol against every member, and reports the
//! resulting signature and its verification result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::RngCore;

use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::multisig::client::run_client_protocol;
use schnorr_sessions::multisig::signer::MAX_MESSAGE_LEN;
use schnorr_sessions::persistence::{FileKeyStore, KeyStore};
use schnorr_sessions::signature::verify;

#[derive(Parser)]
#[command(about = "Multi-sig client: runs the client side of a Schnorr multi-signature session")]
struct Cli {
    /// Path to the group configuration JSON file
    #[arg(long)]
    group: PathBuf,
    /// Path to a message file to sign; a random 1024-byte message is used
    /// if omitted
    #[arg(long)]
    message: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let store = FileKeyStore;
    let config = store
        .load_group_config(&cli.group)
        .with_context(|| format!("loading {}", cli.group.display()))?;

    let raw_msg = match &cli.message {
        Some(path) => std::fs::read(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let mut msg = vec![0u8; MAX_MESSAGE_LEN];
            rand::thread_rng().fill_bytes(&mut msg);
            msg
        }
    };
    // The session pads/truncates every message to MAX_MESSAGE_LEN before
    // hashing it into the collective challenge; pad here too so the
    // verification below hashes the exact bytes the signers saw.
    let mut msg = vec![0u8; MAX_MESSAGE_LEN];
    let copy_len = raw_msg.len().min(MAX_MESSAGE_LEN);
    msg[..copy_len].copy_from_slice(&raw_msg[..copy_len]);

    let suite = DefaultSuite;
    let sig = run_client_protocol(&suite, &config, &msg).await?;
    let ok = verify(&suite, &config.joint_key.0, &msg, &sig);

    println!("signature: {}", hex::encode(sig.to_bytes()));
    println!("verifies under joint key: {}", ok);

    if !ok {
        anyhow::bail!("signature failed to verify");
    }
    Ok(())
}
