// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Loads a signer's public key and the shared info blob, runs the
//! blind-sig user protocol against a listening signer, and reports the
//! verification result.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::RngCore;

use schnorr_sessions::blind::{run_user_protocol, verify};
use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::persistence::{FileKeyStore, KeyStore};

#[derive(Parser)]
#[command(about = "Blind-sig user: runs the user side of a partially-blind signature session")]
struct Cli {
    /// Signer host to connect to
    #[arg(long)]
    host: String,
    /// Signer port to connect to
    #[arg(long, default_value_t = 2222)]
    port: u16,
    /// Path to the signer's public key file
    #[arg(long)]
    pubkeyfile: PathBuf,
    /// Path to the shared info blob agreed with the signer
    #[arg(long)]
    infofile: PathBuf,
    /// Path to a message file to sign; a random 16-byte message is used if
    /// omitted
    #[arg(long)]
    message: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let store = FileKeyStore;
    let signer_pubkey = store
        .load_pubkey(&cli.pubkeyfile)
        .with_context(|| format!("loading {}", cli.pubkeyfile.display()))?;
    let info_bytes = store
        .load_info(&cli.infofile)
        .with_context(|| format!("loading {}", cli.infofile.display()))?;

    let msg = match &cli.message {
        Some(path) => std::fs::read(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let mut msg = vec![0u8; 16];
            rand::thread_rng().fill_bytes(&mut msg);
            msg
        }
    };

    let suite = DefaultSuite;
    let mut rng = rand::thread_rng();
    let sig = run_user_protocol(
        &suite,
        &mut rng,
        &cli.host,
        cli.port,
        &signer_pubkey,
        &info_bytes,
        &msg,
    )
    .await?;

    let ok = verify(&suite, &signer_pubkey, &sig, &info_bytes, &msg);
    println!("signature: {}", hex::encode(sig.to_bytes()));
    println!("verifies: {}", ok);

    if !ok {
        anyhow::bail!("signature failed to verify");
    }
    Ok(())
}
