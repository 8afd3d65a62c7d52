// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Listens on a port and serves the blind-sig signer-side protocol for
//! every inbound connection, using a keypair and shared info blob loaded
//! from disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use schnorr_sessions::blind::signer::serve_session;
use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::persistence::{FileKeyStore, KeyStore};

#[derive(Parser)]
#[command(about = "Blind-sig signer: serves the signer side of a partially-blind signature session")]
struct Cli {
    /// Listen on this port
    #[arg(long, default_value_t = 2222)]
    port: u16,
    /// Path to the signer's keypair file
    #[arg(long)]
    keyfile: PathBuf,
    /// Path to the shared info blob agreed with users
    #[arg(long)]
    infofile: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let store = FileKeyStore;
    let keypair = store
        .load_keypair(&cli.keyfile)
        .with_context(|| format!("loading {}", cli.keyfile.display()))?;
    let info_bytes = store
        .load_info(&cli.infofile)
        .with_context(|| format!("loading {}", cli.infofile.display()))?;

    info!(port = cli.port, "blindsig-signer listening");
    let listener = TcpListener::bind(("0.0.0.0", cli.port)).await?;

    loop {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "accepted connection");
        let keypair = keypair.clone();
        let info_bytes = info_bytes.clone();
        tokio::spawn(async move {
            let suite = DefaultSuite;
            let mut rng = rand::thread_rng();
            if let Err(e) = serve_session(&suite, &keypair, &mut rng, &info_bytes, stream).await {
                error!(%peer, error = %e, "session failed");
            }
        });
    }
}
