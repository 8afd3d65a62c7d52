// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Listens on a port and serves the multi-sig signer-side protocol for
//! every inbound connection, using a keypair loaded from disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::multisig::signer::serve_session;
use schnorr_sessions::persistence::{FileKeyStore, KeyStore};

#[derive(Parser)]
#[command(about = "Multi-sig signer: serves the signer side of a Schnorr multi-signature session")]
struct Cli {
    /// Listen on this port
    #[arg(long, default_value_t = 1111)]
    port: u16,
    /// Path to the signer's keypair file
    #[arg(long)]
    keyfile: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();

    let store = FileKeyStore;
    let keypair = store
        .load_keypair(&cli.keyfile)
        .with_context(|| format!("loading {}", cli.keyfile.display()))?;

    info!(port = cli.port, "multisig-signer listening");
    let listener = TcpListener::bind(("0.0.0.0", cli.port)).await?;

    loop {
        let (stream, peer) = listener.accept().await?;
        info!(%peer, "accepted connection");
        let keypair = keypair.clone();
        tokio::spawn(async move {
            let suite = DefaultSuite;
            let mut rng = rand::thread_rng();
            if let Err(e) = serve_session(&suite, &keypair, &mut rng, stream).await {
                error!(%peer, error = %e, "session failed");
            }
        });
    }
}
