// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Command-line keygen tool: generates signer keypairs, assembles
//! multi-sig group configurations, and writes random shared-info blobs
//! for the blind-signature protocol.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use schnorr_sessions::group::DefaultSuite;
use schnorr_sessions::multisig::GroupConfig;
use schnorr_sessions::persistence::{write_info_blob, FileKeyStore, KeyStore};
use schnorr_sessions::SchnorrKeypair;

#[derive(Parser)]
#[command(name = "keytool", about = "Command line keygen tool for Schnorr work")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new signer keypair, writing <output>.pri and <output>.pub.
    Gen {
        /// Output file path to write (appends .pub, .pri)
        output: PathBuf,
    },
    /// Create a Schnorr multi-signature group configuration file.
    Mkgroup {
        /// Write the output file to this path
        output: PathBuf,
        /// One or more "host:port,pathtokey" triplets
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// Generate a random blob of shared information for the blind protocol.
    Raninf {
        /// Output file path to write
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::try_init().ok();
    let cli = Cli::parse();
    match cli.command {
        Command::Gen { output } => run_keygen(&output),
        Command::Mkgroup { output, members } => run_mkgroup(&output, &members),
        Command::Raninf { output } => run_raninf(&output),
    }
}

fn run_keygen(output: &Path) -> Result<()> {
    let suite = DefaultSuite;
    let mut rng = rand::thread_rng();
    let store = FileKeyStore;

    let keypair = SchnorrKeypair::generate(&suite, &mut rng);
    let pri_path = with_extension(output, "pri");
    let pub_path = with_extension(output, "pub");

    store
        .save_keypair(&pri_path, &keypair)
        .with_context(|| format!("writing {}", pri_path.display()))?;
    store
        .save_pubkey(&pub_path, &keypair.public())
        .with_context(|| format!("writing {}", pub_path.display()))?;

    println!("Wrote {} and {}", pri_path.display(), pub_path.display());
    Ok(())
}

fn run_mkgroup(output: &Path, members: &[String]) -> Result<()> {
    let store = FileKeyStore;
    let mut parsed = Vec::with_capacity(members.len());

    for item in members {
        let (hostspec, pubkeyfile) = item
            .split_once(',')
            .context("expected \"host:port,pathtokey\"")?;
        let (host, port) = hostspec
            .split_once(':')
            .context("expected \"host:port\" in member spec")?;
        let port: u16 = port.parse().context("invalid port")?;
        let pubkey = store
            .load_pubkey(Path::new(pubkeyfile))
            .with_context(|| format!("reading {}", pubkeyfile))?;
        parsed.push((host.to_string(), port, pubkey));
    }

    if parsed.is_empty() {
        bail!("mkgroup requires at least one member");
    }

    let config = GroupConfig::from_members(parsed);
    store.save_group_config(output, &config)?;
    println!("Wrote group configuration to {}", output.display());
    Ok(())
}

fn run_raninf(output: &Path) -> Result<()> {
    let mut rng = rand::thread_rng();
    write_info_blob(output, &mut rng)?;
    println!("Random bytes written to {}", output.display());
    Ok(())
}

fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    let file_name = base
        .file_name()
        .map(|n| format!("{}.{}", n.to_string_lossy(), ext))
        .unwrap_or_else(|| ext.to_string());
    path.set_file_name(file_name);
    path
}
