// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Key and config persistence: keypair/pubkey files with restrictive unix
//! permissions, the `GroupConfig` JSON format, and info-blob files.
//!
//! Persistence is exposed through the [`KeyStore`] trait so the session
//! binaries (and anything that tests them) depend on an interface rather
//! than directly on `std::fs`.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use rand_core::{CryptoRng, RngCore};

use crate::error::Error;
use crate::keys::{SchnorrKeypair, SchnorrPublicKey};
use crate::multisig::config::GroupConfig;

/// Permission bits for a private keypair file: owner read/write only.
const KEYPAIR_MODE: u32 = 0o600;
/// Permission bits for a public key or info-blob file: world-readable.
const PUBLIC_MODE: u32 = 0o644;

/// Number of random bytes written by [`write_info_blob`], matching the
/// reference implementation's `raninf` command.
pub const INFO_BLOB_LEN: usize = 16;

/// Abstracts key/config persistence so callers (the CLI, the session
/// binaries, tests) do not depend on `std::fs` directly.
pub trait KeyStore {
    /// Loads a keypair previously written by [`KeyStore::save_keypair`].
    fn load_keypair(&self, path: &Path) -> Result<SchnorrKeypair, Error>;
    /// Writes a keypair with mode 0600.
    fn save_keypair(&self, path: &Path, keypair: &SchnorrKeypair) -> Result<(), Error>;
    /// Loads a public key previously written by [`KeyStore::save_pubkey`].
    fn load_pubkey(&self, path: &Path) -> Result<SchnorrPublicKey, Error>;
    /// Writes a public key with mode 0644.
    fn save_pubkey(&self, path: &Path, pubkey: &SchnorrPublicKey) -> Result<(), Error>;
    /// Loads a `GroupConfig` from its on-disk JSON representation.
    fn load_group_config(&self, path: &Path) -> Result<GroupConfig, Error>;
    /// Writes a `GroupConfig` as JSON.
    fn save_group_config(&self, path: &Path, config: &GroupConfig) -> Result<(), Error>;
    /// Loads an info blob (an arbitrary byte file).
    fn load_info(&self, path: &Path) -> Result<Vec<u8>, Error>;
}

/// The default, filesystem-backed [`KeyStore`].
#[derive(Copy, Clone, Debug, Default)]
pub struct FileKeyStore;

impl KeyStore for FileKeyStore {
    fn load_keypair(&self, path: &Path) -> Result<SchnorrKeypair, Error> {
        let bytes = fs::read(path)?;
        SchnorrKeypair::from_bytes(&bytes)
    }

    fn save_keypair(&self, path: &Path, keypair: &SchnorrKeypair) -> Result<(), Error> {
        write_with_mode(path, &keypair.to_bytes(), KEYPAIR_MODE)
    }

    fn load_pubkey(&self, path: &Path) -> Result<SchnorrPublicKey, Error> {
        let bytes = fs::read(path)?;
        SchnorrPublicKey::from_bytes(&bytes)
    }

    fn save_pubkey(&self, path: &Path, pubkey: &SchnorrPublicKey) -> Result<(), Error> {
        write_with_mode(path, &pubkey.to_bytes(), PUBLIC_MODE)
    }

    fn load_group_config(&self, path: &Path) -> Result<GroupConfig, Error> {
        let data = fs::read_to_string(path)?;
        GroupConfig::from_json(&data)
    }

    fn save_group_config(&self, path: &Path, config: &GroupConfig) -> Result<(), Error> {
        let json = config.to_json()?;
        write_with_mode(path, json.as_bytes(), PUBLIC_MODE)
    }

    fn load_info(&self, path: &Path) -> Result<Vec<u8>, Error> {
        Ok(fs::read(path)?)
    }
}

/// Writes `data` to `path`, creating it if necessary, then sets its unix
/// permission bits to `mode`.
fn write_with_mode(path: &Path, data: &[u8], mode: u32) -> Result<(), Error> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    file.write_all(data)?;
    file.set_permissions(fs::Permissions::from_mode(mode))?;
    Ok(())
}

/// Writes a fresh [`INFO_BLOB_LEN`]-byte random blob to `path`, mode 0644,
/// matching the reference implementation's `raninf` command.
pub fn write_info_blob<R: RngCore + CryptoRng>(path: &Path, rng: &mut R) -> Result<(), Error> {
    let mut blob = vec![0u8; INFO_BLOB_LEN];
    rng.fill_bytes(&mut blob);
    write_with_mode(path, &blob, PUBLIC_MODE)
}
