// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Wire framing for the blind-signature exchange.
//!
//! Unlike the multi-sig envelope (§4.7), there is no tag byte here: the
//! three messages of the protocol (signer params, challenge, response)
//! have fixed, distinct lengths and are exchanged in a strict order, so
//! the length alone disambiguates them. Reads use `read_exact` against
//! the statically-known length for the expected message.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Error;

/// Writes exactly `body.len()` bytes.
pub async fn write_exact<W: AsyncWrite + Unpin>(writer: &mut W, body: &[u8]) -> Result<(), Error> {
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads exactly `len` bytes; a short read is a decode error.
pub async fn read_exact<R: AsyncRead + Unpin>(reader: &mut R, len: usize) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}
