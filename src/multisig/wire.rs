// -*- mode: rust; -*-
//
// This file is part of schnorr-sessions.
// See LICENSE for licensing information.

//! Wire framing for the multi-sig client-to-signer envelope.
//!
//! Every message the client sends to a signer is `[tag:u8 | reserved:u8 |
//! body:bytes]`. Signer replies carry no envelope; they are bare encodings
//! whose length is known from the state the connection is in. All reads
//! use `read_exact` against a statically-known length: a short read is a
//! [`Error::Decode`], never a partial value silently accepted.

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::Error;

/// Frame tags a client sends to a multi-sig signer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// Carries the message to be signed.
    Message = 1,
    /// Carries the aggregate commitment.
    Commitment = 2,
}

impl Tag {
    fn from_u8(b: u8) -> Option<Tag> {
        match b {
            1 => Some(Tag::Message),
            2 => Some(Tag::Commitment),
            _ => None,
        }
    }
}

/// A decoded client-to-signer frame.
pub struct Frame {
    /// What kind of payload `body` carries.
    pub tag: Tag,
    /// The frame's payload, exactly `body.len()` bytes as declared on the wire.
    pub body: Vec<u8>,
}

/// Writes a tagged frame: `[tag | 0 | body]`.
pub async fn write_frame<W: tokio::io::AsyncWrite + Unpin>(
    writer: &mut W,
    tag: Tag,
    body: &[u8],
) -> Result<(), Error> {
    let mut buf = Vec::with_capacity(2 + body.len());
    buf.push(tag as u8);
    buf.push(0); // reserved
    buf.extend_from_slice(body);
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads a tagged frame whose body is exactly `body_len` bytes.
pub async fn read_frame<R: tokio::io::AsyncRead + Unpin>(
    reader: &mut R,
    body_len: usize,
) -> Result<Frame, Error> {
    let mut header = [0u8; 2];
    reader.read_exact(&mut header).await?;
    let tag = Tag::from_u8(header[0]).ok_or(Error::Decode("unknown frame tag"))?;

    let mut body = vec![0u8; body_len];
    reader.read_exact(&mut body).await?;
    Ok(Frame { tag, body })
}

/// Writes a bare (untagged) fixed-length reply, as sent by a signer.
pub async fn write_bare<W: tokio::io::AsyncWrite + Unpin>(
    writer: &mut W,
    body: &[u8],
) -> Result<(), Error> {
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads a bare (untagged) fixed-length reply of exactly `len` bytes.
pub async fn read_bare<R: tokio::io::AsyncRead + Unpin>(
    reader: &mut R,
    len: usize,
) -> Result<Vec<u8>, Error> {
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(buf)
}
