//! Framing codec: reads and writes exchanges over a byte stream.
//!
//! Wire format per exchange (all integers big-endian):
//!
//! ```text
//! +-------------+-------------+---------------------+
//! | exchange id | payload len | payload             |
//! |   4 bytes   |   4 bytes   | payload_len bytes   |
//! +-------------+-------------+---------------------+
//! ```
//!
//! The payload is the JSON object for the variant selected by the id.
//! There is no terminator, no checksum and no version field; the
//! header triple is the entire message boundary.

use crate::error::ExchangeError;
use crate::exchange::{Exchange, ExchangeId};
use crate::MAX_PAYLOAD_SIZE;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Reads the next exchange from the stream.
///
/// Reads exactly 4 bytes of id, 4 bytes of length, then `payload_len`
/// bytes of payload; short reads are failures, not retried. A clean
/// end-of-stream before the first id byte yields
/// [`ExchangeError::ConnectionClosed`]; end-of-stream anywhere later
/// is an I/O failure, because it leaves a partial frame behind.
pub async fn read_exchange<R>(stream: &mut R) -> Result<Exchange, ExchangeError>
where
    R: AsyncRead + Unpin,
{
    let mut id_buf = [0u8; 4];
    let mut filled = 0;
    while filled < id_buf.len() {
        let n = stream.read(&mut id_buf[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                // EOF on a frame boundary: the peer hung up cleanly.
                return Err(ExchangeError::ConnectionClosed);
            }
            return Err(ExchangeError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "stream ended inside the exchange id",
            )));
        }
        filled += n;
    }
    let id = ExchangeId::from_wire(u32::from_be_bytes(id_buf))?;

    let mut len_buf = [0u8; 4];
    stream.read_exact(&mut len_buf).await?;
    let payload_len = u32::from_be_bytes(len_buf);
    if payload_len > MAX_PAYLOAD_SIZE {
        return Err(ExchangeError::PayloadTooLarge {
            size: payload_len,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    let mut payload = vec![0u8; payload_len as usize];
    stream.read_exact(&mut payload).await?;

    Exchange::from_payload(id, &payload)
}

/// Writes an exchange to the stream.
///
/// Serializes the payload, then writes the id, the payload length and
/// the payload as three separate writes; a failed write surfaces
/// immediately without attempting the remaining ones.
pub async fn write_exchange<W>(stream: &mut W, exchange: &Exchange) -> Result<(), ExchangeError>
where
    W: AsyncWrite + Unpin,
{
    let payload = exchange.payload_json()?;
    if payload.len() > MAX_PAYLOAD_SIZE as usize {
        return Err(ExchangeError::PayloadTooLarge {
            size: payload.len() as u32,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    stream
        .write_all(&exchange.id().as_wire().to_be_bytes())
        .await?;
    stream
        .write_all(&(payload.len() as u32).to_be_bytes())
        .await?;
    stream.write_all(&payload).await?;

    Ok(())
}
