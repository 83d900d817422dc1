
use bytes::{BufMut, Bytes};

use crate::error::{Error, Result};

/// Writes `padding_size` bytes of RTP padding: `padding_size - 1` zero bytes followed
/// by the pad count itself. A size of 0 writes nothing.
pub fn marshal_padding(padding_size: u8, mut buf: &mut [u8]) -> Result<usize> {
    let size = padding_size as usize;
    if buf.remaining_mut() < size {
        return Err(Error::ErrBufferTooSmall);
    }
    if size == 0 {
        return Ok(0);
    }

    buf.put_bytes(0, size - 1);
    buf.put_u8(padding_size);

    Ok(size)
}

/// Strips RTP padding from the end of `raw`, which holds everything after the CSRC list.
///
/// Returns the remaining bytes and the pad count read from the final byte.
pub fn unmarshal_padding(raw: &Bytes) -> Result<(Bytes, u8)> {
    let Some(&padding_size) = raw.last() else {
        return Err(Error::ErrPaddingSizeInsufficient);
    };
    let padding_len = padding_size as usize;
    if padding_len == 0 || padding_len > raw.len() {
        return Err(Error::ErrPaddingSizeInsufficient);
    }

    Ok((raw.slice(..raw.len() - padding_len), padding_size))
}
