
use bytes::{Buf, BufMut};
use log::debug;

use super::ExtensionElement;
use crate::error::{Error, Result};

pub const EXTENSION_ID_PADDING: u8 = 0x0;
pub const EXTENSION_ID_RESERVED: u8 = 0xF;
pub const MAX_ONE_BYTE_ID: u8 = 14;
pub const MAX_ONE_BYTE_PAYLOAD_LENGTH: usize = 16;

/// Checks that the element can be written with the one-byte header:
/// id 1 to 14 and 1 to 16 bytes of payload.
pub fn validate(element: &ExtensionElement) -> Result<()> {
    if !(1..=MAX_ONE_BYTE_ID).contains(&element.id) {
        return Err(Error::ErrRfc8285oneByteHeaderIdrange);
    }
    if !(1..=MAX_ONE_BYTE_PAYLOAD_LENGTH).contains(&element.payload.len()) {
        return Err(Error::ErrRfc8285oneByteHeaderSize);
    }
    Ok(())
}

pub fn payload_len(elements: &[ExtensionElement]) -> usize {
    elements
        .iter()
        .map(|element| 1 + element.payload.len())
        .sum()
}

/// Writes the elements without alignment padding, returning the number of bytes written.
///
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// |  ID   |  len  |
/// +-+-+-+-+-+-+-+-+
///
/// `len` is the payload length minus one.
pub fn marshal_elements(elements: &[ExtensionElement], mut buf: &mut [u8]) -> Result<usize> {
    let size = payload_len(elements);
    if buf.remaining_mut() < size {
        return Err(Error::ErrBufferTooSmall);
    }

    for element in elements {
        validate(element)?;
        buf.put_u8((element.id << 4) | (element.payload.len() as u8 - 1));
        buf.put(&*element.payload);
    }

    Ok(size)
}

/// Parses a one-byte extension body.
///
/// Zero bytes are padding. The reserved id 15 ends the body and everything after it
/// is dropped.
pub fn unmarshal_elements<B: Buf>(body: &mut B) -> Result<Vec<ExtensionElement>> {
    let mut elements = vec![];
    while body.has_remaining() {
        let b = body.get_u8();
        let id = b >> 4;
        if id == EXTENSION_ID_PADDING {
            continue;
        }
        if id == EXTENSION_ID_RESERVED {
            debug!(
                "one byte extension stop marker, dropping {} bytes",
                body.remaining()
            );
            body.advance(body.remaining());
            break;
        }

        let len = ((b & 0x0F) + 1) as usize;
        if body.remaining() < len {
            return Err(Error::ErrHeaderExtensionElementTruncated);
        }
        elements.push(ExtensionElement {
            id,
            payload: body.copy_to_bytes(len),
        });
    }

    Ok(elements)
}
