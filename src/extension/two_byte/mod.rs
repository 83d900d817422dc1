
use bytes::{Buf, BufMut};

use super::ExtensionElement;
use crate::error::{Error, Result};

pub const EXTENSION_ID_PADDING: u8 = 0x0;
pub const MAX_TWO_BYTE_PAYLOAD_LENGTH: usize = 255;

/// Checks that the element can be written with the two-byte header:
/// id 1 to 255 and at most 255 bytes of payload.
pub fn validate(element: &ExtensionElement) -> Result<()> {
    if element.id == EXTENSION_ID_PADDING {
        return Err(Error::ErrRfc8285twoByteHeaderIdrange);
    }
    if element.payload.len() > MAX_TWO_BYTE_PAYLOAD_LENGTH {
        return Err(Error::ErrRfc8285twoByteHeaderSize);
    }
    Ok(())
}

pub fn payload_len(elements: &[ExtensionElement]) -> usize {
    elements
        .iter()
        .map(|element| 2 + element.payload.len())
        .sum()
}

/// Writes the elements without alignment padding, returning the number of bytes written.
///
///  0                   1
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       ID      |     length    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
pub fn marshal_elements(elements: &[ExtensionElement], mut buf: &mut [u8]) -> Result<usize> {
    let size = payload_len(elements);
    if buf.remaining_mut() < size {
        return Err(Error::ErrBufferTooSmall);
    }

    for element in elements {
        validate(element)?;
        buf.put_u8(element.id);
        buf.put_u8(element.payload.len() as u8);
        buf.put(&*element.payload);
    }

    Ok(size)
}

/// Parses a two-byte extension body. A zero id byte is a single byte of padding.
pub fn unmarshal_elements<B: Buf>(body: &mut B) -> Result<Vec<ExtensionElement>> {
    let mut elements = vec![];
    while body.has_remaining() {
        let id = body.get_u8();
        if id == EXTENSION_ID_PADDING {
            continue;
        }

        if !body.has_remaining() {
            return Err(Error::ErrHeaderExtensionElementTruncated);
        }
        let len = body.get_u8() as usize;
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
