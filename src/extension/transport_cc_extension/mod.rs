#[cfg(test)]
mod transport_cc_extension_test;

use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use super::{ExtensionElement, ExtensionValue};
use crate::error::{Error, Result};

// transport-wide sequence
pub const TRANSPORT_CC_EXTENSION_SIZE: usize = 2;

/// TransportCCExtension is a extension payload format in
/// https://tools.ietf.org/html/draft-holmer-rmcat-transport-wide-cc-extensions-01
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       0xBE    |    0xDE       |           length=1            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  ID   | L=1   |transport-wide sequence number | zero padding  |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
#[derive(PartialEq, Eq, Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct TransportCcExtension {
    pub transport_sequence: u16,
}

impl ExtensionValue for TransportCcExtension {
    fn to_raw(&self, id: u8) -> ExtensionElement {
        let mut payload = BytesMut::with_capacity(TRANSPORT_CC_EXTENSION_SIZE);
        payload.put_u16(self.transport_sequence);
        ExtensionElement {
            id,
            payload: payload.freeze(),
        }
    }

    fn from_raw(element: &ExtensionElement) -> Result<Self> {
        if element.payload.len() != TRANSPORT_CC_EXTENSION_SIZE {
            return Err(Error::ErrTransportCcExtensionSize(element.payload.len()));
        }

        let mut raw = &element.payload[..];
        Ok(TransportCcExtension {
            transport_sequence: raw.get_u16(),
        })
    }
}
