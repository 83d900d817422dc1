
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{ExtensionElement, ExtensionValue};
use crate::error::{Error, Result};

// AUDIO_LEVEL_EXTENSION_SIZE One byte header size
pub const AUDIO_LEVEL_EXTENSION_SIZE: usize = 1;
pub const AUDIO_LEVEL_MAX: u8 = 0x7F;

/// AudioLevelExtension is a extension payload format described in
///
/// One byte format:
/// 0                   1
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |  ID   | len=0 |V| level       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// Two byte format:
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      ID       |     len=1     |V|    level    |    0 (pad)    |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///
/// `level` is the magnitude of the audio level in -dBov and only has 7 bits; larger
/// values are truncated when converted to an element.
///
/// ## Specifications
///
/// * [RFC 6464]
///
/// [RFC 6464]: https://tools.ietf.org/html/rfc6464
#[derive(PartialEq, Eq, Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct AudioLevelExtension {
    pub level: u8,
    pub voice: bool,
}

impl ExtensionValue for AudioLevelExtension {
    fn to_raw(&self, id: u8) -> ExtensionElement {
        let voice = if self.voice { 0x80u8 } else { 0u8 };
        ExtensionElement {
            id,
            payload: Bytes::copy_from_slice(&[voice | (self.level & AUDIO_LEVEL_MAX)]),
        }
    }

    fn from_raw(element: &ExtensionElement) -> Result<Self> {
        if element.payload.len() != AUDIO_LEVEL_EXTENSION_SIZE {
            return Err(Error::ErrAudioLevelExtensionSize(element.payload.len()));
        }

        let b = element.payload[0];
        Ok(AudioLevelExtension {
            level: b & AUDIO_LEVEL_MAX,
            voice: (b & 0x80) != 0,
        })
    }
}
