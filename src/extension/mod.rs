
pub mod audio_level_extension;
pub mod one_byte;
pub mod sdes_extension;
pub mod transport_cc_extension;
pub mod two_byte;

use bytes::{Buf, BufMut, Bytes};
use log::{debug, trace};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::{Error, Result};

pub const EXTENSION_PROFILE_ONE_BYTE: u16 = 0xBEDE;
pub const EXTENSION_PROFILE_TWO_BYTE: u16 = 0x1000;
pub const EXTENSION_HEADER_LENGTH: usize = 4;
/// Largest extension body the 16-bit word count can describe.
pub const MAX_EXTENSION_PAYLOAD_LENGTH: usize = u16::MAX as usize * 4;

/// A single RFC 8285 header extension element.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct ExtensionElement {
    pub id: u8,
    pub payload: Bytes,
}

impl ExtensionElement {
    pub fn new(id: u8, payload: impl Into<Bytes>) -> Self {
        ExtensionElement {
            id,
            payload: payload.into(),
        }
    }

    /// Reports whether the element can be written with the one-byte header.
    pub fn fits_one_byte(&self) -> bool {
        one_byte::validate(self).is_ok()
    }

    /// Reports whether the element can be written with the two-byte header.
    pub fn fits_two_byte(&self) -> bool {
        two_byte::validate(self).is_ok()
    }
}

/// The element encoding of a multiplexed extension block, selected by the reserved
/// profile values of RFC 8285.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u16)]
pub enum ExtensionProfile {
    OneByte = EXTENSION_PROFILE_ONE_BYTE,
    TwoByte = EXTENSION_PROFILE_TWO_BYTE,
}

impl ExtensionProfile {
    /// Returns the multiplexed profile for `profile`, or `None` for RFC 3550 profiles.
    pub fn from_profile(profile: u16) -> Option<Self> {
        match profile {
            EXTENSION_PROFILE_ONE_BYTE => Some(ExtensionProfile::OneByte),
            EXTENSION_PROFILE_TWO_BYTE => Some(ExtensionProfile::TwoByte),
            _ => None,
        }
    }

    pub fn profile(self) -> u16 {
        self as u16
    }

    fn payload_len(self, elements: &[ExtensionElement]) -> usize {
        match self {
            ExtensionProfile::OneByte => one_byte::payload_len(elements),
            ExtensionProfile::TwoByte => two_byte::payload_len(elements),
        }
    }
}

impl From<ExtensionProfile> for u16 {
    fn from(profile: ExtensionProfile) -> Self {
        profile.profile()
    }
}

/// The header extension carried by a packet.
///
/// A packet has no extension, a single RFC 3550 blob under an arbitrary profile, or a
/// list of RFC 8285 elements under one of the two reserved profiles.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub enum Extensions {
    #[default]
    None,
    /// Built through [`Extensions::legacy`]. The profile is never one of the RFC 8285
    /// profiles, which `encode_to` rejects.
    Legacy {
        profile: u16,
        payload: Bytes,
    },
    Multiplexed {
        profile: ExtensionProfile,
        elements: Vec<ExtensionElement>,
    },
}

impl Extensions {
    /// Builds an RFC 3550 extension. The payload must be whole 32-bit words and the
    /// profile must not be one reserved for RFC 8285.
    pub fn legacy(profile: u16, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if ExtensionProfile::from_profile(profile).is_some() {
            return Err(Error::ErrRfc3550headerProfileReserved(profile));
        }
        if payload.len() % 4 != 0 {
            return Err(Error::HeaderExtensionPayloadNot32BitWords);
        }
        if payload.len() > MAX_EXTENSION_PAYLOAD_LENGTH {
            return Err(Error::HeaderExtensionPayloadTooLarge(payload.len()));
        }

        Ok(Extensions::Legacy { profile, payload })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Extensions::None)
    }

    /// Returns the profile written on the wire, if there is an extension at all.
    pub fn profile(&self) -> Option<u16> {
        match self {
            Extensions::None => None,
            Extensions::Legacy { profile, .. } => Some(*profile),
            Extensions::Multiplexed { profile, .. } => Some(profile.profile()),
        }
    }

    /// Returns the RFC 8285 elements in wire order. Empty unless multiplexed.
    pub fn elements(&self) -> &[ExtensionElement] {
        match self {
            Extensions::Multiplexed { elements, .. } => elements,
            _ => &[],
        }
    }

    /// Returns the first element with the given id.
    pub fn get(&self, id: u8) -> Option<&ExtensionElement> {
        self.elements().iter().find(|element| element.id == id)
    }

    /// Appends an element, switching to the multiplexed form.
    ///
    /// The first element picks the one-byte profile when it fits. Once an element
    /// needs the two-byte profile the whole list moves there and stays there. Any
    /// RFC 3550 payload is discarded. Fails when the list would outgrow the 16-bit
    /// word count of the block header.
    pub fn push(self, element: ExtensionElement) -> Result<Self> {
        // every one-byte element is also a valid two-byte element
        two_byte::validate(&element)?;

        let (profile, mut elements) = match self {
            Extensions::Multiplexed { profile, elements } => (profile, elements),
            Extensions::Legacy { profile, .. } => {
                debug!("replacing RFC 3550 extension with profile {profile:#06x}");
                (ExtensionProfile::OneByte, vec![])
            }
            Extensions::None => (ExtensionProfile::OneByte, vec![]),
        };

        let profile = if profile == ExtensionProfile::OneByte && !element.fits_one_byte() {
            debug!(
                "extension id {} with {} bytes needs the two byte profile",
                element.id,
                element.payload.len()
            );
            ExtensionProfile::TwoByte
        } else {
            profile
        };

        elements.push(element);
        let extension_payload_len = profile.payload_len(&elements);
        if (extension_payload_len + 3) / 4 > u16::MAX as usize {
            return Err(Error::HeaderExtensionPayloadTooLarge(extension_payload_len));
        }

        Ok(Extensions::Multiplexed { profile, elements })
    }

    /// Length of the extension body before alignment padding.
    pub fn payload_len(&self) -> usize {
        match self {
            Extensions::None => 0,
            Extensions::Legacy { payload, .. } => payload.len(),
            Extensions::Multiplexed { profile, elements } => profile.payload_len(elements),
        }
    }

    /// Parses an extension block: profile, length in 32-bit words, then the body.
    pub fn decode<B: Buf>(raw_packet: &mut B) -> Result<Self> {
        if raw_packet.remaining() < EXTENSION_HEADER_LENGTH {
            return Err(Error::ErrHeaderSizeInsufficientForExtension);
        }
        let profile = raw_packet.get_u16();
        let extension_length = raw_packet.get_u16() as usize * 4;
        if raw_packet.remaining() < extension_length {
            return Err(Error::ErrHeaderSizeInsufficientForExtension);
        }

        let mut body = raw_packet.copy_to_bytes(extension_length);
        match ExtensionProfile::from_profile(profile) {
            // RFC 8285 RTP One Byte Header Extension
            Some(ExtensionProfile::OneByte) => Ok(Extensions::Multiplexed {
                profile: ExtensionProfile::OneByte,
                elements: one_byte::unmarshal_elements(&mut body)?,
            }),
            // RFC 8285 RTP Two Byte Header Extension
            Some(ExtensionProfile::TwoByte) => Ok(Extensions::Multiplexed {
                profile: ExtensionProfile::TwoByte,
                elements: two_byte::unmarshal_elements(&mut body)?,
            }),
            // RFC3550 Extension
            None => {
                trace!("RFC 3550 extension with profile {profile:#06x}, {extension_length} bytes");
                Ok(Extensions::Legacy {
                    profile,
                    payload: body,
                })
            }
        }
    }

    /// Writes the extension block into `buf`, padding element lists to a 32-bit boundary.
    pub fn encode_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        if self.is_none() {
            return Ok(0);
        }

        let extension_payload_len = self.payload_len();
        let extension_payload_size = (extension_payload_len + 3) / 4;
        if extension_payload_size > u16::MAX as usize {
            return Err(Error::HeaderExtensionPayloadTooLarge(extension_payload_len));
        }
        let size = self.marshal_size();
        if buf.remaining_mut() < size {
            return Err(Error::ErrBufferTooSmall);
        }

        match self {
            Extensions::None => {}
            Extensions::Legacy { profile, payload } => {
                if ExtensionProfile::from_profile(*profile).is_some() {
                    return Err(Error::ErrRfc3550headerProfileReserved(*profile));
                }
                if payload.len() % 4 != 0 {
                    //the payload must be in 32-bit words.
                    return Err(Error::HeaderExtensionPayloadNot32BitWords);
                }
                buf.put_u16(*profile);
                buf.put_u16(extension_payload_size as u16);
                buf.put(&**payload);
            }
            Extensions::Multiplexed { profile, elements } => {
                buf.put_u16(profile.profile());
                buf.put_u16(extension_payload_size as u16);
                let n = match profile {
                    ExtensionProfile::OneByte => one_byte::marshal_elements(elements, buf)?,
                    ExtensionProfile::TwoByte => two_byte::marshal_elements(elements, buf)?,
                };
                buf = &mut buf[n..];

                // add padding to reach 4 bytes boundaries
                buf.put_bytes(0, extension_payload_size * 4 - extension_payload_len);
            }
        }

        Ok(size)
    }
}

impl Unmarshal for Extensions {
    /// Unmarshal parses an extension block from the front of the buffer
    fn unmarshal<B>(raw_packet: &mut B) -> std::result::Result<Self, util::Error>
    where
        Self: Sized,
        B: Buf,
    {
        Ok(Extensions::decode(raw_packet)?)
    }
}

impl MarshalSize for Extensions {
    /// MarshalSize returns the size of the extension block once marshaled, 0 when absent.
    fn marshal_size(&self) -> usize {
        if self.is_none() {
            return 0;
        }
        EXTENSION_HEADER_LENGTH + (self.payload_len() + 3) / 4 * 4
    }
}

impl Marshal for Extensions {
    fn marshal_to(&self, buf: &mut [u8]) -> std::result::Result<usize, util::Error> {
        Ok(self.encode_to(buf)?)
    }
}

/// A typed header extension value that travels as the payload of an [`ExtensionElement`].
///
/// The id is negotiated out of band, so it is supplied when converting to the raw element
/// and ignored when converting back.
pub trait ExtensionValue: Sized {
    fn to_raw(&self, id: u8) -> ExtensionElement;

    fn from_raw(element: &ExtensionElement) -> Result<Self>;
}
