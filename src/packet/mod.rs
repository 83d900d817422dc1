
use std::fmt;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use log::trace;
use serde::{Deserialize, Serialize};
use util::marshal::{Marshal, MarshalSize, Unmarshal};

use crate::error::{Error, Result};
use crate::extension::{ExtensionElement, Extensions};
use crate::header::{Header, MAX_CSRC_COUNT, RTP_VERSION};
use crate::padding::{marshal_padding, unmarshal_padding};

/// PacketOptions holds the header fields used by [`Packet::new`].
///
/// Missing fields fall back to their defaults when deserialized, so a partial
/// configuration such as `{"payload_type": 111, "ssrc": 1234}` is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacketOptions {
    pub version: u8,
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
    pub csrc: Vec<u32>,
    /// Total number of padding bytes, including the trailing count byte. 0 disables padding.
    pub padding_size: u8,
}

impl Default for PacketOptions {
    fn default() -> Self {
        PacketOptions {
            version: RTP_VERSION,
            marker: false,
            payload_type: 0,
            sequence_number: 0,
            timestamp: 0,
            ssrc: 0,
            csrc: vec![],
            padding_size: 0,
        }
    }
}

/// Packet represents an RTP Packet
///
/// A packet is a value: the extension operations consume it and hand back the
/// updated packet. The padding and extension bits of the header always agree with
/// the padding size and the extension block.
#[derive(Debug, Eq, PartialEq, Default, Clone)]
pub struct Packet {
    header: Header,
    extensions: Extensions,
    payload: Bytes,
    padding_size: u8,
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = "RTP PACKET:\n".to_string();

        out += format!("\tVersion: {}\n", self.header.version).as_str();
        out += format!("\tMarker: {}\n", self.header.marker).as_str();
        out += format!("\tPayload Type: {}\n", self.header.payload_type).as_str();
        out += format!("\tSequence Number: {}\n", self.header.sequence_number).as_str();
        out += format!("\tTimestamp: {}\n", self.header.timestamp).as_str();
        out += format!("\tSSRC: {} ({:x})\n", self.header.ssrc, self.header.ssrc).as_str();
        if let Some(profile) = self.extensions.profile() {
            out += format!("\tExtension Profile: {profile:#06x}\n").as_str();
        }
        out += format!("\tPayload Length: {}\n", self.payload.len()).as_str();
        if self.padding_size > 0 {
            out += format!("\tPadding Size: {}\n", self.padding_size).as_str();
        }

        write!(f, "{out}")
    }
}

impl Packet {
    /// Builds a packet without header extensions.
    pub fn new(payload: impl Into<Bytes>, options: PacketOptions) -> Result<Self> {
        if options.csrc.len() > MAX_CSRC_COUNT {
            return Err(Error::ErrTooManyCsrc(options.csrc.len()));
        }

        Ok(Packet {
            header: Header {
                version: options.version,
                padding: options.padding_size > 0,
                extension: false,
                marker: options.marker,
                payload_type: options.payload_type,
                sequence_number: options.sequence_number,
                timestamp: options.timestamp,
                ssrc: options.ssrc,
                csrc: options.csrc,
            },
            extensions: Extensions::None,
            payload: payload.into(),
            padding_size: options.padding_size,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn padding_size(&self) -> u8 {
        self.padding_size
    }

    /// returns the ids of the RFC 8285 extension elements in wire order
    pub fn extension_ids(&self) -> Vec<u8> {
        self.extensions.elements().iter().map(|e| e.id).collect()
    }

    /// returns the first RFC 8285 extension element with the given id
    pub fn fetch_extension(&self, id: u8) -> Option<&ExtensionElement> {
        self.extensions.get(id)
    }

    /// Installs an RFC 3550 header extension, replacing any extension present.
    pub fn set_extension(mut self, profile: u16, payload: impl Into<Bytes>) -> Result<Self> {
        self.extensions = Extensions::legacy(profile, payload)?;
        self.header.extension = true;
        Ok(self)
    }

    /// Appends an RFC 8285 extension element, see [`Extensions::push`].
    pub fn add_extension(mut self, element: ExtensionElement) -> Result<Self> {
        self.extensions = self.extensions.push(element)?;
        self.header.extension = true;
        Ok(self)
    }

    /// Drops the header extension, whatever form it has.
    pub fn remove_extensions(mut self) -> Self {
        self.extensions = Extensions::None;
        self.header.extension = false;
        self
    }

    /// Parses a whole RTP packet.
    ///
    /// Padding is removed from the end before the extension block is read; whatever
    /// follows the extension block is the payload.
    pub fn decode<B: Buf>(raw_packet: &mut B) -> Result<Self> {
        let header = Header::decode(raw_packet)?;

        let remaining_len = raw_packet.remaining();
        let mut remaining = raw_packet.copy_to_bytes(remaining_len);

        let padding_size = if header.padding {
            let (without_padding, padding_size) = unmarshal_padding(&remaining)?;
            remaining = without_padding;
            padding_size
        } else {
            0
        };

        let extensions = if header.extension {
            Extensions::decode(&mut remaining)?
        } else {
            Extensions::None
        };

        trace!(
            "unmarshaled RTP packet ssrc={:x} seq={} payload={} bytes padding={}",
            header.ssrc,
            header.sequence_number,
            remaining.len(),
            padding_size
        );

        Ok(Packet {
            header,
            extensions,
            payload: remaining,
            padding_size,
        })
    }

    /// Serializes the packet into a new buffer.
    pub fn encode(&self) -> Result<Bytes> {
        let size = self.marshal_size();
        let mut buf = BytesMut::with_capacity(size);
        buf.resize(size, 0);
        let n = self.encode_to(&mut buf)?;
        buf.truncate(n);
        Ok(buf.freeze())
    }

    /// Serializes the packet into `buf`, returning the number of bytes written.
    pub fn encode_to(&self, mut buf: &mut [u8]) -> Result<usize> {
        let size = self.marshal_size();
        if buf.remaining_mut() < size {
            return Err(Error::ErrBufferTooSmall);
        }

        let n = self.header.encode_to(buf)?;
        buf = &mut buf[n..];

        let n = self.extensions.encode_to(buf)?;
        buf = &mut buf[n..];

        buf.put(&*self.payload);

        marshal_padding(self.padding_size, buf)?;

        trace!(
            "marshaled RTP packet ssrc={:x} seq={} size={}",
            self.header.ssrc,
            self.header.sequence_number,
            size
        );

        Ok(size)
    }
}

impl Unmarshal for Packet {
    /// Unmarshal parses the passed byte slice and stores the result in the Packet this method is called upon
    fn unmarshal<B>(raw_packet: &mut B) -> std::result::Result<Self, util::Error>
    where
        Self: Sized,
        B: Buf,
    {
        Ok(Packet::decode(raw_packet)?)
    }
}

impl MarshalSize for Packet {
    /// MarshalSize returns the size of the packet once marshaled.
    fn marshal_size(&self) -> usize {
        self.header.marshal_size()
            + self.extensions.marshal_size()
            + self.payload.len()
            + self.padding_size as usize
    }
}

impl Marshal for Packet {
    /// MarshalTo serializes the packet and writes to the buffer.
    fn marshal_to(&self, buf: &mut [u8]) -> std::result::Result<usize, util::Error> {
        Ok(self.encode_to(buf)?)
    }
}
