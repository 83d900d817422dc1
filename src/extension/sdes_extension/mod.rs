
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{ExtensionElement, ExtensionValue};
use crate::error::Result;

/// SDES items that RFC 7941 and its companions carry in header extensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SdesType {
    Cname,
    Mid,
    RtpStreamId,
    RepairedRtpStreamId,
}

impl fmt::Display for SdesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SdesType::Cname => "CNAME",
            SdesType::Mid => "MID",
            SdesType::RtpStreamId => "RtpStreamId",
            SdesType::RepairedRtpStreamId => "RepairedRtpStreamId",
        };
        write!(f, "{s}")
    }
}

/// SdesExtension carries an SDES item as a header extension payload (RFC 7941).
///
/// The text travels verbatim. Which item it is depends on the negotiated id, so
/// `sdes_type` is bookkeeping for the caller and is never written to the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SdesExtension {
    pub text: Bytes,
    pub sdes_type: Option<SdesType>,
}

impl SdesExtension {
    pub fn new(sdes_type: SdesType, text: impl Into<Bytes>) -> Self {
        SdesExtension {
            text: text.into(),
            sdes_type: Some(sdes_type),
        }
    }
}

impl ExtensionValue for SdesExtension {
    fn to_raw(&self, id: u8) -> ExtensionElement {
        ExtensionElement {
            id,
            payload: self.text.clone(),
        }
    }

    fn from_raw(element: &ExtensionElement) -> Result<Self> {
        Ok(SdesExtension {
            text: element.payload.clone(),
            sdes_type: None,
        })
    }
}
