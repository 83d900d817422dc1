use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("RTP header size insufficient")]
    ErrHeaderSizeInsufficient,
    #[error("RTP header size insufficient for extension")]
    ErrHeaderSizeInsufficientForExtension,
    #[error("header extension element overruns extension body")]
    ErrHeaderExtensionElementTruncated,
    #[error("RTP padding size insufficient")]
    ErrPaddingSizeInsufficient,
    #[error("buffer too small")]
    ErrBufferTooSmall,

    #[error("too many CSRC identifiers: {0}, at most 15 are allowed")]
    ErrTooManyCsrc(usize),

    #[error("header extension id must be between 1 and 14 for RFC 8285 one byte extensions")]
    ErrRfc8285oneByteHeaderIdrange,
    #[error("header extension payload must be 1 to 16 bytes for RFC 8285 one byte extensions")]
    ErrRfc8285oneByteHeaderSize,
    #[error("header extension id must be between 1 and 255 for RFC 8285 two byte extensions")]
    ErrRfc8285twoByteHeaderIdrange,
    #[error("header extension payload must be 255 bytes or less for RFC 8285 two byte extensions")]
    ErrRfc8285twoByteHeaderSize,
    #[error("header extension profile {0:#06x} is reserved for RFC 8285 extensions")]
    ErrRfc3550headerProfileReserved(u16),
    #[error("extension_payload must be in 32-bit words")]
    HeaderExtensionPayloadNot32BitWords,
    #[error("extension_payload of {0} bytes exceeds the 16-bit word count")]
    HeaderExtensionPayloadTooLarge(usize),

    #[error("audio level extension must be 1 byte, got {0}")]
    ErrAudioLevelExtensionSize(usize),
    #[error("transport cc extension must be 2 bytes, got {0}")]
    ErrTransportCcExtensionSize(usize),

    #[error("{0}")]
    Util(#[from] util::Error),
}

impl Error {
    /// Reports whether the error means the input buffer is shorter than one of
    /// its own length fields declares, i.e. the bytes are not a valid packet.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(
            self,
            Error::ErrHeaderSizeInsufficient
                | Error::ErrHeaderSizeInsufficientForExtension
                | Error::ErrHeaderExtensionElementTruncated
                | Error::ErrPaddingSizeInsufficient
        )
    }

    /// Reports whether the error is a header extension that can not be
    /// represented on the wire.
    pub fn is_invalid_extension(&self) -> bool {
        matches!(
            self,
            Error::ErrRfc8285oneByteHeaderIdrange
                | Error::ErrRfc8285oneByteHeaderSize
                | Error::ErrRfc8285twoByteHeaderIdrange
                | Error::ErrRfc8285twoByteHeaderSize
                | Error::ErrRfc3550headerProfileReserved(_)
                | Error::HeaderExtensionPayloadNot32BitWords
                | Error::HeaderExtensionPayloadTooLarge(_)
                | Error::ErrAudioLevelExtensionSize(_)
                | Error::ErrTransportCcExtensionSize(_)
        )
    }
}

impl From<Error> for util::Error {
    fn from(e: Error) -> Self {
        util::Error::from_std(e)
    }
}

impl PartialEq<util::Error> for Error {
    fn eq(&self, other: &util::Error) -> bool {
        if let Some(down) = other.downcast_ref::<Error>() {
            self == down
        } else {
            false
        }
    }
}
