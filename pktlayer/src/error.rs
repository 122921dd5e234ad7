//! Errors raised when constructing addresses from text or decoding layers from bytes.

use crate::pdu::PduKind;

/// Raised when an address cannot be built from its textual or raw form.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum FormatError {
    /// A hardware address component contains a character that is not a hex digit.
    #[error("invalid hex digit {0:?} in hardware address")]
    InvalidHexDigit(char),
    /// The address has the wrong number of separated components.
    #[error("expected {expected} address components, found {found}")]
    InvalidComponentCount {
        /// Components required by the address type.
        expected: usize,
        /// Components present in the input.
        found: usize,
    },
    /// A component is empty, too long or out of range.
    #[error("invalid address component {0:?}")]
    InvalidComponent(String),
    /// Raw bytes of the wrong length were given for a fixed-length address.
    #[error("expected {expected} address bytes, found {found}")]
    InvalidLength {
        /// Byte length of the address type.
        expected: usize,
        /// Byte length of the input.
        found: usize,
    },
}

/// Raised when a buffer is too short for the header it is supposed to carry.
///
/// Decoding never produces a partially initialized layer; the whole call fails
/// with this error instead.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone, Copy)]
#[error("malformed {layer} packet: header needs {required} bytes, buffer has {available}")]
pub struct MalformedPacket {
    /// The layer that was being decoded.
    pub layer: PduKind,
    /// Bytes required by the header, as known at the point of failure.
    pub required: usize,
    /// Bytes actually available.
    pub available: usize,
}

/// Any error raised by this crate.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// See [`FormatError`].
    #[error(transparent)]
    Format(#[from] FormatError),
    /// See [`MalformedPacket`].
    #[error(transparent)]
    MalformedPacket(#[from] MalformedPacket),
}
