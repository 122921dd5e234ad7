use bytes::{Bytes, BytesMut};

use super::{chain_eq, clone_chain, unlink_chain, InnerPdu, Pdu, PduKind};

/// A layer of opaque payload bytes.
///
/// Holds whatever follows the last header a decoder understood, or a payload
/// supplied by the caller. The bytes are written out unchanged.
#[derive(Debug, Default)]
pub struct RawPdu {
    payload: Bytes,
    inner: InnerPdu,
}

impl RawPdu {
    /// Create a raw layer holding `payload`.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        RawPdu {
            payload: payload.into(),
            inner: None,
        }
    }

    /// Create a raw layer holding a copy of `payload`.
    pub fn from_slice(payload: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(payload))
    }

    /// The payload bytes.
    #[inline]
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Replace the payload bytes.
    #[inline]
    pub fn set_payload(&mut self, payload: impl Into<Bytes>) {
        self.payload = payload.into();
    }
}

impl Clone for RawPdu {
    fn clone(&self) -> Self {
        let mut copy = self.detached();
        copy.inner = clone_chain(self.inner());
        copy
    }
}

impl PartialEq for RawPdu {
    fn eq(&self, other: &Self) -> bool {
        self.header_eq(other) && chain_eq(self.inner(), other.inner())
    }
}

impl Drop for RawPdu {
    fn drop(&mut self) {
        unlink_chain(&mut self.inner);
    }
}

impl Pdu for RawPdu {
    fn kind(&self) -> PduKind {
        PduKind::Raw
    }

    fn header_size(&self) -> usize {
        self.payload.len()
    }

    fn write_header(&self, buf: &mut BytesMut) {
        buf.extend_from_slice(&self.payload);
    }

    fn inner_slot(&self) -> &InnerPdu {
        &self.inner
    }

    fn inner_slot_mut(&mut self) -> &mut InnerPdu {
        &mut self.inner
    }

    fn detached(&self) -> Self {
        RawPdu::new(self.payload.clone())
    }

    fn header_eq(&self, other: &Self) -> bool {
        self.payload == other.payload
    }
}
