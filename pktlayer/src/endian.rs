//! Big-endian helpers for integer fields whose width is only known at runtime.
//!
//! The ARP protocol address field is `plen` bytes wide on the wire while the
//! in-memory value is a fixed 32-bit integer. These helpers move the value in
//! and out of a field of any width: narrower fields keep the low-order bytes,
//! wider fields are zero-filled on the left.

#[inline]
pub(crate) fn read_uint_from_be_bytes(buf: &[u8]) -> u64 {
    let mut out = [0; 8];
    // Only the trailing eight bytes can contribute to a u64.
    let buf = &buf[buf.len().saturating_sub(out.len())..];
    let start = out.len() - buf.len();
    out[start..].copy_from_slice(buf);
    u64::from_be_bytes(out)
}

#[inline]
pub(crate) fn write_uint_as_be_bytes(buf: &mut [u8], n: u64) {
    let bytes = n.to_be_bytes();
    if buf.len() >= bytes.len() {
        let pad = buf.len() - bytes.len();
        buf[..pad].fill(0);
        buf[pad..].copy_from_slice(&bytes);
    } else {
        let start = bytes.len() - buf.len();
        buf.copy_from_slice(&bytes[start..]);
    }
}
