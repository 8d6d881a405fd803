//! Bounds-checked little-endian field reads over untrusted buffers.
//!
//! Every multi-byte integer in an MFT record is assembled byte-wise; nothing
//! here casts over an unaligned pointer.

#[inline]
pub fn read_u16(bytes: &[u8], off: usize) -> Option<u16> {
    bytes
        .get(off..off.checked_add(2)?)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
}

#[inline]
pub fn read_u32(bytes: &[u8], off: usize) -> Option<u32> {
    bytes
        .get(off..off.checked_add(4)?)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline]
pub fn read_u64(bytes: &[u8], off: usize) -> Option<u64> {
    bytes
        .get(off..off.checked_add(8)?)
        .map(|b| u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
}
