use core::fmt;

/// The 8-byte on-disk MFT file reference.
/// Layout (little-endian):
///   bits 0..=47  : MFT record (entry) number
///   bits 48..=63 : sequence number (stale detection)
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct MftRecordReference(u64);

impl MftRecordReference {
    pub const RECORD_NUMBER_MASK: u64 = (1u64 << 48) - 1;

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn from_parts(record_number: u64, sequence_number: u16) -> Self {
        debug_assert!(
            record_number <= Self::RECORD_NUMBER_MASK,
            "record number exceeds 48 bits"
        );
        Self((record_number & Self::RECORD_NUMBER_MASK) | (u64::from(sequence_number) << 48))
    }

    #[must_use]
    pub fn to_raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn record_number(self) -> u64 {
        self.0 & Self::RECORD_NUMBER_MASK
    }

    #[must_use]
    pub fn sequence_number(self) -> u16 {
        (self.0 >> 48) as u16
    }

    /// A raw zero reference points nowhere; such entries are ignored when
    /// chasing extension records.
    #[must_use]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for MftRecordReference {
    fn from(value: u64) -> Self {
        Self::from_raw(value)
    }
}

impl fmt::Debug for MftRecordReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MftRecordReference(record={}, sequence={})",
            self.record_number(),
            self.sequence_number()
        )
    }
}

impl fmt::Display for MftRecordReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.record_number(), self.sequence_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_and_extract() {
        let r = MftRecordReference::from_parts(0xFFFF_FFFF_FFFF, 0xABCD);
        assert_eq!(r.record_number(), 0xFFFF_FFFF_FFFF);
        assert_eq!(r.sequence_number(), 0xABCD);
        assert_eq!(r.to_raw(), 0xABCD_FFFF_FFFF_FFFFu64);
    }

    #[test]
    fn null_detection() {
        assert!(MftRecordReference::from_raw(0).is_null());
        assert!(!MftRecordReference::from_parts(5, 1).is_null());
    }
}
