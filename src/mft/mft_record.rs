use crate::error::RecordParseError;
use crate::mft::mft_record_attribute_iter::MftRecordAttributeIter;
use crate::mft::mft_record_header::MftRecordHeader;

/// MFT records are a series of 1024-byte slots, one per file or directory,
/// of which only the first 42 bytes (the header) have a fixed layout. The
/// rest is a stream of variable-length attributes.
pub const MFT_RECORD_SIZE: usize = 1024;

/// One raw MFT record slot, exactly as read from the image.
pub struct MftRecord {
    pub data: [u8; MFT_RECORD_SIZE],
}

impl MftRecord {
    pub fn from_data(data: [u8; MFT_RECORD_SIZE]) -> Self {
        Self { data }
    }

    pub fn signature(&self) -> &[u8] {
        &self.data[0..4]
    }

    /// Parse and validate the fixed header.
    pub fn header(&self) -> Result<MftRecordHeader, RecordParseError> {
        MftRecordHeader::parse(&self.data)
    }

    /// Iterate the attribute stream. The iterator is defensive: it stops at
    /// the end marker, at a zero length, and at anything that would step
    /// outside the record buffer.
    pub fn iter_attributes(&self) -> MftRecordAttributeIter<'_> {
        MftRecordAttributeIter::new(&self.data)
    }
}

impl std::fmt::Debug for MftRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MftRecord")
            .field("signature", &String::from_utf8_lossy(self.signature()))
            .finish()
    }
}
