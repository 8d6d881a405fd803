use crate::mft::filetime::Filetime;
use crate::mft::le_read::read_u64;
use crate::mft::mft_record_attribute::MftRecordAttribute;

/// Resident `$STANDARD_INFORMATION` (0x10) content view.
///
/// Only the two leading timestamps matter for recovery; everything after is
/// ignored, so 16 content bytes are enough.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordX10StandardInformation<'a> {
    content: &'a [u8],
}

impl<'a> MftRecordX10StandardInformation<'a> {
    pub fn new(attribute: &MftRecordAttribute<'a>) -> Option<Self> {
        if attribute.attr_type() != MftRecordAttribute::TYPE_STANDARD_INFORMATION {
            return None;
        }
        let content = attribute.resident_content()?;
        if content.len() < 16 {
            return None;
        }
        Some(Self { content })
    }

    #[must_use]
    pub fn creation_time(&self) -> Filetime {
        Filetime::from_raw(read_u64(self.content, 0).unwrap_or(0))
    }

    #[must_use]
    pub fn modified_time(&self) -> Filetime {
        Filetime::from_raw(read_u64(self.content, 8).unwrap_or(0))
    }
}
