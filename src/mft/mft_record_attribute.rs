use crate::mft::le_read::read_u16;
use crate::mft::le_read::read_u32;
use crate::mft::mft_record_attribute_non_resident_header::MftRecordAttributeNonResidentHeader;

/// Wrapper around a borrowed attribute slice inside an MFT record.
/// Provides typed accessors for common header fields without copying.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordAttribute<'a> {
    pub(crate) raw: &'a [u8],
}

impl<'a> MftRecordAttribute<'a> {
    pub const TYPE_STANDARD_INFORMATION: u32 = 0x10;
    pub const TYPE_ATTRIBUTE_LIST: u32 = 0x20;
    pub const TYPE_FILE_NAME: u32 = 0x30;
    pub const TYPE_DATA: u32 = 0x80;
    pub const TYPE_END: u32 = 0xFFFF_FFFF;

    /// The iterator hands out slices already trimmed to the declared
    /// attribute length; anything below the 16-byte common header is junk.
    pub fn from_raw(raw: &'a [u8]) -> Option<Self> {
        if raw.len() < 16 {
            return None;
        }
        Some(Self { raw })
    }

    #[inline(always)]
    pub fn raw_data(&self) -> &'a [u8] {
        self.raw
    }

    #[inline(always)]
    pub fn attr_type(&self) -> u32 {
        u32::from_le_bytes(self.raw[0..4].try_into().unwrap())
    }

    #[inline(always)]
    pub fn total_length(&self) -> u32 {
        u32::from_le_bytes(self.raw[4..8].try_into().unwrap())
    }

    #[inline(always)]
    pub fn is_non_resident(&self) -> bool {
        self.raw[8] != 0
    }

    #[inline(always)]
    pub fn name_length(&self) -> u8 {
        self.raw[9]
    }

    #[inline(always)]
    pub fn name_offset(&self) -> u16 {
        u16::from_le_bytes(self.raw[10..12].try_into().unwrap())
    }

    /// Attributes carrying a name are alternate streams (or index allocations);
    /// the unnamed `$DATA` stream is the one recovery cares about.
    #[inline(always)]
    pub fn is_named(&self) -> bool {
        self.name_length() != 0
    }

    #[inline(always)]
    pub fn attribute_id(&self) -> u16 {
        u16::from_le_bytes(self.raw[14..16].try_into().unwrap())
    }

    /// Content slice of a resident attribute, bounds-checked against the
    /// attribute slice rather than against any declared field.
    pub fn resident_content(&self) -> Option<&'a [u8]> {
        if self.is_non_resident() {
            return None;
        }
        let size = read_u32(self.raw, 0x10)? as usize;
        let off = read_u16(self.raw, 0x14)? as usize;
        let end = off.checked_add(size)?;
        self.raw.get(off..end)
    }

    pub fn non_resident_header(&self) -> Option<MftRecordAttributeNonResidentHeader<'a>> {
        MftRecordAttributeNonResidentHeader::new(*self)
    }
}
