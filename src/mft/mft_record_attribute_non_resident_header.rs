use crate::mft::mft_record_attribute::MftRecordAttribute;
use crate::mft::mft_record_attribute_run_list::RunList;

/// Typed view over the non-resident form of an attribute header.
///
/// Construction guarantees at least 0x40 bytes, so the fixed-field accessors
/// below can index directly.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordAttributeNonResidentHeader<'a> {
    raw: &'a [u8],
}

impl<'a> MftRecordAttributeNonResidentHeader<'a> {
    pub fn new(attribute: MftRecordAttribute<'a>) -> Option<Self> {
        if !attribute.is_non_resident() || attribute.raw_data().len() < 0x40 {
            return None;
        }
        Some(Self {
            raw: attribute.raw_data(),
        })
    }

    #[inline]
    #[must_use]
    pub fn starting_vcn(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x10..0x18].try_into().unwrap())
    }

    #[inline]
    #[must_use]
    pub fn last_vcn(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x18..0x20].try_into().unwrap())
    }

    #[inline]
    #[must_use]
    pub fn runlist_offset(&self) -> u16 {
        u16::from_le_bytes(self.raw[0x20..0x22].try_into().unwrap())
    }

    #[inline]
    #[must_use]
    pub fn allocated_size(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x28..0x30].try_into().unwrap())
    }

    /// Real logical length of the stream in bytes.
    #[inline]
    #[must_use]
    pub fn real_size(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x30..0x38].try_into().unwrap())
    }

    #[inline]
    #[must_use]
    pub fn initialized_size(&self) -> u64 {
        u64::from_le_bytes(self.raw[0x38..0x40].try_into().unwrap())
    }

    /// The encoded run list: from the declared offset to the end of the
    /// attribute slice. `None` when the offset points outside the attribute.
    pub fn runlist(&self) -> Option<RunList<'a>> {
        let off = self.runlist_offset() as usize;
        self.raw.get(off..).map(RunList::new)
    }
}
