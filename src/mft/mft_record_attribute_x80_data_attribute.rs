use crate::mft::mft_record_attribute::MftRecordAttribute;
use crate::mft::mft_record_attribute_non_resident_header::MftRecordAttributeNonResidentHeader;
use crate::mft::mft_record_attribute_run_list::RunList;

/// Wrapper specific to a type 0x80 ($DATA) attribute.
/// Exposes helpers for the resident / non-resident variants.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordX80DataAttribute<'a> {
    inner: MftRecordAttribute<'a>,
}

impl<'a> MftRecordX80DataAttribute<'a> {
    pub fn new(attribute: MftRecordAttribute<'a>) -> Option<Self> {
        if attribute.attr_type() != MftRecordAttribute::TYPE_DATA {
            return None;
        }
        Some(Self { inner: attribute })
    }

    #[inline(always)]
    pub fn inner(&self) -> MftRecordAttribute<'a> {
        self.inner
    }

    /// Named `$DATA` is an alternate data stream; recovery only follows the
    /// unnamed default stream.
    #[inline(always)]
    pub fn is_named(&self) -> bool {
        self.inner.is_named()
    }

    #[inline(always)]
    pub fn is_non_resident(&self) -> bool {
        self.inner.is_non_resident()
    }

    pub fn resident_payload(&self) -> Option<&'a [u8]> {
        self.inner.resident_content()
    }

    pub fn non_resident_header(&self) -> Option<MftRecordAttributeNonResidentHeader<'a>> {
        self.inner.non_resident_header()
    }

    pub fn runlist(&self) -> Option<RunList<'a>> {
        self.non_resident_header()?.runlist()
    }
}
