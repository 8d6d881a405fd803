use crate::mft::le_read::read_u16;
use crate::mft::le_read::read_u32;
use crate::mft::mft_record_attribute::MftRecordAttribute;

/// Walks the attribute stream inside a record buffer.
///
/// Termination conditions: the `0xFFFFFFFF` end marker, a zero attribute
/// length (refuse to loop), or any header/body that would step outside the
/// buffer. Length fields are never trusted past the buffer bounds.
#[derive(Debug)]
pub struct MftRecordAttributeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MftRecordAttributeIter<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        let pos = read_u16(data, 0x14).map(usize::from).unwrap_or(data.len());
        Self { data, pos }
    }
}

impl<'a> Iterator for MftRecordAttributeIter<'a> {
    type Item = MftRecordAttribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let attr_type = read_u32(self.data, self.pos)?;
        if attr_type == MftRecordAttribute::TYPE_END {
            return None;
        }
        let attr_len = read_u32(self.data, self.pos.checked_add(4)?)? as usize;
        if attr_len == 0 {
            return None;
        }
        let start = self.pos;
        let end = start.checked_add(attr_len)?;
        if end > self.data.len() {
            return None;
        }
        self.pos = end;
        MftRecordAttribute::from_raw(&self.data[start..end])
    }
}
