use crate::mft::le_read::read_u16;
use crate::mft::le_read::read_u32;
use crate::mft::le_read::read_u64;
use crate::mft::mft_record_attribute::MftRecordAttribute;
use crate::mft::mft_record_reference::MftRecordReference;

/// Resident `$ATTRIBUTE_LIST` (0x20) content view.
///
/// When a file's attributes overflow its base record, this list names the
/// extension records that hold them. Each entry carries the attribute type it
/// describes and the file reference of the record that stores it.
#[derive(Clone, Copy, Debug)]
pub struct MftRecordX20AttributeList<'a> {
    content: &'a [u8],
}

impl<'a> MftRecordX20AttributeList<'a> {
    pub fn new(attribute: &MftRecordAttribute<'a>) -> Option<Self> {
        if attribute.attr_type() != MftRecordAttribute::TYPE_ATTRIBUTE_LIST {
            return None;
        }
        let content = attribute.resident_content()?;
        Some(Self { content })
    }

    pub fn entries(&self) -> AttributeListEntryIter<'a> {
        AttributeListEntryIter {
            content: self.content,
            pos: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeListEntry {
    pub attr_type: u32,
    pub reference: MftRecordReference,
}

/// Iterates list entries, tolerating the 16-bit/32-bit length quirk seen on
/// damaged volumes: entries must be at least 24 bytes, and when the u16
/// length field reads below that, the u32 at the same offset is tried before
/// giving up.
#[derive(Debug)]
pub struct AttributeListEntryIter<'a> {
    content: &'a [u8],
    pos: usize,
}

impl AttributeListEntryIter<'_> {
    const MIN_ENTRY_LEN: usize = 24;
}

impl<'a> Iterator for AttributeListEntryIter<'a> {
    type Item = AttributeListEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos.checked_add(Self::MIN_ENTRY_LEN)? > self.content.len() {
            return None;
        }
        let attr_type = read_u32(self.content, self.pos)?;
        let mut entry_len = read_u16(self.content, self.pos + 4)? as usize;
        if entry_len < Self::MIN_ENTRY_LEN {
            entry_len = read_u32(self.content, self.pos + 4)? as usize;
        }
        if entry_len < Self::MIN_ENTRY_LEN {
            return None;
        }
        let reference = MftRecordReference::from_raw(read_u64(self.content, self.pos + 16)?);
        self.pos = self.pos.checked_add(entry_len)?;
        Some(AttributeListEntry {
            attr_type,
            reference,
        })
    }
}
