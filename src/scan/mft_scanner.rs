use crate::disk::disk_reader::DiskReader;
use crate::mft::file_record::FileRecord;
use crate::mft::mft_location::MftLocationOnDisk;
use crate::mft::mft_record_parser::MftRecordParser;
use rayon::prelude::*;
use thousands::Separable;
use tracing::info;

/// Walks MFT record slots and collects every slot that still decodes into a
/// [`FileRecord`], in use or deleted alike; whether a candidate is worth
/// recovering is the caller's decision.
///
/// Slots are parsed in parallel; each parse owns its buffers and shares only
/// the reader, so order of work does not matter. Results come back in slot
/// order regardless.
pub struct MftScanner<'a> {
    reader: &'a dyn DiskReader,
    mft_location: MftLocationOnDisk,
}

impl<'a> MftScanner<'a> {
    pub fn new(reader: &'a dyn DiskReader) -> Self {
        Self {
            reader,
            mft_location: MftLocationOnDisk::default(),
        }
    }

    #[must_use]
    pub fn with_mft_location(mut self, mft_location: MftLocationOnDisk) -> Self {
        self.mft_location = mft_location;
        self
    }

    /// Parse the first `slot_count` record slots.
    pub fn scan(&self, slot_count: u64) -> Vec<FileRecord> {
        let parser = MftRecordParser::new(self.reader).with_mft_location(self.mft_location);
        let candidates: Vec<FileRecord> = (0..slot_count)
            .into_par_iter()
            .filter_map(|slot| {
                let offset = self.mft_location.record_offset(slot)?;
                parser.parse_record(offset)
            })
            .collect();
        info!(
            "Scanned {} slots, {} candidates",
            slot_count.separate_with_commas(),
            candidates.len().separate_with_commas()
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::memory_disk_reader::MemoryDiskReader;

    fn minimal_record(name_marker: u8) -> [u8; 1024] {
        let mut data = [0u8; 1024];
        data[0..4].copy_from_slice(b"FILE");
        data[0x14..0x16].copy_from_slice(&48u16.to_le_bytes());
        data[0x16..0x18].copy_from_slice(&1u16.to_le_bytes());
        data[0x18..0x1C].copy_from_slice(&56u32.to_le_bytes());
        data[48..52].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        data[60] = name_marker;
        data
    }

    #[test]
    fn collects_parsable_slots_in_order() {
        let mut image = Vec::new();
        image.extend_from_slice(&minimal_record(1));
        image.extend_from_slice(&[0u8; 1024]); // dead slot
        image.extend_from_slice(&minimal_record(2));
        let reader = MemoryDiskReader::from(image);
        let records = MftScanner::new(&reader).scan(3);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn honors_mft_location_offset() {
        let mut image = vec![0u8; 2048];
        image.extend_from_slice(&minimal_record(1));
        let reader = MemoryDiskReader::from(image);
        let records = MftScanner::new(&reader)
            .with_mft_location(MftLocationOnDisk::new(2048))
            .scan(1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 0);
    }
}
