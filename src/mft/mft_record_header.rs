use crate::error::RecordParseError;
use crate::mft::le_read::read_u16;
use crate::mft::le_read::read_u32;
use crate::mft::le_read::read_u64;
use crate::mft::mft_record_reference::MftRecordReference;

/// Parsed fixed header of an MFT record (the first 42 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MftRecordHeader {
    pub usa_offset: u16,
    pub usa_size_words: u16,
    pub log_sequence_number: u64,
    pub sequence_number: u16,
    pub link_count: u16,
    pub first_attribute_offset: u16,
    pub flags: u16,
    /// Bytes actually in use inside this record ("real size").
    pub used_size: u32,
    pub allocated_size: u32,
    /// Non-null when this is an extension record of another file.
    pub base_record: MftRecordReference,
    pub next_attribute_id: u16,
}

impl MftRecordHeader {
    pub const LEN: usize = 42;

    pub const FLAG_IN_USE: u16 = 0x01;
    pub const FLAG_DIRECTORY: u16 = 0x02;

    /// Parse and validate the header from the start of a record buffer.
    ///
    /// `data` is untrusted: a bad signature or an attribute offset pointing
    /// outside the used portion refuses the record. When the used-size field
    /// is zero the caller must have supplied at least 512 bytes for the
    /// record to be considered at all.
    pub fn parse(data: &[u8]) -> Result<Self, RecordParseError> {
        if data.len() < Self::LEN {
            return Err(RecordParseError::HeaderInvariant {
                reason: format!("buffer of {} bytes is smaller than the header", data.len()),
            });
        }
        if &data[0..4] != b"FILE" {
            return Err(RecordParseError::BadSignature {
                found: [data[0], data[1], data[2], data[3]],
            });
        }

        // All offsets below are covered by the LEN check above.
        let header = Self {
            usa_offset: read_u16(data, 0x04).unwrap_or(0),
            usa_size_words: read_u16(data, 0x06).unwrap_or(0),
            log_sequence_number: read_u64(data, 0x08).unwrap_or(0),
            sequence_number: read_u16(data, 0x10).unwrap_or(0),
            link_count: read_u16(data, 0x12).unwrap_or(0),
            first_attribute_offset: read_u16(data, 0x14).unwrap_or(0),
            flags: read_u16(data, 0x16).unwrap_or(0),
            used_size: read_u32(data, 0x18).unwrap_or(0),
            allocated_size: read_u32(data, 0x1C).unwrap_or(0),
            base_record: MftRecordReference::from_raw(read_u64(data, 0x20).unwrap_or(0)),
            next_attribute_id: read_u16(data, 0x28).unwrap_or(0),
        };

        if header.used_size != 0 {
            if u32::from(header.first_attribute_offset) >= header.used_size {
                return Err(RecordParseError::HeaderInvariant {
                    reason: format!(
                        "first attribute offset {} is not below used size {}",
                        header.first_attribute_offset, header.used_size
                    ),
                });
            }
        } else if data.len() < 512 {
            return Err(RecordParseError::HeaderInvariant {
                reason: format!(
                    "used size is zero and only {} bytes were supplied",
                    data.len()
                ),
            });
        }

        Ok(header)
    }

    #[must_use]
    pub fn is_in_use(&self) -> bool {
        self.flags & Self::FLAG_IN_USE != 0
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.flags & Self::FLAG_DIRECTORY != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes() -> Vec<u8> {
        let mut data = vec![0u8; 1024];
        data[0..4].copy_from_slice(b"FILE");
        data[0x10..0x12].copy_from_slice(&3u16.to_le_bytes()); // sequence
        data[0x12..0x14].copy_from_slice(&1u16.to_le_bytes()); // link count
        data[0x14..0x16].copy_from_slice(&48u16.to_le_bytes()); // first attribute
        data[0x16..0x18].copy_from_slice(&1u16.to_le_bytes()); // in use
        data[0x18..0x1C].copy_from_slice(&416u32.to_le_bytes()); // used size
        data[0x1C..0x20].copy_from_slice(&1024u32.to_le_bytes());
        data
    }

    #[test]
    fn parses_fixed_fields() {
        let header = MftRecordHeader::parse(&header_bytes()).unwrap();
        assert_eq!(header.sequence_number, 3);
        assert_eq!(header.link_count, 1);
        assert_eq!(header.first_attribute_offset, 48);
        assert_eq!(header.used_size, 416);
        assert!(header.is_in_use());
        assert!(!header.is_directory());
        assert!(header.base_record.is_null());
    }

    #[test]
    fn refuses_bad_signature() {
        let mut data = header_bytes();
        data[0..4].copy_from_slice(b"BAAD");
        assert!(matches!(
            MftRecordHeader::parse(&data),
            Err(RecordParseError::BadSignature { .. })
        ));
    }

    #[test]
    fn refuses_attribute_offset_outside_used_size() {
        let mut data = header_bytes();
        data[0x14..0x16].copy_from_slice(&500u16.to_le_bytes());
        assert!(matches!(
            MftRecordHeader::parse(&data),
            Err(RecordParseError::HeaderInvariant { .. })
        ));
    }

    #[test]
    fn zero_used_size_needs_at_least_512_bytes() {
        let mut data = header_bytes();
        data[0x18..0x1C].copy_from_slice(&0u32.to_le_bytes());
        assert!(MftRecordHeader::parse(&data).is_ok());
        data.truncate(256);
        assert!(matches!(
            MftRecordHeader::parse(&data),
            Err(RecordParseError::HeaderInvariant { .. })
        ));
    }
}
