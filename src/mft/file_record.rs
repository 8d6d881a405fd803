use crate::mft::filetime::Filetime;
use crate::mft::mft_record_attribute_run_list::DataRun;
use crate::mft::mft_record_attribute_x30_file_name::FileNameNamespace;
use crate::mft::mft_record_header::MftRecordHeader;
use crate::mft::mft_record_reference::MftRecordReference;
use bytes::Bytes;

/// Everything recovery needs to know about one file, decoded from its MFT
/// record (and, where needed, its extension records).
///
/// Value-owned: parses on different threads never share a `FileRecord`.
/// Either `resident_data` holds the whole (small) file inline, or
/// `data_runs` locates it on disk; never both.
#[derive(Debug, Clone, Default)]
pub struct FileRecord {
    /// Record slot index, derived from the record's byte offset.
    pub id: u64,
    /// Best file name found, already UTF-8 and at most 255 bytes.
    pub name: String,
    pub name_namespace: FileNameNamespace,
    /// Record header flags (bit 0 = in use, bit 1 = directory).
    pub flags: u16,
    pub link_count: u16,
    pub parent_reference: MftRecordReference,
    pub creation_time: Filetime,
    pub modified_time: Filetime,
    /// Real logical length of the unnamed `$DATA` stream in bytes.
    pub size: u64,
    /// Decoded, normalized extents of the non-resident stream. Empty when
    /// the stream is resident (or missing).
    pub data_runs: Vec<DataRun>,
    /// Inline stream content when `$DATA` is resident.
    pub resident_data: Option<Bytes>,
}

impl FileRecord {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_use(&self) -> bool {
        self.flags & MftRecordHeader::FLAG_IN_USE != 0
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.flags & MftRecordHeader::FLAG_DIRECTORY != 0
    }

    /// Total bytes covered by the data runs; at least `size` for a sane
    /// record, with the excess being slack past EOF.
    #[must_use]
    pub fn allocated_bytes(&self, cluster_size: u64) -> u64 {
        self.data_runs
            .iter()
            .map(|run| run.cluster_count.saturating_mul(cluster_size))
            .fold(0u64, u64::saturating_add)
    }
}
