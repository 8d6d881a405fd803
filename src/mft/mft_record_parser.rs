use crate::disk::disk_reader::DiskReader;
use crate::error::RecordParseError;
use crate::mft::file_record::FileRecord;
use crate::mft::mft_location::MftLocationOnDisk;
use crate::mft::mft_record::MFT_RECORD_SIZE;
use crate::mft::mft_record::MftRecord;
use crate::mft::mft_record_attribute::MftRecordAttribute;
use crate::mft::mft_record_attribute_run_list::DataRun;
use crate::mft::mft_record_attribute_run_list::normalize;
use crate::mft::mft_record_attribute_x10_standard_information::MftRecordX10StandardInformation;
use crate::mft::mft_record_attribute_x20_attribute_list::MftRecordX20AttributeList;
use crate::mft::mft_record_attribute_x30_file_name::MftRecordX30FileName;
use crate::mft::mft_record_attribute_x80_data_attribute::MftRecordX80DataAttribute;
use crate::mft::mft_record_reference::MftRecordReference;
use bytes::Bytes;
use std::collections::HashSet;
use std::io::ErrorKind;
use tracing::debug;
use tracing::warn;

/// How many extension records one parse will chase before giving up.
/// Keeps a maliciously deep `$ATTRIBUTE_LIST` graph from running away.
const MAX_EXTENSION_RECORDS: usize = 8;

/// Decodes MFT record slots into [`FileRecord`]s.
///
/// Holds no mutable state: the same parser can serve `parse_record` calls
/// from many threads at once, sharing only the reader.
pub struct MftRecordParser<'a> {
    reader: &'a dyn DiskReader,
    mft_location: MftLocationOnDisk,
}

impl<'a> MftRecordParser<'a> {
    /// Parser over a bare MFT image: file references resolve from offset 0.
    pub fn new(reader: &'a dyn DiskReader) -> Self {
        Self {
            reader,
            mft_location: MftLocationOnDisk::default(),
        }
    }

    /// Resolve file references against the MFT's byte location inside a full
    /// volume image.
    #[must_use]
    pub fn with_mft_location(mut self, mft_location: MftLocationOnDisk) -> Self {
        self.mft_location = mft_location;
        self
    }

    /// Parse the record slot at the absolute byte `offset`.
    ///
    /// `None` means the slot holds nothing recoverable (unreadable, wrong
    /// signature, broken header); the scan just moves on. A returned record
    /// may still be degraded: a malformed attribute only costs itself.
    pub fn parse_record(&self, offset: u64) -> Option<FileRecord> {
        match self.try_parse_record(offset) {
            Ok(record) => Some(record),
            Err(error) => {
                debug!(offset, %error, "refusing MFT record slot");
                None
            }
        }
    }

    /// Like [`Self::parse_record`] but surfaces the refusal reason.
    pub fn try_parse_record(&self, offset: u64) -> Result<FileRecord, RecordParseError> {
        let record = self.read_record_buffer(offset)?;
        let header = record.header()?;

        // Slot index relative to the MFT base, so the id a scan prints is
        // the record number the other commands accept.
        let id = offset.saturating_sub(*self.mft_location) / MFT_RECORD_SIZE as u64;
        let mut out = FileRecord::new(id);
        out.flags = header.flags;
        out.link_count = header.link_count;

        let mut extension_refs: Vec<MftRecordReference> = Vec::new();
        self.scan_attributes(&record, &mut out, &mut extension_refs);

        // Extension records only matter while we still have no stream.
        let mut visited: HashSet<u64> = HashSet::new();
        visited.insert(offset);
        if out.data_runs.is_empty() && out.resident_data.is_none() && !extension_refs.is_empty() {
            self.adopt_extension_runs(&extension_refs, &mut out, &mut visited);
        }
        if out.data_runs.is_empty()
            && out.resident_data.is_none()
            && !header.base_record.is_null()
        {
            self.adopt_extension_runs(&[header.base_record], &mut out, &mut visited);
        }

        Ok(out)
    }

    fn read_record_buffer(&self, offset: u64) -> Result<MftRecord, RecordParseError> {
        let mut data = [0u8; MFT_RECORD_SIZE];
        self.reader
            .read_exact_at(offset, &mut data)
            .map_err(|source| match source.kind() {
                ErrorKind::UnexpectedEof => RecordParseError::ShortRead { offset },
                _ => RecordParseError::Io { offset, source },
            })?;
        Ok(MftRecord::from_data(data))
    }

    /// One pass over the attribute stream. The resulting `FileRecord` does
    /// not depend on the physical order of attributes inside the record.
    fn scan_attributes(
        &self,
        record: &MftRecord,
        out: &mut FileRecord,
        extension_refs: &mut Vec<MftRecordReference>,
    ) {
        let mut best_name_rank = u8::MAX;

        for attribute in record.iter_attributes() {
            match attribute.attr_type() {
                MftRecordAttribute::TYPE_STANDARD_INFORMATION => {
                    match MftRecordX10StandardInformation::new(&attribute) {
                        Some(info) => {
                            out.creation_time = info.creation_time();
                            out.modified_time = info.modified_time();
                        }
                        None => warn!(
                            record = out.id,
                            "dropping malformed STANDARD_INFORMATION attribute"
                        ),
                    }
                }
                MftRecordAttribute::TYPE_FILE_NAME => {
                    let Some(file_name) = MftRecordX30FileName::new(&attribute) else {
                        warn!(record = out.id, "dropping malformed FILE_NAME attribute");
                        continue;
                    };
                    let namespace = file_name.namespace();
                    // Later names of equal or better precedence override.
                    if namespace.rank() > best_name_rank {
                        continue;
                    }
                    let Some(name) = file_name.name() else {
                        warn!(record = out.id, "FILE_NAME name bytes out of bounds");
                        continue;
                    };
                    best_name_rank = namespace.rank();
                    out.name = name;
                    out.name_namespace = namespace;
                    out.parent_reference = file_name.parent_reference();
                }
                MftRecordAttribute::TYPE_DATA => {
                    self.apply_data_attribute(&attribute, out);
                }
                MftRecordAttribute::TYPE_ATTRIBUTE_LIST => {
                    let Some(list) = MftRecordX20AttributeList::new(&attribute) else {
                        // Non-resident attribute lists are rare; nothing to
                        // salvage from them without another disk round-trip.
                        debug!(record = out.id, "skipping non-resident ATTRIBUTE_LIST");
                        continue;
                    };
                    for entry in list.entries() {
                        if entry.reference.is_null() || extension_refs.contains(&entry.reference) {
                            continue;
                        }
                        extension_refs.push(entry.reference);
                    }
                }
                _ => {} // unrecognized types are skipped by design of the format
            }
        }

        normalize(&mut out.data_runs);
    }

    fn apply_data_attribute(&self, attribute: &MftRecordAttribute<'_>, out: &mut FileRecord) {
        let Some(data) = MftRecordX80DataAttribute::new(*attribute) else {
            return;
        };
        if data.is_named() {
            debug!(record = out.id, "skipping named $DATA (alternate stream)");
            return;
        }
        if !data.is_non_resident() {
            // Inline content. A non-resident stream seen earlier wins.
            if !out.data_runs.is_empty() || out.resident_data.is_some() {
                return;
            }
            match data.resident_payload() {
                Some(payload) => {
                    out.size = payload.len() as u64;
                    out.resident_data = Some(Bytes::copy_from_slice(payload));
                }
                None => warn!(record = out.id, "resident $DATA content out of bounds"),
            }
            return;
        }

        let Some(non_resident) = data.non_resident_header() else {
            warn!(record = out.id, "non-resident $DATA header too short");
            return;
        };
        // The declared size survives even if the run list below is garbage.
        // Continuation extents (starting VCN > 0) carry no meaningful size.
        if non_resident.starting_vcn() == 0 || out.size == 0 {
            out.size = non_resident.real_size();
        }
        // A resident payload loses to the real stream.
        out.resident_data = None;
        match non_resident.runlist().map(|list| list.decode_all()) {
            Some(Ok(mut runs)) => out.data_runs.append(&mut runs),
            Some(Err(error)) => {
                warn!(record = out.id, %error, "leaving data runs empty for malformed run list");
            }
            None => warn!(record = out.id, "run list offset beyond $DATA attribute"),
        }
    }

    /// Pull the unnamed `$DATA` run list out of extension records, one level
    /// deep. Failures here degrade the record instead of refusing it.
    fn adopt_extension_runs(
        &self,
        references: &[MftRecordReference],
        out: &mut FileRecord,
        visited: &mut HashSet<u64>,
    ) {
        for reference in references {
            if visited.len() > MAX_EXTENSION_RECORDS {
                warn!(
                    record = out.id,
                    "extension record bound reached; leaving remaining references unresolved"
                );
                return;
            }
            let Some(extension_offset) = self.mft_location.record_offset(reference.record_number())
            else {
                warn!(record = out.id, %reference, "extension reference overflows the image");
                continue;
            };
            if !visited.insert(extension_offset) {
                continue; // cycle, or the record itself
            }
            let extension = match self.read_record_buffer(extension_offset) {
                Ok(extension) => extension,
                Err(error) => {
                    warn!(record = out.id, %error, "abandoning unreadable extension record");
                    continue;
                }
            };
            if let Err(error) = extension.header() {
                warn!(record = out.id, %error, "abandoning invalid extension record");
                continue;
            }
            let (mut runs, real_size) = collect_unnamed_data_runs(&extension);
            if runs.is_empty() {
                continue;
            }
            if let Some(real_size) = real_size
                && out.size == 0
            {
                out.size = real_size;
            }
            out.data_runs.append(&mut runs);
        }
        normalize(&mut out.data_runs);
    }
}

/// Gather the decoded runs of every unnamed non-resident `$DATA` attribute in
/// a record, plus the first declared real size.
fn collect_unnamed_data_runs(record: &MftRecord) -> (Vec<DataRun>, Option<u64>) {
    let mut runs = Vec::new();
    let mut real_size = None;
    for attribute in record.iter_attributes() {
        let Some(data) = MftRecordX80DataAttribute::new(attribute) else {
            continue;
        };
        if data.is_named() || !data.is_non_resident() {
            continue;
        }
        let Some(non_resident) = data.non_resident_header() else {
            continue;
        };
        real_size.get_or_insert(non_resident.real_size());
        match non_resident.runlist().map(|list| list.decode_all()) {
            Some(Ok(mut decoded)) => runs.append(&mut decoded),
            _ => warn!("dropping malformed run list in extension record"),
        }
    }
    (runs, real_size)
}
