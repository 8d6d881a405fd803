use crate::disk::disk_reader::DiskReader;
use crate::error::RangeReadError;
use crate::mft::file_record::FileRecord;
use crate::read::logical_read_plan::LogicalReadSegmentKind;
use crate::read::range_map::map_range;
use std::io::ErrorKind;
use uom::si::information::byte;

/// Materialize a logical byte window of a file into `buf`.
///
/// Resident data short-circuits to a copy. Otherwise the window is clamped
/// at the record's logical size (bytes past EOF are zero-filled, never read,
/// so last-cluster slack is not exposed), mapped through the data runs, and
/// each physical fragment is read strictly: any short read from the device
/// fails the call. On failure the buffer contents are indeterminate; treat
/// the call as atomic fail/succeed.
pub fn read_range(
    reader: &dyn DiskReader,
    record: &FileRecord,
    file_offset: u64,
    buf: &mut [u8],
    cluster_size: u64,
) -> Result<(), RangeReadError> {
    if cluster_size == 0 {
        return Err(RangeReadError::InvalidClusterSize);
    }
    buf.fill(0);

    if let Some(resident) = &record.resident_data {
        if file_offset < resident.len() as u64 {
            let start = file_offset as usize;
            let n = buf.len().min(resident.len() - start);
            buf[..n].copy_from_slice(&resident[start..start + n]);
        }
        return Ok(());
    }

    let readable = record.size.saturating_sub(file_offset).min(buf.len() as u64);
    if readable == 0 {
        return Ok(());
    }

    let plan = map_range(record, file_offset, readable, cluster_size)?;
    for segment in &plan.segments {
        let pos = segment.logical_offset.get::<byte>() as usize;
        let len = segment.length.get::<byte>() as usize;
        match segment.kind {
            LogicalReadSegmentKind::Physical { physical_offset } => {
                let disk_offset = physical_offset.get::<byte>();
                reader
                    .read_exact_at(disk_offset, &mut buf[pos..pos + len])
                    .map_err(|source| match source.kind() {
                        ErrorKind::UnexpectedEof => RangeReadError::ShortRead {
                            offset: disk_offset,
                        },
                        _ => RangeReadError::Io {
                            offset: disk_offset,
                            source,
                        },
                    })?;
            }
            LogicalReadSegmentKind::Sparse => {} // buffer is pre-zeroed
        }
    }
    Ok(())
}
