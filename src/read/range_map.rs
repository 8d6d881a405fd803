use crate::error::RangeReadError;
use crate::mft::file_record::FileRecord;
use crate::read::logical_read_plan::LogicalReadPlan;
use crate::read::logical_read_plan::LogicalReadSegment;
use crate::read::logical_read_plan::LogicalReadSegmentKind;
use tracing::warn;
use uom::si::information::byte;
use uom::si::u64::Information;

/// Map a logical byte window of a file onto disk extents.
///
/// Walks the record's data runs with a logical cursor, emitting one segment
/// per overlapping run: a physical `(disk_offset, length)` for allocated
/// runs, a sparse marker for holes. If the run list is exhausted before the
/// window is satisfied, the produced prefix is returned; the range reader
/// zero-fills the remainder (slack past the last run and past EOF look the
/// same here).
pub fn map_range(
    record: &FileRecord,
    file_offset: u64,
    len: u64,
    cluster_size: u64,
) -> Result<LogicalReadPlan, RangeReadError> {
    if cluster_size == 0 {
        return Err(RangeReadError::InvalidClusterSize);
    }

    let mut segments = Vec::new();
    let mut remaining = len;
    let mut file_cursor: u64 = 0;
    // Offset of the next segment within the requested window.
    let mut window_offset: u64 = 0;

    for run in &record.data_runs {
        if remaining == 0 {
            break;
        }
        let Some(run_bytes) = run.cluster_count.checked_mul(cluster_size) else {
            warn!("run length in clusters overflows byte arithmetic; truncating map");
            break;
        };
        let run_end = file_cursor.saturating_add(run_bytes);
        if file_offset >= run_end {
            file_cursor = run_end;
            continue;
        }
        let start_in_run = file_offset.saturating_sub(file_cursor);
        let take = remaining.min(run_bytes - start_in_run);
        let kind = match run.lcn {
            Some(lcn) => {
                let Some(physical) = lcn
                    .checked_mul(cluster_size)
                    .and_then(|base| base.checked_add(start_in_run))
                else {
                    warn!(lcn, "cluster number overflows byte arithmetic; truncating map");
                    break;
                };
                LogicalReadSegmentKind::Physical {
                    physical_offset: Information::new::<byte>(physical),
                }
            }
            None => LogicalReadSegmentKind::Sparse,
        };
        segments.push(LogicalReadSegment {
            logical_offset: Information::new::<byte>(window_offset),
            length: Information::new::<byte>(take),
            kind,
        });
        remaining -= take;
        window_offset += take;
        file_cursor = run_end;
    }

    Ok(LogicalReadPlan { segments })
}
