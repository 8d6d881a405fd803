use uom::ConstZero;
use uom::si::u64::Information;

/// A plan for reading a logical byte window of a file, including sparse
/// segments.
///
/// Each segment either points at bytes physically present on the device or
/// marks a hole to be filled with zeros. Segments are emitted in increasing
/// logical order and are contiguous from offset zero of the requested
/// window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogicalReadPlan {
    pub segments: Vec<LogicalReadSegment>,
}

impl LogicalReadPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total bytes the plan will produce (physical plus zero-filled).
    #[must_use]
    pub fn total_length(&self) -> Information {
        self.segments
            .iter()
            .fold(Information::ZERO, |acc, s| acc + s.length)
    }

    pub fn physical_segments(&self) -> impl Iterator<Item = &LogicalReadSegment> {
        self.segments
            .iter()
            .filter(|s| matches!(s.kind, LogicalReadSegmentKind::Physical { .. }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalReadSegment {
    /// Position within the requested window (not within the whole file).
    pub logical_offset: Information,
    pub length: Information,
    pub kind: LogicalReadSegmentKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalReadSegmentKind {
    Physical { physical_offset: Information },
    Sparse,
}
