//! Half-open index ranges within one row and the helpers that build them

use std::ops::Range;

/// Half-open range `[start, end)` of pixel indices within one row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First index included in the interval
    pub start: usize,
    /// First index past the interval
    pub end: usize,
}

impl Interval {
    /// Create an interval covering `[start, end)`
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of pixels covered
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Test whether the interval covers no pixels
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Same interval shifted right by `offset` indices
    #[must_use]
    pub const fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Index range covered by the interval
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Interval {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Maximal runs of consecutive indices in `0..len` where `include` holds
///
/// Indices where `include` fails are left out as gaps.
pub fn runs_where(len: usize, include: impl Fn(usize) -> bool) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut run_start = None;

    for index in 0..len {
        match (include(index), run_start) {
            (true, None) => run_start = Some(index),
            (false, Some(start)) => {
                intervals.push(Interval::new(start, index));
                run_start = None;
            }
            _ => {}
        }
    }

    if let Some(start) = run_start {
        intervals.push(Interval::new(start, len));
    }

    intervals
}

/// Partition `0..len` into consecutive intervals with widths drawn from `next_width`
///
/// Widths below one are raised to one. The final interval is clipped to `len`,
/// so the result always covers every index exactly once.
pub fn tile_with_widths(len: usize, mut next_width: impl FnMut() -> usize) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut start = 0;

    while start < len {
        let end = start.saturating_add(next_width().max(1)).min(len);
        intervals.push(Interval::new(start, end));
        start = end;
    }

    intervals
}
