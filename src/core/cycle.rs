// Bounded wrap-around stepping for cycling shortcuts

/// Optional sub-range of a list that cycling is confined to.
///
/// Unset bounds default to the ends of the list. Stepping forward past the
/// upper bound wraps to the lower bound; stepping backward past the lower
/// bound wraps to the upper bound. An index outside the range snaps to the
/// bound it would wrap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleRange {
    pub low: Option<usize>,
    pub high: Option<usize>,
}

impl CycleRange {
    /// The whole list
    pub const FULL: Self = Self {
        low: None,
        high: None,
    };

    pub fn new(low: Option<usize>, high: Option<usize>) -> Self {
        Self { low, high }
    }

    /// Effective inclusive bounds for a list of `len` items
    pub fn bounds(&self, len: usize) -> Option<(usize, usize)> {
        let last = len.checked_sub(1)?;
        let low = self.low.unwrap_or(0).min(last);
        let high = self.high.unwrap_or(last).min(last).max(low);
        Some((low, high))
    }

    /// Index after `index`, or `None` for an empty list
    pub fn next(&self, index: usize, len: usize) -> Option<usize> {
        let (low, high) = self.bounds(len)?;
        if index < low || index >= high {
            Some(low)
        } else {
            Some(index + 1)
        }
    }

    /// Index before `index`, or `None` for an empty list
    pub fn previous(&self, index: usize, len: usize) -> Option<usize> {
        let (low, high) = self.bounds(len)?;
        if index <= low || index > high {
            Some(high)
        } else {
            Some(index - 1)
        }
    }
}
