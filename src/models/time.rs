//! Time window and date range primitives.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Half-open time window `[start, end)` within a single day.
///
/// The end instant itself is excluded: two windows that merely touch at a
/// boundary do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// True when the window is well-formed (`end > start`).
    pub fn is_valid(&self) -> bool {
        self.end > self.start
    }

    /// Half-open intersection test: `self.start < other.end && other.start < self.end`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The shared window `[max(starts), min(ends))`, or `None` when the
    /// windows do not overlap.
    pub fn intersection(&self, other: &TimeWindow) -> Option<TimeWindow> {
        if !self.overlaps(other) {
            return None;
        }
        Some(TimeWindow {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        })
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Inclusive date range used by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// A range covering a single day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_window_validity() {
        assert!(TimeWindow::new(t(9, 0), t(10, 0)).is_valid());
        assert!(!TimeWindow::new(t(10, 0), t(10, 0)).is_valid());
        assert!(!TimeWindow::new(t(11, 0), t(10, 0)).is_valid());
    }

    #[test]
    fn test_overlap_basic() {
        let a = TimeWindow::new(t(9, 0), t(10, 0));
        let b = TimeWindow::new(t(9, 30), t(10, 30));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = TimeWindow::new(t(10, 0), t(11, 0));
        let b = TimeWindow::new(t(11, 0), t(12, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn test_intersection_window() {
        let a = TimeWindow::new(t(9, 0), t(10, 0));
        let b = TimeWindow::new(t(9, 30), t(10, 30));
        let shared = a.intersection(&b).unwrap();
        assert_eq!(shared.start, t(9, 30));
        assert_eq!(shared.end, t(10, 0));
    }

    #[test]
    fn test_contained_window() {
        let outer = TimeWindow::new(t(8, 0), t(12, 0));
        let inner = TimeWindow::new(t(9, 0), t(10, 0));
        assert_eq!(outer.intersection(&inner), Some(inner));
    }

    #[test]
    fn test_date_range_contains() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        let range = DateRange::new(d(1), d(7));
        assert!(range.contains(d(1)));
        assert!(range.contains(d(7)));
        assert!(!range.contains(d(8)));
    }
}
