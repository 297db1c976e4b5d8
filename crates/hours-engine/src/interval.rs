//! The half-open interval primitive and the constants of the weekly cycle.
//!
//! All offsets are whole seconds. Week offsets count from Monday 00:00 in the
//! business's local time; day-local offsets count from that day's midnight.
//! No function here clamps to the week: [`Interval::shifted`] in particular is
//! plain arithmetic, used to move between week, day-local and wrapped
//! coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed offset in seconds.
pub type Seconds = i32;

/// Seconds in one day.
pub const DAY: Seconds = 24 * 3600;

/// Seconds in one week.
pub const WEEK: Seconds = 7 * DAY;

/// How far past midnight an interval may run and still belong to the day it
/// started on.
pub const MAX_SPILL: Seconds = 6 * 3600;

/// A half-open span `[start, end)` of seconds.
///
/// An interval with `start >= end` is *empty*. Empty intervals are the
/// universal "absent" value: they are never unioned against and are dropped
/// by normalization. [`Interval::default`] is the canonical empty interval.
///
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(Seconds, Seconds)", into = "(Seconds, Seconds)")]
pub struct Interval {
    pub start: Seconds,
    pub end: Seconds,
}

impl Interval {
    pub const fn new(start: Seconds, end: Seconds) -> Self {
        Self { start, end }
    }

    /// Whether the interval covers anything.
    pub const fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Covered length in seconds, zero for an empty interval.
    pub fn duration(&self) -> i64 {
        if self.is_valid() {
            i64::from(self.end) - i64::from(self.start)
        } else {
            0
        }
    }

    /// Whether `t` lies in `[start, end)`.
    pub const fn contains(&self, t: Seconds) -> bool {
        self.start <= t && t < self.end
    }

    /// Translate both bounds by `offset`.
    #[must_use]
    pub const fn shifted(&self, offset: Seconds) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    /// Bounding union of two intervals.
    ///
    /// If either side is empty the other one is returned. Otherwise the result
    /// spans from the smaller start to the larger end **without checking that
    /// the two intervals overlap or touch**. Uniting disjoint intervals yields
    /// a span that also covers the gap between them, so callers must only
    /// unite intervals already known to overlap or be adjacent.
    ///
    /// ```
    /// use hours_engine::interval::Interval;
    ///
    /// let morning = Interval::new(8 * 3600, 12 * 3600);
    /// let afternoon = Interval::new(12 * 3600, 17 * 3600);
    /// assert_eq!(morning.united(afternoon), Interval::new(8 * 3600, 17 * 3600));
    /// ```
    #[must_use]
    pub fn united(&self, other: Self) -> Self {
        if !self.is_valid() {
            return other;
        } else if !other.is_valid() {
            return *self;
        }
        Self::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Overlap of two intervals, or the empty interval when they do not overlap.
    #[must_use]
    pub fn intersected(&self, other: Self) -> Self {
        let result = Self::new(self.start.max(other.start), self.end.min(other.end));
        if result.is_valid() {
            result
        } else {
            Self::default()
        }
    }

    /// The parts of `self` left after removing `other`: one before it, one after.
    /// Either part may be empty.
    pub(crate) fn subtracted(&self, other: Self) -> (Self, Self) {
        if !other.is_valid() || !self.intersected(other).is_valid() {
            return (*self, Self::default());
        }
        let before = Self::new(self.start, other.start);
        let after = Self::new(other.end, self.end);
        (
            if before.is_valid() { before } else { Self::default() },
            if after.is_valid() { after } else { Self::default() },
        )
    }
}

impl From<(Seconds, Seconds)> for Interval {
    fn from((start, end): (Seconds, Seconds)) -> Self {
        Self::new(start, end)
    }
}

impl From<Interval> for (Seconds, Seconds) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.end)
    }
}

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Format a time of day as `HH:MM`, with a `+N` day suffix when `offset` runs
/// past the midnight that follows `day_start`.
fn format_clock(offset: Seconds, day_start: Seconds) -> String {
    let local = offset - day_start;
    let days_over = local.div_euclid(DAY);
    let within = local.rem_euclid(DAY);
    let clock = format!("{:02}:{:02}", within / 3600, (within % 3600) / 60);
    match days_over {
        0 => clock,
        n if n > 0 => format!("{clock}+{n}"),
        n => format!("{clock}{n}"),
    }
}

/// Render week offset `t` as `Mon 08:00`, taking the day modulo the week.
pub fn format_week_time(t: Seconds) -> String {
    let day = t.div_euclid(DAY);
    let name = DAY_NAMES[day.rem_euclid(7) as usize];
    format!("{name} {}", format_clock(t, day * DAY))
}

/// Renders week offsets as `Mon 08:00-17:00`; an end on the following day
/// reads `Sun 22:00-03:00+1`. Empty intervals render as `-`.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str("-");
        }
        let day_start = self.start.div_euclid(DAY) * DAY;
        let end = if self.end == day_start + DAY {
            "24:00".to_string()
        } else {
            format_clock(self.end, day_start)
        };
        write!(f, "{}-{end}", format_week_time(self.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: Seconds = 3600;

    #[test]
    fn test_constants() {
        assert_eq!(DAY, 86_400);
        assert_eq!(WEEK, 604_800);
        assert_eq!(MAX_SPILL, 21_600);
    }

    #[test]
    fn test_validity() {
        assert!(Interval::new(0, 1).is_valid());
        assert!(!Interval::new(100, 100).is_valid());
        assert!(!Interval::new(10, 5).is_valid());
        assert!(!Interval::default().is_valid());
    }

    #[test]
    fn test_duration_and_contains() {
        let i = Interval::new(8 * H, 17 * H);
        assert_eq!(i.duration(), 9 * 3600);
        assert!(i.contains(8 * H));
        assert!(!i.contains(17 * H)); // half-open
        assert_eq!(Interval::new(5, 1).duration(), 0);
    }

    #[test]
    fn test_shifted_is_plain_arithmetic() {
        let i = Interval::new(WEEK - H, WEEK + H);
        assert_eq!(i.shifted(-WEEK), Interval::new(-H, H));
        assert_eq!(i.shifted(WEEK), Interval::new(2 * WEEK - H, 2 * WEEK + H));
    }

    #[test]
    fn test_united_overlapping() {
        let a = Interval::new(8 * H, 12 * H);
        let b = Interval::new(10 * H, 14 * H);
        assert_eq!(a.united(b), Interval::new(8 * H, 14 * H));
        assert_eq!(b.united(a), Interval::new(8 * H, 14 * H));
    }

    #[test]
    fn test_united_with_empty_returns_other() {
        let a = Interval::new(8 * H, 12 * H);
        assert_eq!(a.united(Interval::default()), a);
        assert_eq!(Interval::default().united(a), a);
        // An empty interval is never a point to stretch towards.
        assert_eq!(a.united(Interval::new(20 * H, 20 * H)), a);
    }

    #[test]
    fn test_united_disjoint_covers_gap() {
        // Bounding union does not check adjacency: the gap gets covered.
        let monday = Interval::new(8 * H, 9 * H);
        let friday = Interval::new(4 * DAY + 8 * H, 4 * DAY + 9 * H);
        assert_eq!(monday.united(friday), Interval::new(8 * H, 4 * DAY + 9 * H));
    }

    #[test]
    fn test_intersected() {
        let a = Interval::new(8 * H, 12 * H);
        let b = Interval::new(10 * H, 14 * H);
        assert_eq!(a.intersected(b), Interval::new(10 * H, 12 * H));
        assert_eq!(b.intersected(a), a.intersected(b));
    }

    #[test]
    fn test_intersected_touching_is_empty() {
        let a = Interval::new(8 * H, 12 * H);
        let b = Interval::new(12 * H, 14 * H);
        assert_eq!(a.intersected(b), Interval::default());
    }

    #[test]
    fn test_subtracted_middle_splits() {
        let a = Interval::new(8 * H, 18 * H);
        let (before, after) = a.subtracted(Interval::new(12 * H, 13 * H));
        assert_eq!(before, Interval::new(8 * H, 12 * H));
        assert_eq!(after, Interval::new(13 * H, 18 * H));
    }

    #[test]
    fn test_subtracted_disjoint_keeps_all() {
        let a = Interval::new(8 * H, 12 * H);
        let (before, after) = a.subtracted(Interval::new(14 * H, 15 * H));
        assert_eq!(before, a);
        assert!(!after.is_valid());
    }

    #[test]
    fn test_subtracted_covering_removes_all() {
        let a = Interval::new(8 * H, 12 * H);
        let (before, after) = a.subtracted(Interval::new(0, DAY));
        assert!(!before.is_valid());
        assert!(!after.is_valid());
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(8 * H, 17 * H).to_string(), "Mon 08:00-17:00");
        assert_eq!(
            Interval::new(6 * DAY + 22 * H, 7 * DAY + 3 * H).to_string(),
            "Sun 22:00-03:00+1"
        );
        assert_eq!(Interval::new(DAY, 2 * DAY).to_string(), "Tue 00:00-24:00");
        assert_eq!(Interval::new(5, 5).to_string(), "-");
    }

    #[test]
    fn test_format_week_time() {
        assert_eq!(format_week_time(8 * H + 1800), "Mon 08:30");
        assert_eq!(format_week_time(6 * DAY + 23 * H), "Sun 23:00");
        assert_eq!(format_week_time(WEEK + 9 * H), "Mon 09:00");
        assert_eq!(format_week_time(-H), "Sun 23:00");
    }

    #[test]
    fn test_serde_as_pair() {
        let json = serde_json::to_string(&Interval::new(1, 2)).unwrap();
        assert_eq!(json, "[1,2]");
        let back: Interval = serde_json::from_str("[3,4]").unwrap();
        assert_eq!(back, Interval::new(3, 4));
    }
}
