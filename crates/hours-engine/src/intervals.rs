//! Interval sets over the weekly cycle and their canonical form.
//!
//! An [`IntervalSet`] as entered by a user (or loaded from storage) may be
//! unsorted, overlapping, contain empty intervals, or contain spans crossing
//! the week seam. [`IntervalSet::normalized`] reduces it to the canonical
//! form:
//!
//! - sorted ascending by `start`;
//! - no two intervals overlap or touch;
//! - every covered second lies in `[0, WEEK + MAX_SPILL)`, so an end may
//!   equal `WEEK + MAX_SPILL`;
//! - at most one *wraparound* interval (starting before [`WEEK`] and ending
//!   after it), used when coverage that starts late on Sunday continues for
//!   at most [`MAX_SPILL`] into Monday.
//!
//! Normalization preserves coverage of the circular week and is idempotent.

use serde::{Deserialize, Serialize};

use crate::interval::{Interval, Seconds, MAX_SPILL, WEEK};

/// An ordered list of intervals, not necessarily canonical.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalSet {
    pub list: Vec<Interval>,
}

impl IntervalSet {
    pub fn new(list: Vec<Interval>) -> Self {
        Self { list }
    }

    /// Whether any contained interval covers anything.
    pub fn is_active(&self) -> bool {
        self.list.iter().any(Interval::is_valid)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The canonical form of this set. See the module docs.
    ///
    /// ```
    /// use hours_engine::interval::{Interval, WEEK};
    /// use hours_engine::intervals::IntervalSet;
    ///
    /// const H: i32 = 3600;
    /// let set = IntervalSet::new(vec![
    ///     Interval::new(0, 3 * H),
    ///     Interval::new(WEEK - 2 * H, WEEK + H),
    /// ]);
    /// assert_eq!(
    ///     set.normalized().list,
    ///     vec![Interval::new(WEEK - 2 * H, WEEK + 3 * H)],
    /// );
    /// ```
    #[must_use]
    pub fn normalized(&self) -> Self {
        let Some(reduced) = reduce_to_week(&self.list) else {
            return Self::new(vec![Interval::new(0, WEEK)]);
        };
        Self::new(join_week_seam(sort_and_merge(reduced)))
    }

    /// Whether week offset `t` (taken modulo [`WEEK`]) is covered.
    ///
    /// Expects a normalized set.
    pub fn is_open_at(&self, t: Seconds) -> bool {
        let t = t.rem_euclid(WEEK);
        self.list
            .iter()
            .any(|interval| interval.contains(t) || interval.contains(t + WEEK))
    }

    /// The first offset at or after `t` at which the set is open.
    ///
    /// The result is on the same timeline as `t` (not reduced modulo the
    /// week) and equals `t` when already open. `None` for an empty set.
    /// Expects a normalized set.
    pub fn next_open(&self, t: Seconds) -> Option<Seconds> {
        let local = t.rem_euclid(WEEK);
        let base = t - local;
        let mut best: Option<Seconds> = None;
        for interval in self.with_week_images() {
            if interval.contains(local) {
                return Some(t);
            }
            if interval.start > local {
                best = Some(best.map_or(interval.start, |b| b.min(interval.start)));
            }
        }
        best.map(|start| base + start)
    }

    /// The first offset after `t` at which the set closes.
    ///
    /// `None` for an empty set and for round-the-clock coverage.
    /// Expects a normalized set.
    pub fn next_close(&self, t: Seconds) -> Option<Seconds> {
        if !self.is_active() || self.total_open_seconds() >= i64::from(WEEK) {
            return None;
        }
        let local = t.rem_euclid(WEEK);
        let base = t - local;
        self.with_week_images()
            .map(|interval| interval.end)
            .filter(|&end| end > local && !self.is_open_at(end))
            .min()
            .map(|end| base + end)
    }

    /// Total covered seconds. Expects a normalized set.
    pub fn total_open_seconds(&self) -> i64 {
        self.list.iter().map(Interval::duration).sum()
    }

    /// Every valid interval together with its copies one week earlier and later.
    fn with_week_images(&self) -> impl Iterator<Item = Interval> + '_ {
        self.list
            .iter()
            .filter(|interval| interval.is_valid())
            .flat_map(|interval| [-WEEK, 0, WEEK].map(|offset| interval.shifted(offset)))
    }
}

impl From<Vec<Interval>> for IntervalSet {
    fn from(list: Vec<Interval>) -> Self {
        Self::new(list)
    }
}

impl FromIterator<Interval> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

/// Drop empty intervals and move the rest onto `[0, WEEK)`, splitting the ones
/// that cross the seam.
///
/// Returns `None` when some interval alone covers the whole week.
fn reduce_to_week(list: &[Interval]) -> Option<Vec<Interval>> {
    let mut result = Vec::with_capacity(list.len() + 1);
    for interval in list.iter().filter(|interval| interval.is_valid()) {
        if interval.duration() >= i64::from(WEEK) {
            return None;
        }
        // Rebuilt from the duration: the shift itself may not fit in `Seconds`.
        let start = interval.start.rem_euclid(WEEK);
        let moved = Interval::new(start, start + interval.duration() as Seconds);
        if moved.end > WEEK {
            result.push(Interval::new(moved.start, WEEK));
            result.push(Interval::new(0, moved.end - WEEK));
        } else {
            result.push(moved);
        }
    }
    Some(result)
}

/// Sort by start (then end) and merge overlapping or touching neighbours.
///
/// Linear only: knows nothing about the week seam. Also used on day-local
/// lists.
pub(crate) fn sort_and_merge(mut list: Vec<Interval>) -> Vec<Interval> {
    list.retain(Interval::is_valid);
    list.sort_unstable_by_key(|interval| (interval.start, interval.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(list.len());
    for interval in list {
        match merged.last_mut() {
            // Sorted order guarantees `last` and `interval` overlap or touch here.
            Some(last) if interval.start <= last.end => *last = last.united(interval),
            _ => merged.push(interval),
        }
    }
    merged
}

/// Fold a short Monday-morning interval into a Sunday interval that runs up to
/// the seam, producing one wraparound interval.
///
/// Expects the output of [`sort_and_merge`] over `[0, WEEK]`. The fold only
/// happens when the Monday part is at most [`MAX_SPILL`] long, so the
/// wraparound never ends past `WEEK + MAX_SPILL` and its covered seconds stay
/// below that bound. Longer runs stay split at the seam, and the Monday part
/// is then Monday's own interval for day editing.
fn join_week_seam(mut list: Vec<Interval>) -> Vec<Interval> {
    if list.len() < 2 {
        return list;
    }
    let (first, last) = (list[0], list[list.len() - 1]);
    if first.start == 0 && last.end == WEEK && first.end <= MAX_SPILL {
        list.remove(0);
        if let Some(tail) = list.last_mut() {
            *tail = last.united(first.shifted(WEEK));
        }
    }
    list
}
