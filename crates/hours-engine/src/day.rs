//! Per-day views of a week's hours, and editing one day at a time.
//!
//! Day views use **day-local** coordinates: offsets from that day's midnight.
//!
//! # Day window
//!
//! A day owns the intervals that *start* on it. Its window runs from its
//! midnight to [`MAX_SPILL`] past the following midnight, and the intervals it
//! owns are clipped to that window: Friday 20:00 to Saturday 03:00 shows up on
//! Friday as `20:00-27:00`, Friday 20:00 to Saturday 10:00 as `20:00-30:00`.
//! An interval that starts before a day's midnight never shows up on that
//! day, however far it runs into it.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};

use crate::error::{HoursError, Result};
use crate::interval::{Interval, Seconds, DAY, MAX_SPILL, WEEK};
use crate::intervals::{sort_and_merge, IntervalSet};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A weekday index, Monday = 0 through Sunday = 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayIndex(u8);

impl DayIndex {
    pub const MONDAY: Self = Self(0);
    pub const SUNDAY: Self = Self(6);

    /// `None` unless `index < 7`.
    pub fn new(index: usize) -> Option<Self> {
        (index < 7).then(|| Self(index as u8))
    }

    /// Wrap a caller-checked index.
    ///
    /// An index of 7 or more breaks the caller's contract; debug builds panic,
    /// release builds take it modulo 7.
    pub fn from_raw(index: usize) -> Self {
        debug_assert!(index < 7, "day index out of range: {index}");
        Self((index % 7) as u8)
    }

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    /// Week offset of this day's midnight.
    pub fn start(self) -> Seconds {
        Seconds::from(self.0) * DAY
    }

    /// All seven days, Monday first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..7).map(Self)
    }

    pub fn weekday(self) -> Weekday {
        WEEKDAYS[self.index()]
    }
}

impl From<Weekday> for DayIndex {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_monday() as u8)
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weekday())
    }
}

/// Accepts `0`..`6` or an English weekday name (`mon`, `Monday`, ...).
impl FromStr for DayIndex {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::new(index)
                .ok_or_else(|| HoursError::InvalidDay(format!("'{s}' is not in 0..=6")));
        }
        s.parse::<Weekday>()
            .map(Self::from)
            .map_err(|_| HoursError::InvalidDay(format!("'{s}'")))
    }
}

/// Week offset of `time` on `weekday`.
pub fn week_offset(weekday: Weekday, time: NaiveTime) -> Seconds {
    DayIndex::from(weekday).start() + time.num_seconds_from_midnight() as Seconds
}

/// Parse a day-local `HH:MM` clock reading.
///
/// Hours from 24 up to 30 denote the spillover after midnight, so `27:30` is
/// 03:30 the next morning. Anything past `DAY + MAX_SPILL` is rejected.
pub fn parse_clock(s: &str) -> Result<Seconds> {
    let invalid = || HoursError::InvalidTime(format!("'{s}'"));
    let (hours, minutes) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let (extra, hours) = if hours >= 24 {
        (DAY, hours - 24)
    } else {
        (0, hours)
    };
    let time = NaiveTime::parse_from_str(&format!("{hours:02}:{minutes}"), "%H:%M")
        .map_err(|_| invalid())?;
    let seconds = extra + time.num_seconds_from_midnight() as Seconds;
    if seconds > DAY + MAX_SPILL {
        return Err(invalid());
    }
    Ok(seconds)
}

/// Parse a day-local `HH:MM-HH:MM` range, e.g. `09:00-18:00` or `20:00-27:00`.
pub fn parse_day_interval(s: &str) -> Result<Interval> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| HoursError::InvalidTime(format!("'{s}' is not a HH:MM-HH:MM range")))?;
    let interval = Interval::new(parse_clock(start)?, parse_clock(end)?);
    if !interval.is_valid() {
        return Err(HoursError::InvalidTime(format!("'{s}' ends before it starts")));
    }
    Ok(interval)
}

/// The window of `day` in week coordinates.
fn day_window(day: DayIndex) -> Interval {
    Interval::new(day.start(), day.start() + DAY + MAX_SPILL)
}

/// The intervals of `day`, in day-local coordinates, sorted and merged.
///
/// Intervals starting on `day` are clipped to its window; intervals starting
/// earlier are left out. Round-the-clock hours show as `00:00-24:00` on every
/// day.
///
/// `intervals` is expected to be normalized; this is not re-checked.
///
/// ```
/// use hours_engine::day::{extract_day_intervals, DayIndex};
/// use hours_engine::interval::{Interval, DAY};
/// use hours_engine::intervals::IntervalSet;
///
/// const H: i32 = 3600;
/// // Tuesday 20:00 to Wednesday 02:00.
/// let week = IntervalSet::new(vec![Interval::new(DAY + 20 * H, 2 * DAY + 2 * H)]);
/// let tuesday = extract_day_intervals(&week, DayIndex::from_raw(1));
/// assert_eq!(tuesday.list, vec![Interval::new(20 * H, 26 * H)]);
/// assert!(!extract_day_intervals(&week, DayIndex::from_raw(2)).is_active());
/// ```
pub fn extract_day_intervals(intervals: &IntervalSet, day: DayIndex) -> IntervalSet {
    if intervals.iter().any(|interval| interval.duration() >= i64::from(WEEK)) {
        return IntervalSet::new(vec![Interval::new(0, DAY)]);
    }
    let window = day_window(day);
    let fragments = intervals
        .iter()
        .flat_map(|interval| [-WEEK, 0, WEEK].map(|offset| interval.shifted(offset)))
        .filter(|interval| interval.start >= window.start && interval.start < window.start + DAY)
        .map(|interval| interval.intersected(window))
        .filter(Interval::is_valid)
        .map(|fragment| fragment.shifted(-window.start))
        .collect();
    IntervalSet::new(sort_and_merge(fragments))
}

/// `intervals` with the whole window of `day` cut out, normalized.
///
/// Spans reaching into the window from either side keep their part outside
/// it, so clearing Friday also clears Saturday before 06:00.
pub fn remove_day_intervals(intervals: &IntervalSet, day: DayIndex) -> IntervalSet {
    let window = day_window(day);
    let cuts = [-WEEK, 0, WEEK].map(|offset| window.shifted(offset));
    let remaining = intervals
        .normalized()
        .list
        .into_iter()
        .flat_map(|interval| {
            cuts.iter().fold(vec![interval], |parts, &cut| {
                parts
                    .into_iter()
                    .flat_map(|part| {
                        let (before, after) = part.subtracted(cut);
                        [before, after]
                    })
                    .filter(Interval::is_valid)
                    .collect()
            })
        })
        .collect();
    IntervalSet::new(remaining).normalized()
}

/// Replace the window of `day` with `replacement`, normalized.
///
/// `replacement` is in day-local coordinates. It is merged and clipped to the
/// day window `[0, DAY + MAX_SPILL)` before going into the week, so a day edit
/// never writes outside that window.
///
/// Reading the day back gives the merged replacement, except when it starts
/// at `00:00` while the previous day stays open up to that midnight: the two
/// then form one span starting on the previous day.
pub fn replace_day_intervals(
    intervals: &IntervalSet,
    day: DayIndex,
    replacement: IntervalSet,
) -> IntervalSet {
    let window = Interval::new(0, DAY + MAX_SPILL);
    let added: Vec<Interval> = sort_and_merge(replacement.list)
        .into_iter()
        .map(|interval| interval.intersected(window))
        .filter(Interval::is_valid)
        .map(|interval| interval.shifted(day.start()))
        .collect();
    tracing::trace!(day = day.index(), added = added.len(), "replacing day intervals");

    let mut list = remove_day_intervals(intervals, day).list;
    list.extend(added);
    IntervalSet::new(list).normalized()
}
