//! A business's weekly working hours: an interval set bound to a timezone id.

use serde::{Deserialize, Serialize};

use crate::day::{extract_day_intervals, remove_day_intervals, replace_day_intervals, DayIndex};
use crate::error::{HoursError, Result};
use crate::interval::Seconds;
use crate::intervals::IntervalSet;
use crate::timezone::{Timezone, Timezones};

/// Weekly hours in the business's local time.
///
/// The timezone id is opaque here: it is carried and compared but interval
/// offsets are already local to it. Hours without a timezone id count as
/// "not set" ([`WorkingHours::is_set`]).
///
/// Persisted as `{"intervals": [[start, end], ...], "timezone_id": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub intervals: IntervalSet,
    #[serde(default)]
    pub timezone_id: String,
}

impl WorkingHours {
    pub fn new(intervals: impl Into<IntervalSet>, timezone_id: impl Into<String>) -> Self {
        Self {
            intervals: intervals.into(),
            timezone_id: timezone_id.into(),
        }
    }

    pub fn is_set(&self) -> bool {
        !self.timezone_id.is_empty()
    }

    /// Same hours with the intervals in canonical form.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            intervals: self.intervals.normalized(),
            timezone_id: self.timezone_id.clone(),
        }
    }

    /// Day-local intervals of `day`. Expects normalized hours.
    pub fn day(&self, day: DayIndex) -> IntervalSet {
        extract_day_intervals(&self.intervals, day)
    }

    /// Hours with `day` replaced by the day-local `replacement`.
    #[must_use]
    pub fn with_day(&self, day: DayIndex, replacement: IntervalSet) -> Self {
        Self {
            intervals: replace_day_intervals(&self.intervals, day, replacement),
            timezone_id: self.timezone_id.clone(),
        }
    }

    /// Hours with `day` closed.
    #[must_use]
    pub fn without_day(&self, day: DayIndex) -> Self {
        Self {
            intervals: remove_day_intervals(&self.intervals, day),
            timezone_id: self.timezone_id.clone(),
        }
    }

    /// See [`IntervalSet::is_open_at`].
    pub fn is_open_at(&self, t: Seconds) -> bool {
        self.intervals.is_open_at(t)
    }

    /// See [`IntervalSet::next_open`].
    pub fn next_open(&self, t: Seconds) -> Option<Seconds> {
        self.intervals.next_open(t)
    }

    /// See [`IntervalSet::next_close`].
    pub fn next_close(&self, t: Seconds) -> Option<Seconds> {
        self.intervals.next_close(t)
    }

    /// Look the timezone id up in `catalog`.
    ///
    /// # Errors
    ///
    /// [`HoursError::MissingTimezone`] when no id is set,
    /// [`HoursError::UnknownTimezone`] when the catalog does not list it.
    pub fn validate<'a>(&self, catalog: &'a Timezones) -> Result<&'a Timezone> {
        if !self.is_set() {
            return Err(HoursError::MissingTimezone);
        }
        catalog
            .find(&self.timezone_id)
            .ok_or_else(|| HoursError::UnknownTimezone(format!("'{}'", self.timezone_id)))
    }

    /// Load persisted hours, healing unsorted or overlapping intervals.
    ///
    /// # Errors
    ///
    /// [`HoursError::Json`] if `json` is not a valid persisted form.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Self = serde_json::from_str(json)?;
        let normalized = raw.normalized();
        if normalized != raw {
            tracing::debug!(
                timezone_id = %raw.timezone_id,
                stored = raw.intervals.len(),
                normalized = normalized.intervals.len(),
                "healed non-canonical working hours on load"
            );
        }
        Ok(normalized)
    }

    /// Persisted form of the normalized hours.
    ///
    /// # Errors
    ///
    /// [`HoursError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.normalized())?)
    }
}
