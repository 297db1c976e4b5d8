//! Timezone reference data as served by the settings backend.
//!
//! The catalog is used to validate a [`WorkingHours`](crate::hours::WorkingHours)
//! timezone id and to label it for display. Offsets are never applied to
//! interval arithmetic.

use serde::{Deserialize, Serialize};

use crate::interval::Seconds;

/// One selectable timezone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timezone {
    /// Catalog id, e.g. `"Europe/Berlin"`.
    pub id: String,
    /// Display name, e.g. `"Berlin"`.
    pub name: String,
    /// Current offset from UTC in seconds.
    pub utc_offset: Seconds,
}

impl Timezone {
    /// Label for pickers, e.g. `"(UTC+01:00) Berlin"`.
    pub fn label(&self) -> String {
        format!("(UTC{}) {}", format_utc_offset(self.utc_offset), self.name)
    }
}

/// The catalog of selectable timezones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timezones {
    pub list: Vec<Timezone>,
}

impl Timezones {
    pub fn new(list: Vec<Timezone>) -> Self {
        Self { list }
    }

    pub fn find(&self, id: &str) -> Option<&Timezone> {
        self.list.iter().find(|timezone| timezone.id == id)
    }
}

/// Format an offset as `+HH:MM` / `-HH:MM`.
fn format_utc_offset(offset_secs: Seconds) -> String {
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
