//! # hours-engine
//!
//! Weekly business hours as interval algebra.
//!
//! A business's hours are a set of half-open second intervals on one
//! repeating Monday-to-Sunday cycle, plus an opaque timezone id. This crate
//! puts such sets into a canonical form, splits a week into per-day views for
//! editing, folds edited days back in, and answers open/closed queries.
//!
//! ## Modules
//!
//! - [`interval`] — Interval primitive and week constants
//! - [`intervals`] — Interval sets, normalization and the week seam, open/close queries
//! - [`day`] — Day index, per-day extraction, removal and replacement
//! - [`hours`] — `WorkingHours` value and its persisted form
//! - [`timezone`] — Timezone catalog reference data
//! - [`business`] — Business location, details and automation recipients
//! - [`error`] — Error types

pub mod business;
pub mod day;
pub mod error;
pub mod hours;
pub mod interval;
pub mod intervals;
pub mod timezone;

pub use business::{
    BusinessChatType, BusinessChatTypes, BusinessChats, BusinessDetails, BusinessLocation,
    BusinessRecipients, ChatContext, LocationPoint, UserId,
};
pub use day::{
    extract_day_intervals, parse_clock, parse_day_interval, remove_day_intervals,
    replace_day_intervals, week_offset, DayIndex,
};
pub use error::HoursError;
pub use hours::WorkingHours;
pub use interval::{format_week_time, Interval, Seconds, DAY, MAX_SPILL, WEEK};
pub use intervals::IntervalSet;
pub use timezone::{Timezone, Timezones};
