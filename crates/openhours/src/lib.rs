//! # openhours
//!
//! Weekly opening-hours schedules with DST-aware transition and fit queries.
//!
//! A schedule is written as `"mo-fr 09:00-12:00,13:00-17:30; sa 10:00-02:00"`
//! and canonicalized into non-overlapping windows on a synthetic reference
//! week. Queries take any `chrono` timestamp, project it onto that week, and
//! convert the answers back to real time, correcting for UTC offset changes.
//!
//! ```rust
//! use chrono::{TimeDelta, TimeZone};
//! use openhours::Schedule;
//!
//! let hours: Schedule = "mo 10:00-15:00".parse().unwrap();
//! let london = openhours::parse_timezone("Europe/London").unwrap();
//! let monday = london.with_ymd_and_hms(2019, 3, 11, 9, 0, 0).unwrap();
//!
//! assert!(!hours.is_open(&monday));
//! let start = hours.when(&monday, TimeDelta::hours(4)).unwrap();
//! assert_eq!(start, london.with_ymd_and_hms(2019, 3, 11, 10, 0, 0).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`grammar`] -- schedule text → day selectors and time ranges
//! - [`week`] -- reference-week coordinates and timestamp projection
//! - [`schedule`] -- canonical boundary list, merging, incremental add
//! - [`query`] -- membership, next transition, duration fit
//! - [`zone`] -- UTC offset correction and timezone/datetime parsing
//! - [`error`] -- Error types

pub mod error;
pub mod grammar;
pub mod query;
pub mod schedule;
pub mod week;
pub mod zone;

pub use error::OpenHoursError;
pub use query::{NextChange, Transition};
pub use schedule::{Schedule, Window};
pub use week::{TimeOfDay, WeekInstant};
pub use zone::{parse_local_datetime, parse_timezone};
