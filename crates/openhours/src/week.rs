//! The reference week: a synthetic coordinate system for weekday + time-of-day.
//!
//! Every schedule boundary is a [`WeekInstant`], an offset from Sunday 00:00 of
//! a week that belongs to no calendar year. Real timestamps are projected onto
//! it by their weekday and wall-clock time, which lets ordinary ordering and
//! subtraction do all the weekday arithmetic.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Weekday};
use serde::{Serialize, Serializer};

const SECONDS_PER_DAY: i64 = 86_400;
const DAYS_PER_WEEK: i64 = 7;

/// Length of the reference week.
pub fn week() -> TimeDelta {
    TimeDelta::seconds(SECONDS_PER_DAY * DAYS_PER_WEEK)
}

/// A wall-clock time of day as written in a schedule.
///
/// `hour` keeps the raw value from the text, so `26:00` stays 26 and rolls the
/// boundary into the next day when it is placed on the reference week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
    };

    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Offset of this time from the start of its day.
    pub fn since_midnight(&self) -> TimeDelta {
        TimeDelta::seconds(
            i64::from(self.hour) * 3_600 + i64::from(self.minute) * 60 + i64::from(self.second),
        )
    }
}

/// A position on the reference week, measured from Sunday 00:00.
///
/// Schedule boundaries live in `[WeekInstant::start(), WeekInstant::end()]`;
/// query code may shift positions by whole weeks while searching forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekInstant(TimeDelta);

impl Default for WeekInstant {
    fn default() -> Self {
        Self::start()
    }
}

impl WeekInstant {
    /// Sunday 00:00, the origin of the reference week.
    pub fn start() -> Self {
        Self(TimeDelta::zero())
    }

    /// The following Sunday 00:00.
    pub fn end() -> Self {
        Self(week())
    }

    pub fn from_offset(offset: TimeDelta) -> Self {
        Self(offset)
    }

    /// Place `time` on `weekday`. Hours of 24 or more spill into the next day.
    pub fn new(weekday: Weekday, time: TimeOfDay) -> Self {
        let day = TimeDelta::days(i64::from(weekday.num_days_from_sunday()));
        Self(day + time.since_midnight())
    }

    /// Project a real timestamp onto the reference week using its weekday and
    /// wall-clock time in its own timezone. Sub-second precision is kept.
    pub fn project<Tz: TimeZone>(t: &DateTime<Tz>) -> Self {
        let day = TimeDelta::days(i64::from(t.weekday().num_days_from_sunday()));
        let time = t.time();
        let seconds = TimeDelta::seconds(i64::from(time.num_seconds_from_midnight()));
        let nanos = TimeDelta::nanoseconds(i64::from(time.nanosecond()));
        Self(day + seconds + nanos)
    }

    pub fn offset(&self) -> TimeDelta {
        self.0
    }

    /// Weekday this position falls on, counting a position past the week end
    /// as the following week.
    pub fn weekday(&self) -> Weekday {
        let day = self.0.num_days().rem_euclid(DAYS_PER_WEEK);
        weekday_from_sunday(day as u32)
    }

    /// Hours, minutes and seconds within the day of this position.
    pub fn hms(&self) -> (u32, u32, u32) {
        let secs = self.0.num_seconds().rem_euclid(SECONDS_PER_DAY) as u32;
        (secs / 3_600, secs % 3_600 / 60, secs % 60)
    }

    /// `HH:MM` rendering of the time of day.
    pub fn clock(&self) -> String {
        let (h, m, _) = self.hms();
        format!("{:02}:{:02}", h, m)
    }
}

impl Add<TimeDelta> for WeekInstant {
    type Output = WeekInstant;

    fn add(self, rhs: TimeDelta) -> WeekInstant {
        WeekInstant(self.0 + rhs)
    }
}

impl Sub<TimeDelta> for WeekInstant {
    type Output = WeekInstant;

    fn sub(self, rhs: TimeDelta) -> WeekInstant {
        WeekInstant(self.0 - rhs)
    }
}

impl Sub for WeekInstant {
    type Output = TimeDelta;

    fn sub(self, rhs: WeekInstant) -> TimeDelta {
        self.0 - rhs.0
    }
}

impl fmt::Display for WeekInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", weekday_name(self.weekday()), self.clock())
    }
}

impl Serialize for WeekInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Weekday `n` days after Sunday.
pub fn weekday_from_sunday(n: u32) -> Weekday {
    match n % 7 {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

/// English name of a weekday, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
