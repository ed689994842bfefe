//! Timezone plumbing: offset drift correction and parsing helpers.
//!
//! Durations computed on the reference week are wall-clock durations. Across a
//! DST change the wall clock jumps, so [`correct_for_offset_change`] converts
//! them to elapsed time by comparing the UTC offset at both ends.

use chrono::{DateTime, NaiveDateTime, Offset, TimeDelta, TimeZone};
use chrono_tz::Tz;

use crate::error::{OpenHoursError, Result};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// UTC offset of `t` in seconds, east positive.
pub fn offset_seconds<Z: TimeZone>(t: &DateTime<Z>) -> i32 {
    t.offset().fix().local_minus_utc()
}

/// Turn a wall-clock duration starting at `t` into elapsed time.
///
/// Spring-forward inside the span shortens it (3 nominal hours become 2),
/// fall-back lengthens it.
pub fn correct_for_offset_change<Z: TimeZone>(t: &DateTime<Z>, wall: TimeDelta) -> TimeDelta {
    let later = t.clone() + wall;
    let drift = offset_seconds(t) - offset_seconds(&later);
    wall + TimeDelta::seconds(i64::from(drift))
}

/// Parse an IANA timezone name such as `"Europe/London"`.
///
/// # Errors
/// Returns `OpenHoursError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| OpenHoursError::InvalidTimezone(name.to_string()))
}

/// Parse a timestamp in `tz`.
///
/// RFC 3339 input (with an offset) is converted into `tz`; naive input such as
/// `"2019-03-04T08:00"` is read as wall-clock time in `tz`. An ambiguous local
/// time (fall-back) resolves to the earlier instant.
///
/// # Errors
/// Returns `OpenHoursError::InvalidDatetime` for unparseable text or a local
/// time that falls in a spring-forward gap.
pub fn parse_local_datetime(text: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(tz));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or_else(|| OpenHoursError::InvalidDatetime(text.to_string()))?;

    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        OpenHoursError::InvalidDatetime(format!("{} does not exist in {}", text, tz.name()))
    })
}
