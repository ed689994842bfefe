//! Schedule grammar -- turns `"mo-fr 08:00-12:00,13:00-17:00; sa 10:00-14:00"`
//! into day selectors and time ranges.
//!
//! Failures come in two tiers. A clause without a day/time separator, or a time
//! range that does not split into exactly two parts, fails the whole parse. An
//! unknown day code or a malformed time field does not: the day is dropped and
//! the time becomes `00:00:00`, and a `tracing` debug event records it.

use chrono::Weekday;
use tracing::debug;

use crate::error::{OpenHoursError, Result};
use crate::week::{weekday_from_sunday, TimeOfDay};

/// Two-letter day codes recognised in day selectors.
pub const DAY_CODES: [(&str, Weekday); 7] = [
    ("mo", Weekday::Mon),
    ("tu", Weekday::Tue),
    ("we", Weekday::Wed),
    ("th", Weekday::Thu),
    ("fr", Weekday::Fri),
    ("sa", Weekday::Sat),
    ("su", Weekday::Sun),
];

/// What an empty definition means: open around the clock.
pub const ALWAYS_OPEN: &str = "su-sa 00:00-24:00";

/// Raw hours at or above this are rejected; below it, `h % 24` is validated.
const MAX_RAW_HOUR: u32 = 48;

/// One `<start>-<end>` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// One `;`-separated clause: a set of days sharing the same time ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Distinct days in reference-week order (Sunday first).
    pub days: Vec<Weekday>,
    pub ranges: Vec<TimeRange>,
}

/// Trim, collapse whitespace runs, lowercase, and drop spaces around commas.
pub fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .replace(" ,", ",")
        .replace(", ", ",")
}

/// Look up a two-letter day code (already lowercased).
pub fn day_code(code: &str) -> Option<Weekday> {
    DAY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, day)| *day)
}

/// Expand a comma-separated day selector such as `"mo,we-fr,su"`.
///
/// Ranges whose end precedes their start wrap through the end of the week, so
/// `"fr-mo"` selects Friday, Saturday, Sunday and Monday. Unknown codes are
/// dropped.
pub fn parse_days(selector: &str) -> Vec<Weekday> {
    let mut selected = [false; 7];

    for term in selector.split(',') {
        match term.split_once('-') {
            None => match day_code(term) {
                Some(day) => selected[day.num_days_from_sunday() as usize] = true,
                None => debug!(term, "dropping unknown day code"),
            },
            Some((from, to)) => {
                let (Some(from), Some(to)) = (day_code(from), day_code(to)) else {
                    debug!(term, "dropping day range with unknown code");
                    continue;
                };
                let from = from.number_from_monday();
                let mut to = to.number_from_monday();
                if to < from {
                    to += 7;
                }
                for n in from..=to {
                    selected[(n % 7) as usize] = true;
                }
            }
        }
    }

    selected
        .iter()
        .enumerate()
        .filter(|(_, on)| **on)
        .map(|(n, _)| weekday_from_sunday(n as u32))
        .collect()
}

/// Parse `HH:MM` or `HH:MM:SS`.
///
/// The raw hour is preserved so that `26:00` can roll into the next day, but
/// it is validated as `hour % 24`. Anything malformed yields `00:00:00`.
pub fn parse_time(text: &str) -> TimeOfDay {
    match parse_time_fields(text) {
        Some(time) => time,
        None => {
            debug!(text, "invalid time, using 00:00:00");
            TimeOfDay::MIDNIGHT
        }
    }
}

fn parse_time_fields(text: &str) -> Option<TimeOfDay> {
    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() < 2 || fields.len() > 3 {
        return None;
    }

    let hour: u32 = fields[0].parse().ok()?;
    let minute: u32 = fields[1].parse().ok()?;
    let second: u32 = match fields.get(2) {
        Some(s) => s.parse().ok()?,
        None => 0,
    };

    if hour >= MAX_RAW_HOUR || minute > 59 || second > 59 {
        return None;
    }
    let checked = if hour > 24 { hour % 24 } else { hour };
    if checked == 24 && (minute > 0 || second > 0) {
        return None;
    }

    Some(TimeOfDay::new(hour, minute, second))
}

/// Parse a full schedule definition into clauses.
///
/// One trailing `;` is allowed. An empty definition, or a lone `;`, means
/// [`ALWAYS_OPEN`].
///
/// # Errors
/// Returns `OpenHoursError::InvalidFormat` when a clause lacks its time ranges
/// or a time range is not a `start-end` pair.
pub fn parse(input: &str) -> Result<Vec<Clause>> {
    let clean = normalize(input);
    let mut body = clean.strip_suffix(';').unwrap_or(&clean).trim_end();
    if body.is_empty() {
        body = ALWAYS_OPEN;
    }

    body.split(';').map(parse_clause).collect()
}

fn parse_clause(clause: &str) -> Result<Clause> {
    let mut fields = clause.split_whitespace();
    let (Some(days), Some(times)) = (fields.next(), fields.next()) else {
        return Err(OpenHoursError::InvalidFormat(format!(
            "clause '{}' needs days and time ranges",
            clause.trim()
        )));
    };
    if fields.next().is_some() {
        debug!(clause, "ignoring trailing fields in clause");
    }

    let ranges = times
        .split(',')
        .map(|term| {
            let parts: Vec<&str> = term.split('-').collect();
            match parts.as_slice() {
                [start, end] => Ok(TimeRange {
                    start: parse_time(start),
                    end: parse_time(end),
                }),
                _ => Err(OpenHoursError::InvalidFormat(format!(
                    "time range '{}' is not a start-end pair",
                    term
                ))),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Clause {
        days: parse_days(days),
        ranges,
    })
}
