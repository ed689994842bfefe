//! Canonical weekly schedule: an even, strictly ascending list of boundaries on
//! the reference week, where `[2k, 2k+1]` are open windows.
//!
//! Text goes through [`crate::grammar`], every (day, range) pair becomes one
//! window, and the merge step sorts and coalesces windows until none overlap
//! or touch. Windows that run past the end of the week are split at the week
//! end and continue from the week start, so all boundaries stay inside one
//! week.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, TimeZone};
use serde::Serialize;
use tracing::debug;

use crate::error::{OpenHoursError, Result};
use crate::grammar;
use crate::week::{week, weekday_name, WeekInstant};

/// One contiguous open period on the reference week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub open: WeekInstant,
    pub close: WeekInstant,
}

impl Window {
    pub fn new(open: WeekInstant, close: WeekInstant) -> Self {
        Self { open, close }
    }

    pub fn length(&self) -> TimeDelta {
        self.close - self.open
    }
}

impl fmt::Display for Window {
    /// `"Monday 10:00 - 15:00"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            weekday_name(self.open.weekday()),
            self.open.clock(),
            self.close.clock()
        )
    }
}

/// A recurring weekly open/closed schedule.
///
/// Immutable once built, except through [`Schedule::add`], which needs
/// `&mut self`; share it across threads freely for queries. The default
/// schedule has no windows and is always closed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub(crate) boundaries: Vec<WeekInstant>,
}

impl Schedule {
    /// Parse a definition such as `"mo-fr 09:00-17:00; sa 10:00-14:00"`.
    ///
    /// An empty definition means open all week. Unknown day codes and
    /// malformed times are dropped rather than rejected.
    ///
    /// # Errors
    /// Returns `OpenHoursError::InvalidFormat` for structural problems: a
    /// clause without time ranges, or a range that is not `start-end`.
    pub fn parse(input: &str) -> Result<Self> {
        let clauses = grammar::parse(input)?;

        let mut windows = Vec::new();
        for clause in &clauses {
            for range in &clause.ranges {
                for &day in &clause.days {
                    let open = WeekInstant::new(day, range.start);
                    let mut close = WeekInstant::new(day, range.end);
                    if range.start > range.end {
                        // closes after midnight
                        close = close + TimeDelta::days(1);
                    }
                    windows.push(Window::new(open, close));
                }
            }
        }

        let schedule = Self::from_windows(windows);
        debug!(
            input,
            windows = schedule.boundaries.len() / 2,
            "parsed schedule"
        );
        Ok(schedule)
    }

    /// Like [`Schedule::parse`], for definitions known to be well formed.
    ///
    /// # Panics
    /// Panics if the definition has a structural error.
    pub fn parse_must(input: &str) -> Self {
        match Self::parse(input) {
            Ok(schedule) => schedule,
            Err(e) => panic!("invalid schedule {:?}: {}", input, e),
        }
    }

    /// Build a schedule from arbitrary, possibly overlapping windows.
    pub fn from_windows<I>(windows: I) -> Self
    where
        I: IntoIterator<Item = Window>,
    {
        let merged = merge(windows.into_iter().flat_map(fold_into_week).collect());
        Self {
            boundaries: merged.iter().flat_map(|w| [w.open, w.close]).collect(),
        }
    }

    /// Add the window between two real timestamps and re-merge.
    ///
    /// The window starts at the projection of `open` and lasts the wall-clock
    /// time between the two, capped at one week. A `close` at or before `open`
    /// leaves the schedule unchanged. Every call rebuilds the whole boundary
    /// list, which is fine for the tens of windows a schedule usually holds.
    pub fn add<Z: TimeZone>(&mut self, open: &DateTime<Z>, close: &DateTime<Z>) {
        let length = (close.naive_local() - open.naive_local()).min(week());
        if length <= TimeDelta::zero() {
            debug!("ignoring empty window");
            return;
        }

        let start = WeekInstant::project(open);
        let mut windows = self.windows();
        windows.push(Window::new(start, start + length));
        *self = Self::from_windows(windows);
    }

    /// Owned variant of [`Schedule::add`].
    pub fn with_window<Z: TimeZone>(mut self, open: &DateTime<Z>, close: &DateTime<Z>) -> Self {
        self.add(open, close);
        self
    }

    pub fn boundaries(&self) -> &[WeekInstant] {
        &self.boundaries
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Open windows in reference-week order.
    ///
    /// A window running past Saturday 24:00 is stored as two pieces; it is
    /// returned once, in the place of its Saturday piece, with a close past
    /// [`WeekInstant::end`].
    pub fn windows(&self) -> Vec<Window> {
        let mut windows: Vec<Window> = self
            .boundaries
            .chunks_exact(2)
            .map(|pair| Window::new(pair[0], pair[1]))
            .collect();

        if self.wraps() {
            let head = windows.remove(0);
            if let Some(last) = windows.last_mut() {
                last.close = last.close + head.close.offset();
            }
        }
        windows
    }

    /// One `"<Weekday> <HH:MM> - <HH:MM>"` line per window.
    pub fn lines(&self) -> Vec<String> {
        self.windows().iter().map(Window::to_string).collect()
    }

    /// Open around the clock: a single window covering the whole week.
    pub(crate) fn is_always_open(&self) -> bool {
        self.boundaries == [WeekInstant::start(), WeekInstant::end()]
    }

    /// The last window ends at the week end and the first starts at the week
    /// start, so the two are one window split across the week boundary.
    pub(crate) fn wraps(&self) -> bool {
        self.boundaries.len() > 2
            && self.boundaries.first() == Some(&WeekInstant::start())
            && self.boundaries.last() == Some(&WeekInstant::end())
    }
}

impl FromStr for Schedule {
    type Err = OpenHoursError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Drop empty windows and bring the rest inside `[start, end]` of the week.
///
/// A window opening on or after the week end is moved back a week; one that
/// closes past the week end is split in two.
fn fold_into_week(window: Window) -> Vec<Window> {
    let Window { mut open, mut close } = window;
    if close <= open {
        return Vec::new();
    }
    if close - open >= week() {
        return vec![Window::new(WeekInstant::start(), WeekInstant::end())];
    }
    while open >= WeekInstant::end() {
        open = open - week();
        close = close - week();
    }

    if close <= WeekInstant::end() {
        vec![Window::new(open, close)]
    } else {
        vec![
            Window::new(open, WeekInstant::end()),
            Window::new(WeekInstant::start(), close - week()),
        ]
    }
}

/// Sort windows and coalesce any that overlap or touch.
fn merge(mut windows: Vec<Window>) -> Vec<Window> {
    windows.sort_by_key(|w| (w.open, w.close));

    let mut merged: Vec<Window> = Vec::with_capacity(windows.len());
    for window in windows {
        if let Some(last) = merged.last_mut() {
            if window.open <= last.close {
                // Overlapping or adjacent -- extend the current window.
                last.close = last.close.max(window.close);
                continue;
            }
        }
        merged.push(window);
    }
    merged
}
