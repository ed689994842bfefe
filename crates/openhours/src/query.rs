//! Queries against a [`Schedule`]: membership, next transition, and the
//! earliest start that fits a duration.
//!
//! All three project the real timestamp onto the reference week, locate the
//! first boundary strictly after it, and read the state from that index's
//! parity: odd means the next boundary is a close, so the timestamp is open.
//! Durations found on the reference week are wall-clock durations and are
//! corrected for any UTC offset change before being applied to the real
//! timestamp.

use chrono::{DateTime, TimeDelta, TimeZone};

use crate::schedule::Schedule;
use crate::week::{week, WeekInstant};
use crate::zone::correct_for_offset_change;

/// Current state and the elapsed time until it flips.
///
/// [`Schedule::next_transition`] returns this wrapped in an `Option`: a
/// schedule that never flips (empty, or open around the clock) has no
/// transition to report, so it yields `None` rather than a zero duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub is_open: bool,
    pub after: TimeDelta,
}

/// A [`Transition`] resolved to a real timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextChange<Z: TimeZone> {
    pub is_open: bool,
    pub at: DateTime<Z>,
}

impl Schedule {
    /// Index of the first boundary strictly after `x`.
    fn index_after(&self, x: WeekInstant) -> usize {
        self.boundaries.partition_point(|b| *b <= x)
    }

    /// Close boundary at odd index `i`. A close at the week end that runs on
    /// into a window opening at the week start is followed through to that
    /// window's close, one week later.
    fn close_at(&self, i: usize) -> WeekInstant {
        let close = self.boundaries[i];
        if i + 1 == self.boundaries.len() && self.wraps() {
            close + self.boundaries[1].offset()
        } else {
            close
        }
    }

    /// Whether `t` falls inside an open window. Opening instants are open,
    /// closing instants are closed.
    pub fn is_open<Z: TimeZone>(&self, t: &DateTime<Z>) -> bool {
        self.index_after(WeekInstant::project(t)) % 2 == 1
    }

    /// State at `t` and how long until it changes.
    ///
    /// Returns `None` when the state never changes: the schedule is empty or
    /// open around the clock.
    pub fn next_transition<Z: TimeZone>(&self, t: &DateTime<Z>) -> Option<Transition> {
        if self.boundaries.is_empty() || self.is_always_open() {
            return None;
        }

        let x = WeekInstant::project(t);
        let i = self.index_after(x);
        let is_open = i % 2 == 1;
        let next = if i == self.boundaries.len() {
            // past the last close, wrap to the first open next week
            self.boundaries[0] + week()
        } else if is_open {
            self.close_at(i)
        } else {
            self.boundaries[i]
        };

        Some(Transition {
            is_open,
            after: correct_for_offset_change(t, next - x),
        })
    }

    /// Like [`Schedule::next_transition`], as the timestamp of the change.
    pub fn next_transition_time<Z: TimeZone>(&self, t: &DateTime<Z>) -> Option<NextChange<Z>> {
        self.next_transition(t).map(|tr| NextChange {
            is_open: tr.is_open,
            at: t.clone() + tr.after,
        })
    }

    /// Earliest time at or after `t` from which `duration` can be spent in a
    /// single open window without hitting its close.
    ///
    /// If `t` is open and the current window has room, that is `t` itself.
    /// Otherwise the answer is the opening of the first later window long
    /// enough, searching one full week ahead. `None` if no window is.
    pub fn when<Z: TimeZone>(&self, t: &DateTime<Z>, duration: TimeDelta) -> Option<DateTime<Z>> {
        if self.boundaries.is_empty() {
            return None;
        }
        if self.is_always_open() {
            return Some(t.clone());
        }

        let len = self.boundaries.len();
        let x = WeekInstant::project(t);
        let mut i = self.index_after(x);
        if i % 2 == 1 {
            if duration <= self.close_at(i) - x {
                return Some(t.clone());
            }
            i += 2;
        } else {
            i += 1;
        }

        // `i` now indexes the close of the first candidate window; indices
        // past `len` belong to the following week.
        for step in 0..len / 2 {
            let idx = i + 2 * step;
            let local = idx % len;
            if local == 1 && self.wraps() {
                continue;
            }
            let open = self.boundaries[local - 1];
            if self.close_at(local) - open < duration {
                continue;
            }
            let shift = week() * (idx / len) as i32;
            let wall = open + shift - x;
            return Some(t.clone() + correct_for_offset_change(t, wall));
        }

        None
    }
}
