//! Tests for membership and next-transition queries, including DST changes.
//!
//! Europe/London is used throughout: in 2019 clocks went forward at 01:00 on
//! 31 March and back at 02:00 on 27 October.

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use chrono_tz::{Europe::London, Tz};
use openhours::{Schedule, Transition};

fn london(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Tz> {
    London
        .with_ymd_and_hms(2019, month, day, hour, minute, 0)
        .unwrap()
}

fn transition(is_open: bool, after: TimeDelta) -> Option<Transition> {
    Some(Transition { is_open, after })
}

// ── Membership ──────────────────────────────────────────────────────────────

#[test]
fn single_window_boundaries() {
    // 2019-03-04 is a Monday.
    let s = Schedule::parse_must("mo 08:00-18:00");
    assert!(s.is_open(&london(3, 4, 8, 0)), "start is inclusive");
    assert!(s.is_open(&london(3, 4, 17, 59)));
    assert!(!s.is_open(&london(3, 4, 18, 0)), "end is exclusive");
    assert!(!s.is_open(&london(3, 4, 7, 59)));
    assert!(!s.is_open(&london(3, 4, 19, 0)));
    assert!(!s.is_open(&london(3, 5, 9, 0)), "tuesday");
}

#[test]
fn two_windows_with_lunch_break() {
    let s = Schedule::parse_must("mo 08:00-12:00,13:00-17:00");
    for (h, m) in [(8, 0), (9, 0), (13, 0), (15, 0)] {
        assert!(s.is_open(&london(3, 4, h, m)), "{h}:{m:02} should be open");
    }
    for (h, m) in [(12, 30), (17, 59), (17, 0), (12, 0), (7, 0), (19, 0)] {
        assert!(!s.is_open(&london(3, 4, h, m)), "{h}:{m:02} should be closed");
    }
}

#[test]
fn projection_uses_the_timestamps_own_zone() {
    let s = Schedule::parse_must("mo 08:00-18:00");
    // Monday 07:30 UTC is Monday 08:30 at UTC+1.
    let plus_one = FixedOffset::east_opt(3600).unwrap();
    let t = plus_one.with_ymd_and_hms(2019, 3, 4, 8, 30, 0).unwrap();
    assert!(s.is_open(&t));
    assert!(!s.is_open(&t.with_timezone(&chrono::Utc)));
}

// ── Next transition ─────────────────────────────────────────────────────────

#[test]
fn next_transition_around_one_window() {
    let s = Schedule::parse_must("mo 08:00-18:00");
    let cases = [
        (london(3, 4, 7, 0), false, TimeDelta::hours(1)),
        (london(3, 4, 8, 0), true, TimeDelta::hours(10)),
        (london(3, 4, 9, 0), true, TimeDelta::hours(9)),
        (london(3, 4, 17, 0), true, TimeDelta::hours(1)),
        (london(3, 4, 18, 0), false, TimeDelta::weeks(1) - TimeDelta::hours(10)),
        (london(3, 5, 8, 0), false, TimeDelta::days(6)),
    ];
    for (t, is_open, after) in cases {
        assert_eq!(s.next_transition(&t), transition(is_open, after), "at {t}");
    }
}

#[test]
fn next_transition_wraps_past_week_end() {
    // 2019-03-09 is a Saturday; next opening is Monday 08:00.
    let s = Schedule::parse_must("mo-fr 08:00-18:00");
    assert_eq!(
        s.next_transition(&london(3, 9, 12, 0)),
        transition(false, TimeDelta::hours(44))
    );
}

#[test]
fn spring_forward_shortens_the_wait() {
    let s = Schedule::parse_must("su 03:00-05:00");
    assert_eq!(
        s.next_transition(&london(3, 31, 0, 0)),
        transition(false, TimeDelta::hours(2))
    );
}

#[test]
fn fall_back_lengthens_the_wait() {
    let s = Schedule::parse_must("su 03:00-05:00");
    assert_eq!(
        s.next_transition(&london(10, 27, 0, 0)),
        transition(false, TimeDelta::hours(4))
    );
}

#[test]
fn next_transition_time_lands_on_wall_clock_boundary() {
    let s = Schedule::parse_must("su 03:00-05:00");
    let cases = [
        (london(3, 31, 0, 0), london(3, 31, 3, 0)),
        (london(10, 27, 0, 0), london(10, 27, 3, 0)),
    ];
    for (t, expected) in cases {
        let change = s.next_transition_time(&t).unwrap();
        assert!(!change.is_open);
        assert_eq!(change.at, expected);
    }
}

#[test]
fn closing_after_midnight_both_notations() {
    // 2019-03-04 is a Monday.
    for input in ["mo 22:00-02:00", "mo 22:00-26:00"] {
        let s = Schedule::parse_must(input);
        let cases = [
            (london(3, 4, 21, 0), false),
            (london(3, 4, 22, 0), true),
            (london(3, 4, 23, 0), true),
            (london(3, 5, 2, 0), false),
            (london(3, 5, 3, 0), false),
        ];
        for (t, want) in cases {
            let tr = s.next_transition(&t).unwrap();
            assert_eq!(tr.is_open, want, "{input} at {t}");
            assert_eq!(s.is_open(&t), want, "{input} at {t}");
        }
        assert_eq!(
            s.next_transition(&london(3, 4, 23, 0)),
            transition(true, TimeDelta::hours(3))
        );
    }
}

#[test]
fn saturday_night_continues_into_sunday() {
    // 2019-03-09 is a Saturday.
    let s = Schedule::parse_must("sa 22:00-02:00; mo 09:00-17:00");
    assert!(s.is_open(&london(3, 10, 1, 0)));
    assert!(!s.is_open(&london(3, 10, 2, 0)));
    assert_eq!(
        s.next_transition(&london(3, 9, 22, 0)),
        transition(true, TimeDelta::hours(4))
    );
    assert_eq!(
        s.next_transition(&london(3, 10, 1, 0)),
        transition(true, TimeDelta::hours(1))
    );
    assert_eq!(
        s.next_transition(&london(3, 10, 2, 0)),
        transition(false, TimeDelta::hours(31))
    );
}
