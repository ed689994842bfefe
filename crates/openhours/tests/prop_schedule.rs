//! Property-based tests for schedule canonicalization and queries.
//!
//! These check invariants that must hold for *any* definition the grammar
//! accepts, not just the hand-picked cases in the other test files.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use openhours::{Schedule, WeekInstant};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_day() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("mo"),
        Just("tu"),
        Just("we"),
        Just("th"),
        Just("fr"),
        Just("sa"),
        Just("su"),
    ]
}

fn arb_day_term() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_day().prop_map(str::to_string),
        (arb_day(), arb_day()).prop_map(|(a, b)| format!("{}-{}", a, b)),
    ]
}

/// Hours up to 30 so that rollover closings are exercised.
fn arb_time() -> impl Strategy<Value = String> {
    (0u32..=30, prop_oneof![Just(0u32), Just(15), Just(30), Just(45)])
        .prop_map(|(h, m)| format!("{:02}:{:02}", h, m))
}

fn arb_clause() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(arb_day_term(), 1..=3),
        prop::collection::vec((arb_time(), arb_time()), 1..=3),
    )
        .prop_map(|(days, ranges)| {
            let ranges: Vec<String> = ranges
                .into_iter()
                .map(|(a, b)| format!("{}-{}", a, b))
                .collect();
            format!("{} {}", days.join(","), ranges.join(","))
        })
}

fn arb_clauses() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_clause(), 1..=4)
}

/// A UTC timestamp somewhere in two weeks of 2019, on a whole minute.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..14 * 24 * 60).prop_map(|minutes| {
        Utc.with_ymd_and_hms(2019, 3, 4, 0, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    })
}

fn arb_duration() -> impl Strategy<Value = TimeDelta> {
    (1i64..=12 * 60).prop_map(TimeDelta::minutes)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn boundaries_alternate_and_stay_in_week(clauses in arb_clauses()) {
        let s = Schedule::parse(&clauses.join(";")).unwrap();
        let b = s.boundaries();
        prop_assert_eq!(b.len() % 2, 0);
        prop_assert!(b.windows(2).all(|w| w[0] < w[1]), "not strictly ascending: {:?}", b);
        prop_assert!(b.iter().all(|x| *x >= WeekInstant::start() && *x <= WeekInstant::end()));
    }

    #[test]
    fn merge_is_idempotent(clauses in arb_clauses()) {
        let s = Schedule::parse(&clauses.join(";")).unwrap();
        prop_assert_eq!(Schedule::from_windows(s.windows()), s);
    }

    #[test]
    fn clause_order_is_irrelevant(clauses in arb_clauses()) {
        let forward = Schedule::parse(&clauses.join(";")).unwrap();
        let mut reversed = clauses.clone();
        reversed.reverse();
        let backward = Schedule::parse(&reversed.join(";")).unwrap();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn transition_agrees_with_membership(clauses in arb_clauses(), t in arb_instant()) {
        let s = Schedule::parse(&clauses.join(";")).unwrap();
        if let Some(tr) = s.next_transition(&t) {
            prop_assert_eq!(tr.is_open, s.is_open(&t));
            prop_assert!(tr.after > TimeDelta::zero());
            prop_assert!(tr.after <= TimeDelta::weeks(1));
            let next = t + tr.after;
            prop_assert_eq!(s.is_open(&next), !tr.is_open, "state must flip at {}", next);
        }
    }

    #[test]
    fn when_finds_an_open_stretch(
        clauses in arb_clauses(),
        t in arb_instant(),
        d in arb_duration(),
    ) {
        let s = Schedule::parse(&clauses.join(";")).unwrap();
        if let Some(found) = s.when(&t, d) {
            prop_assert!(found >= t);
            prop_assert!(found - t < TimeDelta::weeks(2));
            prop_assert!(s.is_open(&found));
            if let Some(tr) = s.next_transition(&found) {
                prop_assert!(tr.after >= d, "only {:?} open from {}", tr.after, found);
            }
        }
    }
}
