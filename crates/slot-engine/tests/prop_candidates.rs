//! Property-based tests for candidate generation using proptest.
//!
//! These hold for *any* windows, granularity, free-slot set and clock, not
//! just the fixed scenarios in the other test files.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;
use slot_engine::clock::{minute_of_day, time_from_minute};
use slot_engine::{
    generate_end_candidates, generate_start_candidates, EngineConfig, FreeSlotSet,
    InterpolationPolicy, SlotGranularity, WorkingHoursWindow,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

fn arb_granularity() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(5u32),
        Just(10u32),
        Just(15u32),
        Just(30u32),
        Just(60u32),
        1u32..=120,
    ]
}

/// 1-3 disjoint windows cut from sorted distinct minute marks.
fn arb_windows() -> impl Strategy<Value = Vec<WorkingHoursWindow>> {
    prop::collection::btree_set(0u32..1440, 2..=6).prop_map(|marks| {
        let marks: Vec<u32> = marks.into_iter().collect();
        marks
            .chunks_exact(2)
            .map(|pair| WorkingHoursWindow::from_minutes(pair[0], pair[1]).unwrap())
            .collect()
    })
}

fn arb_free_minutes() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..1440, 0..40)
}

/// "now" within a day either side of the query date.
fn arb_now() -> impl Strategy<Value = NaiveDateTime> {
    (-1i64..=1, 0u32..1440, 0u32..60).prop_map(|(day_offset, minute, second)| {
        let date = base_date() + Duration::days(day_offset);
        date.and_time(time_from_minute(minute)) + Duration::seconds(i64::from(second))
    })
}

fn arb_policy() -> impl Strategy<Value = InterpolationPolicy> {
    prop_oneof![
        Just(InterpolationPolicy::BetweenFreeSlots),
        Just(InterpolationPolicy::ExactOnly),
    ]
}

/// Free minutes snapped to the granularity so exact matches actually occur.
fn free_set(minutes: &[u32], granularity: u32) -> FreeSlotSet {
    FreeSlotSet::from_times(
        minutes
            .iter()
            .map(|m| time_from_minute(m - m % granularity)),
    )
}

fn config(windows: Vec<WorkingHoursWindow>, granularity: u32, policy: InterpolationPolicy) -> EngineConfig {
    EngineConfig::new(windows, SlotGranularity::new(granularity).unwrap()).with_interpolation(policy)
}

// ---------------------------------------------------------------------------
// Start candidates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn starts_are_strictly_ascending(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
        policy in arb_policy(),
    ) {
        let cfg = config(windows, g, policy);
        let starts = generate_start_candidates(&cfg, base_date(), &free_set(&free, g), now);
        for pair in starts.windows(2) {
            prop_assert!(pair[0].minute_of_day < pair[1].minute_of_day);
        }
    }

    #[test]
    fn starts_lie_inside_a_window_on_the_grid(
        windows in arb_windows(),
        g in arb_granularity(),
        now in arb_now(),
    ) {
        let cfg = config(windows.clone(), g, InterpolationPolicy::default());
        let starts = generate_start_candidates(&cfg, base_date(), &FreeSlotSet::new(), now);
        prop_assert!(starts.len() as u32 <= 1440 / g);
        for c in &starts {
            prop_assert!(windows.iter().any(|w| w.contains(c.minute_of_day)));
            prop_assert_eq!(c.minute_of_day % g, 0);
            prop_assert!(c.minute_of_day + g <= 1440);
            prop_assert_eq!(minute_of_day(c.time), c.minute_of_day);
        }
    }

    #[test]
    fn today_excludes_times_at_or_before_now(
        windows in arb_windows(),
        g in arb_granularity(),
        now in arb_now(),
    ) {
        let cfg = config(windows, g, InterpolationPolicy::default());
        let starts = generate_start_candidates(&cfg, base_date(), &FreeSlotSet::new(), now);
        if now.date() == base_date() {
            for c in &starts {
                prop_assert!(c.time > now.time());
            }
        }
    }

    #[test]
    fn empty_free_slots_never_report_availability(
        windows in arb_windows(),
        g in arb_granularity(),
        now in arb_now(),
        policy in arb_policy(),
    ) {
        let cfg = config(windows, g, policy);
        let starts = generate_start_candidates(&cfg, base_date(), &FreeSlotSet::new(), now);
        prop_assert!(starts.iter().all(|c| !c.is_available));
    }

    #[test]
    fn exact_free_matches_are_available(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
        policy in arb_policy(),
    ) {
        let cfg = config(windows, g, policy);
        let set = free_set(&free, g);
        let starts = generate_start_candidates(&cfg, base_date(), &set, now);
        for c in &starts {
            if set.contains(c.minute_of_day) {
                prop_assert!(c.is_available);
            }
            if policy == InterpolationPolicy::ExactOnly {
                prop_assert_eq!(c.is_available, set.contains(c.minute_of_day));
            }
            prop_assert_eq!(c.label.ends_with('✓'), c.is_available);
        }
    }

    #[test]
    fn start_generation_is_idempotent(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
    ) {
        let cfg = config(windows, g, InterpolationPolicy::default());
        let set = free_set(&free, g);
        prop_assert_eq!(
            generate_start_candidates(&cfg, base_date(), &set, now),
            generate_start_candidates(&cfg, base_date(), &set, now)
        );
    }
}

// ---------------------------------------------------------------------------
// End candidates
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn ends_respect_minimum_gap_and_duration_cap(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
        start in 0u32..1440,
    ) {
        let cfg = config(windows, g, InterpolationPolicy::default());
        let start_time = time_from_minute(start);
        let ends = generate_end_candidates(&cfg, base_date(), &free_set(&free, g), now, start_time);
        for c in &ends {
            prop_assert!(c.minute_of_day >= start + g);
            prop_assert!(c.minute_of_day - start <= 180);
        }
        for pair in ends.windows(2) {
            prop_assert!(pair[0].minute_of_day < pair[1].minute_of_day);
        }
    }

    #[test]
    fn end_availability_is_exactly_the_contiguous_run(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
        start_slot in 0u32..1440,
    ) {
        let cfg = config(windows, g, InterpolationPolicy::default());
        let set = free_set(&free, g);
        let start = start_slot - start_slot % g;
        let ends = generate_end_candidates(&cfg, base_date(), &set, now, time_from_minute(start));
        for c in &ends {
            let run_free = (start..c.minute_of_day)
                .step_by(g as usize)
                .all(|m| set.contains(m));
            prop_assert_eq!(c.is_available, set.contains(start) && run_free);
        }
    }

    #[test]
    fn end_generation_is_idempotent(
        windows in arb_windows(),
        g in arb_granularity(),
        free in arb_free_minutes(),
        now in arb_now(),
        start in 0u32..1440,
    ) {
        let cfg = config(windows, g, InterpolationPolicy::default());
        let set = free_set(&free, g);
        let start_time: NaiveTime = time_from_minute(start);
        prop_assert_eq!(
            generate_end_candidates(&cfg, base_date(), &set, now, start_time),
            generate_end_candidates(&cfg, base_date(), &set, now, start_time)
        );
    }
}
