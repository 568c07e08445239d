//! Tests for range snapping and slot enumeration.

use chrono::{DateTime, Duration, Utc, Weekday};
use trainer_engine::rules::TimeRules;
use trainer_engine::slots::{generate_windows, snap_down, snap_up};
use trainer_engine::AppointmentWindow;

fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn starts(windows: &[AppointmentWindow]) -> Vec<DateTime<Utc>> {
    windows.iter().map(|w| w.starts_at).collect()
}

// ── Snapping ────────────────────────────────────────────────────────────────

#[test]
fn start_rounds_up_to_next_boundary() {
    let rules = TimeRules::default();
    assert_eq!(
        snap_up(&rules, at("2026-01-12T08:10:00-08:00")),
        Some(at("2026-01-12T08:30:00-08:00"))
    );
    assert_eq!(
        snap_up(&rules, at("2026-01-12T08:40:00-08:00")),
        Some(at("2026-01-12T09:00:00-08:00"))
    );
    assert_eq!(
        snap_up(&rules, at("2026-01-12T08:30:10-08:00")),
        Some(at("2026-01-12T09:00:00-08:00"))
    );
}

#[test]
fn end_rounds_down_to_previous_boundary() {
    let rules = TimeRules::default();
    assert_eq!(
        snap_down(&rules, at("2026-01-12T16:40:00-08:00")),
        at("2026-01-12T16:30:00-08:00")
    );
    assert_eq!(
        snap_down(&rules, at("2026-01-12T16:29:59-08:00")),
        at("2026-01-12T16:00:00-08:00")
    );
}

#[test]
fn aligned_instants_are_not_moved() {
    let rules = TimeRules::default();
    let t = at("2026-01-12T08:30:00-08:00");
    assert_eq!(snap_up(&rules, t), Some(t));
    assert_eq!(snap_down(&rules, t), t);
}

// ── Enumeration ─────────────────────────────────────────────────────────────

#[test]
fn range_inside_one_slot_yields_nothing() {
    // 08:10–08:50 snaps to 08:30–08:30: no room for a 30-minute slot.
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T08:10:00-08:00"),
        at("2026-01-12T08:50:00-08:00"),
    )
    .collect();
    assert!(windows.is_empty());
}

#[test]
fn ragged_range_snaps_inward() {
    // 08:10–16:40 snaps to 08:30–16:30: slots start 08:30 through 16:00.
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T08:10:00-08:00"),
        at("2026-01-12T16:40:00-08:00"),
    )
    .collect();

    assert_eq!(windows.len(), 16);
    assert_eq!(windows[0].starts_at, at("2026-01-12T08:30:00-08:00"));
    assert_eq!(windows[15].starts_at, at("2026-01-12T16:00:00-08:00"));
    assert_eq!(windows[15].ends_at, at("2026-01-12T16:30:00-08:00"));
}

#[test]
fn whole_day_is_clipped_to_operating_hours() {
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T00:00:00-08:00"),
        at("2026-01-13T00:00:00-08:00"),
    )
    .collect();

    // 08:00 through 16:30 inclusive.
    assert_eq!(windows.len(), 18);
    assert_eq!(windows[0].starts_at, at("2026-01-12T08:00:00-08:00"));
    assert_eq!(windows[17].starts_at, at("2026-01-12T16:30:00-08:00"));
}

#[test]
fn weekend_days_are_skipped() {
    // Friday 00:00 through Monday 00:00 local: only Friday has slots.
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-16T00:00:00-08:00"),
        at("2026-01-19T00:00:00-08:00"),
    )
    .collect();

    assert_eq!(windows.len(), 18);
    assert!(windows
        .iter()
        .all(|w| w.starts_at < at("2026-01-17T00:00:00-08:00")));
}

#[test]
fn slot_that_would_overrun_the_end_is_dropped() {
    // 08:00–09:15 snaps the end to 09:00, leaving exactly two slots.
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T08:00:00-08:00"),
        at("2026-01-12T09:15:00-08:00"),
    )
    .collect();

    assert_eq!(
        starts(&windows),
        vec![at("2026-01-12T08:00:00-08:00"), at("2026-01-12T08:30:00-08:00")]
    );
}

#[test]
fn slot_starting_at_close_is_excluded() {
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T16:30:00-08:00"),
        at("2026-01-12T17:30:00-08:00"),
    )
    .collect();
    assert_eq!(starts(&windows), vec![at("2026-01-12T16:30:00-08:00")]);
}

#[test]
fn reversed_or_empty_range_yields_nothing() {
    let rules = TimeRules::default();
    let t = at("2026-01-12T10:00:00-08:00");
    assert_eq!(generate_windows(&rules, t, t).count(), 0);
    assert_eq!(
        generate_windows(&rules, t, t - Duration::hours(2)).count(),
        0
    );
}

#[test]
fn windows_are_contiguous_and_one_slot_long() {
    let rules = TimeRules::default();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T08:00:00-08:00"),
        at("2026-01-12T12:00:00-08:00"),
    )
    .collect();

    for w in &windows {
        assert_eq!(w.ends_at - w.starts_at, Duration::minutes(30));
    }
    for pair in windows.windows(2) {
        assert_eq!(pair[0].ends_at, pair[1].starts_at);
    }
}

#[test]
fn iterator_is_restartable() {
    let rules = TimeRules::default();
    let iter = generate_windows(
        &rules,
        at("2026-01-12T08:00:00-08:00"),
        at("2026-01-12T10:00:00-08:00"),
    );
    let first: Vec<_> = iter.clone().collect();
    let second: Vec<_> = iter.collect();
    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[test]
fn finer_granularity_produces_more_slots() {
    let rules = TimeRules::new("UTC", 9, 10, &[Weekday::Mon], 15).unwrap();
    let windows: Vec<_> = generate_windows(
        &rules,
        at("2026-01-12T08:50:00Z"),
        at("2026-01-12T10:20:00Z"),
    )
    .collect();
    assert_eq!(
        starts(&windows),
        vec![
            at("2026-01-12T09:00:00Z"),
            at("2026-01-12T09:15:00Z"),
            at("2026-01-12T09:30:00Z"),
            at("2026-01-12T09:45:00Z"),
        ]
    );
}

// ── Edge of the representable range ─────────────────────────────────────────

#[test]
fn no_boundary_after_the_last_instant() {
    let rules = TimeRules::default();
    assert_eq!(snap_up(&rules, DateTime::<Utc>::MAX_UTC), None);
}

#[test]
fn range_at_the_last_instant_yields_nothing() {
    let rules = TimeRules::default();
    let max = DateTime::<Utc>::MAX_UTC;
    assert_eq!(generate_windows(&rules, max, max).count(), 0);
}

#[test]
fn enumeration_stops_before_overflowing() {
    let rules = always_open();
    let max = DateTime::<Utc>::MAX_UTC;
    let windows: Vec<_> = generate_windows(&rules, max - Duration::hours(2), max).collect();

    assert!(!windows.is_empty());
    assert!(windows.iter().all(|w| w.ends_at <= max));
    assert!(windows.windows(2).all(|p| p[0].ends_at == p[1].starts_at));
}

/// Open every hour of every day, in UTC.
fn always_open() -> TimeRules {
    TimeRules::new(
        "UTC",
        0,
        24,
        &[
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        30,
    )
    .unwrap()
}
