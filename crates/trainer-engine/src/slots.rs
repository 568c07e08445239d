//! Candidate slot enumeration.
//!
//! The requested range is first snapped inward to slot boundaries: the start
//! rounds up, the end rounds down. For 30-minute slots, 08:10–16:40 becomes
//! 08:30–16:30. Slots are then emitted back to back, keeping only those that
//! fit entirely before the snapped end and start within operating hours.

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::model::AppointmentWindow;
use crate::rules::TimeRules;

/// Round up to the next slot boundary. Instants already on a boundary are
/// returned unchanged; `None` if that boundary is past the last representable
/// instant.
pub fn snap_up(rules: &TimeRules, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if rules.is_aligned(instant) {
        return Some(instant);
    }
    snap_down(rules, instant).checked_add_signed(rules.granularity())
}

/// Round down to the previous slot boundary, clamped to the first
/// representable instant.
pub fn snap_down(rules: &TimeRules, instant: DateTime<Utc>) -> DateTime<Utc> {
    let past = rules.minutes_past_boundary(instant);
    truncate_to_minute(instant)
        .checked_sub_signed(Duration::minutes(i64::from(past)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn truncate_to_minute(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        - Duration::seconds(i64::from(instant.second()))
        - Duration::nanoseconds(i64::from(instant.nanosecond()))
}

/// Lazily enumerate in-hours windows between `start` and `end`.
///
/// The iterator holds no shared state; clone it to restart.
pub fn generate_windows(
    rules: &TimeRules,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Windows<'_> {
    Windows {
        rules,
        cursor: snap_up(rules, start),
        end: snap_down(rules, end),
        step: rules.granularity(),
    }
}

#[derive(Debug, Clone)]
pub struct Windows<'a> {
    rules: &'a TimeRules,
    /// `None` once no further slot can be represented.
    cursor: Option<DateTime<Utc>>,
    end: DateTime<Utc>,
    step: Duration,
}

impl Iterator for Windows<'_> {
    type Item = AppointmentWindow;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let starts_at = self.cursor?;
            let ends_at = starts_at.checked_add_signed(self.step)?;
            if ends_at > self.end {
                return None;
            }
            self.cursor = Some(ends_at);
            if self.rules.within_operating_hours(starts_at) {
                return Some(AppointmentWindow { starts_at, ends_at });
            }
        }
    }
}
