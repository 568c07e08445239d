//! Booking validation and commit.
//!
//! Rejections are checked in a fixed order: slot alignment, operating hours,
//! then trainer conflict. Nothing is written to the schedule unless all three
//! pass. Persisting the result is the caller's job (see [`crate::service`]).

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::error::{BookingError, Result};
use crate::model::{Appointment, TrainerId, UserId};
use crate::rules::TimeRules;
use crate::schedule::TrainerSchedule;

/// Check that a slot starting at `start` may be booked for the trainer and
/// return the slot's end.
///
/// A slot whose end is past the last representable instant is `OutOfHours`.
pub fn validate(
    schedule: &TrainerSchedule,
    rules: &TimeRules,
    trainer_id: TrainerId,
    start: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    if !rules.is_aligned(start) {
        return Err(BookingError::Misaligned { start });
    }

    let end = match start.checked_add_signed(rules.granularity()) {
        Some(end) if rules.within_operating_hours(start) => end,
        _ => return Err(BookingError::OutOfHours { start }),
    };

    if !schedule.free_between(trainer_id, start, end) {
        return Err(BookingError::Conflict { trainer_id, start });
    }

    Ok(end)
}

/// Validate and insert a new appointment, returning it.
///
/// Must run under exclusive access to `schedule`: the check and the insert
/// form one unit.
pub fn book<Z: TimeZone>(
    schedule: &mut TrainerSchedule,
    rules: &TimeRules,
    trainer_id: TrainerId,
    user_id: UserId,
    start: DateTime<Z>,
) -> Result<Appointment> {
    let start = start.with_timezone(&Utc);

    let ends_at = match validate(schedule, rules, trainer_id, start) {
        Ok(end) => end,
        Err(err) => {
            debug!(trainer_id, user_id, %start, error = %err, "booking rejected");
            return Err(err);
        }
    };

    let appointment = Appointment {
        id: schedule.next_id(),
        trainer_id,
        user_id,
        starts_at: start,
        ends_at,
    };
    schedule.add(appointment.clone());

    Ok(appointment)
}
