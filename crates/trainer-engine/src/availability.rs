//! Open-slot search for a single trainer.

use chrono::{DateTime, TimeZone, Utc};
use tracing::debug;

use crate::model::{AppointmentWindow, TrainerId};
use crate::rules::TimeRules;
use crate::schedule::TrainerSchedule;
use crate::slots::generate_windows;

/// Every in-hours slot between `start` and `end` that the trainer has free,
/// ascending by start.
///
/// A range that snaps to nothing (start at or after end) yields no windows.
pub fn available_windows<Z: TimeZone>(
    schedule: &TrainerSchedule,
    rules: &TimeRules,
    trainer_id: TrainerId,
    start: DateTime<Z>,
    end: DateTime<Z>,
) -> Vec<AppointmentWindow> {
    let start = start.with_timezone(&Utc);
    let end = end.with_timezone(&Utc);

    let mut candidates = 0usize;
    let open: Vec<AppointmentWindow> = generate_windows(rules, start, end)
        .inspect(|_| candidates += 1)
        .filter(|w| schedule.free_between(trainer_id, w.starts_at, w.ends_at))
        .collect();

    debug!(
        trainer_id,
        %start,
        %end,
        candidates,
        open = open.len(),
        "computed availability"
    );

    open
}
