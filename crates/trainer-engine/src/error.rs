//! Error types for trainer-engine operations.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Appointment, TrainerId};

/// Rejected business-calendar configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid operating hours: open {open} must be before close {close} (max 24)")]
    InvalidHours { open: u32, close: u32 },

    #[error("Invalid granularity: {0} minutes (must be a positive divisor of 60)")]
    InvalidGranularity(u32),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("At least one operating weekday is required")]
    NoWeekdays,
}

/// Failures reading or writing the persisted appointment snapshot.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The snapshot could not be read at all. Startup must abort.
    #[error("Failed to read appointments from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write appointments to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode appointments: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons a booking request did not produce a durable appointment.
///
/// `Misaligned`, `OutOfHours` and `Conflict` are client-input errors and leave
/// the schedule untouched. `Persistence` happens after the in-memory commit:
/// the appointment is booked, but it was not written to storage.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Appointments can only start on a slot boundary (got {start})")]
    Misaligned { start: DateTime<Utc> },

    #[error("Requested time {start} is outside of operating hours")]
    OutOfHours { start: DateTime<Utc> },

    #[error("Trainer {trainer_id} is already booked at {start}")]
    Conflict {
        trainer_id: TrainerId,
        start: DateTime<Utc>,
    },

    #[error("Appointment {} was booked but could not be saved: {source}", appointment.id)]
    Persistence {
        appointment: Box<Appointment>,
        #[source]
        source: StoreError,
    },
}

impl BookingError {
    /// The appointment that was committed despite this error, if any.
    pub fn committed(&self) -> Option<&Appointment> {
        match self {
            BookingError::Persistence { appointment, .. } => Some(appointment.as_ref()),
            _ => None,
        }
    }
}

pub type Result<T, E = BookingError> = std::result::Result<T, E>;
