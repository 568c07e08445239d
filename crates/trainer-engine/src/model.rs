//! Core data types: committed appointments and candidate windows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type AppointmentId = u64;
pub type TrainerId = u64;
pub type UserId = u64;

/// A committed booking. Times are UTC and describe the half-open interval
/// `[starts_at, ends_at)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub trainer_id: TrainerId,
    pub user_id: UserId,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl Appointment {
    /// True when `[start, end)` intersects this appointment.
    /// Touching endpoints are not an overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.starts_at < end && start < self.ends_at
    }
}

/// A candidate or open slot. Same shape as an appointment, but no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentWindow {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
