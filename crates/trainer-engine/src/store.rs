//! Loading and saving the full appointment set.
//!
//! The JSON file format is an array of records whose timestamps carry an
//! explicit offset. Saved files render every time in the business timezone so
//! the file reads naturally for a person at that business; loaded times are
//! normalised to UTC before they reach the index.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::model::{Appointment, AppointmentId, TrainerId, UserId};

/// Supplies the initial appointment set at startup.
pub trait Loader {
    /// # Errors
    /// A `StoreError` here is fatal: the caller must not start with an empty index.
    fn load_all(&self) -> Result<Vec<Appointment>, StoreError>;
}

/// Durably replaces the stored appointment set.
pub trait Persister: Send + Sync {
    fn save_all(&self, appointments: &[Appointment]) -> Result<(), StoreError>;
}

/// On-disk record. Same fields as [`Appointment`], but times keep the offset
/// they were written with.
#[derive(Debug, Serialize, Deserialize)]
struct StoredAppointment {
    id: AppointmentId,
    trainer_id: TrainerId,
    user_id: UserId,
    starts_at: DateTime<FixedOffset>,
    ends_at: DateTime<FixedOffset>,
}

impl StoredAppointment {
    fn in_zone(apt: &Appointment, tz: Tz) -> Self {
        Self {
            id: apt.id,
            trainer_id: apt.trainer_id,
            user_id: apt.user_id,
            starts_at: apt.starts_at.with_timezone(&tz).fixed_offset(),
            ends_at: apt.ends_at.with_timezone(&tz).fixed_offset(),
        }
    }
}

impl From<StoredAppointment> for Appointment {
    fn from(stored: StoredAppointment) -> Self {
        Self {
            id: stored.id,
            trainer_id: stored.trainer_id,
            user_id: stored.user_id,
            starts_at: stored.starts_at.with_timezone(&Utc),
            ends_at: stored.ends_at.with_timezone(&Utc),
        }
    }
}

/// A JSON file holding every appointment.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    timezone: Tz,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            path: path.into(),
            timezone,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Loader for JsonFileStore {
    /// Read the file. A missing or unreadable file is an error; content that
    /// does not parse is logged and treated as an empty set.
    fn load_all(&self) -> Result<Vec<Appointment>, StoreError> {
        let data = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;

        let stored: Vec<StoredAppointment> = match serde_json::from_str(&data) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not parse appointments, starting with no data"
                );
                Vec::new()
            }
        };

        let appointments: Vec<Appointment> = stored.into_iter().map(Appointment::from).collect();
        info!(
            path = %self.path.display(),
            count = appointments.len(),
            "loaded appointments"
        );
        Ok(appointments)
    }
}

impl Persister for JsonFileStore {
    /// Write to a sibling staging file, then rename it over the target.
    fn save_all(&self, appointments: &[Appointment]) -> Result<(), StoreError> {
        let records: Vec<StoredAppointment> = appointments
            .iter()
            .map(|apt| StoredAppointment::in_zone(apt, self.timezone))
            .collect();
        let bytes = serde_json::to_vec(&records)?;

        let staging = self.staging_path();
        fs::write(&staging, bytes).map_err(|source| StoreError::Write {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

/// Keeps the last saved set in memory. Useful for tests and benchmarks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    appointments: Mutex<Vec<Appointment>>,
}

impl MemoryStore {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Mutex::new(appointments),
        }
    }

    /// A copy of the most recently saved set.
    pub fn saved(&self) -> Vec<Appointment> {
        self.appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Loader for MemoryStore {
    fn load_all(&self) -> Result<Vec<Appointment>, StoreError> {
        Ok(self.saved())
    }
}

impl Persister for MemoryStore {
    fn save_all(&self, appointments: &[Appointment]) -> Result<(), StoreError> {
        *self
            .appointments
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = appointments.to_vec();
        Ok(())
    }
}
