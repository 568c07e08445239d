//! Thread-safe owner of the appointment index.
//!
//! Queries share a read lock. A booking validates and inserts under the write
//! lock, releases it, and then saves. Saves are serialised by their own mutex
//! and always write a snapshot taken after the caller's commit, so the stored
//! file never moves backwards and readers are not held up by disk I/O.

use std::sync::{Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeZone};
use tracing::{info, warn};

use crate::availability::available_windows;
use crate::booking;
use crate::error::{BookingError, Result, StoreError};
use crate::model::{Appointment, AppointmentWindow, TrainerId, UserId};
use crate::rules::TimeRules;
use crate::schedule::TrainerSchedule;
use crate::store::{Loader, Persister};

pub struct Scheduler<P> {
    rules: TimeRules,
    schedule: RwLock<TrainerSchedule>,
    persister: P,
    saving: Mutex<()>,
}

impl<P: Persister> Scheduler<P> {
    /// Build from an existing appointment set.
    pub fn new(rules: TimeRules, appointments: Vec<Appointment>, persister: P) -> Self {
        Self {
            rules,
            schedule: RwLock::new(TrainerSchedule::from_appointments(appointments)),
            persister,
            saving: Mutex::new(()),
        }
    }

    /// Load the initial set from `store`, which also becomes the persister.
    ///
    /// # Errors
    /// Propagates the loader's fatal error; no scheduler is built.
    pub fn open(rules: TimeRules, store: P) -> Result<Self, StoreError>
    where
        P: Loader,
    {
        let appointments = store.load_all()?;
        Ok(Self::new(rules, appointments, store))
    }

    pub fn rules(&self) -> &TimeRules {
        &self.rules
    }

    pub fn persister(&self) -> &P {
        &self.persister
    }

    pub fn exists(&self, trainer_id: TrainerId) -> bool {
        self.read().exists(trainer_id)
    }

    /// The trainer's booked appointments, ascending by start.
    pub fn scheduled(&self, trainer_id: TrainerId) -> Vec<Appointment> {
        self.read().appointments_for(trainer_id).to_vec()
    }

    /// Open slots for the trainer between `start` and `end`.
    pub fn available<Z: TimeZone>(
        &self,
        trainer_id: TrainerId,
        start: DateTime<Z>,
        end: DateTime<Z>,
    ) -> Vec<AppointmentWindow> {
        available_windows(&self.read(), &self.rules, trainer_id, start, end)
    }

    /// Book one slot for `user_id` with the trainer, then save everything.
    ///
    /// # Errors
    /// `Misaligned`, `OutOfHours` and `Conflict` leave the index untouched.
    /// `Persistence` means the appointment is booked in memory but the save
    /// failed; the appointment is available through [`BookingError::committed`].
    pub fn book<Z: TimeZone>(
        &self,
        trainer_id: TrainerId,
        user_id: UserId,
        start: DateTime<Z>,
    ) -> Result<Appointment> {
        let appointment =
            booking::book(&mut self.write(), &self.rules, trainer_id, user_id, start)?;
        info!(
            id = appointment.id,
            trainer_id,
            user_id,
            starts_at = %appointment.starts_at,
            "appointment booked"
        );

        if let Err(source) = self.save() {
            warn!(id = appointment.id, error = %source, "booked appointment was not saved");
            return Err(BookingError::Persistence {
                appointment: Box::new(appointment),
                source,
            });
        }

        Ok(appointment)
    }

    /// Every appointment, ordered by id.
    pub fn snapshot(&self) -> Vec<Appointment> {
        self.read().all()
    }

    /// Write the current appointment set through the persister.
    pub fn save(&self) -> Result<(), StoreError> {
        let _saving = self.saving.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.snapshot();
        self.persister.save_all(&snapshot)
    }

    fn read(&self) -> RwLockReadGuard<'_, TrainerSchedule> {
        self.schedule.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrainerSchedule> {
        self.schedule.write().unwrap_or_else(PoisonError::into_inner)
    }
}
