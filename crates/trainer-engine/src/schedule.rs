//! The trainer → appointments index.
//!
//! Each trainer's appointments are kept sorted by start time. Insertion finds
//! its position by binary search, so a list is never observable out of order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{Appointment, AppointmentId, TrainerId};

#[derive(Debug, Clone, Default)]
pub struct TrainerSchedule {
    by_trainer: HashMap<TrainerId, Vec<Appointment>>,
}

impl TrainerSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat list of appointments by trainer.
    pub fn from_appointments(appointments: impl IntoIterator<Item = Appointment>) -> Self {
        let mut schedule = Self::new();
        for appointment in appointments {
            schedule.add(appointment);
        }
        schedule
    }

    /// True iff at least one appointment is recorded for the trainer.
    pub fn exists(&self, trainer_id: TrainerId) -> bool {
        self.by_trainer
            .get(&trainer_id)
            .is_some_and(|apts| !apts.is_empty())
    }

    /// The trainer's appointments, ascending by start. Empty for unknown trainers.
    pub fn appointments_for(&self, trainer_id: TrainerId) -> &[Appointment] {
        self.by_trainer
            .get(&trainer_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True iff `[start, end)` intersects none of the trainer's appointments.
    ///
    /// Only appointments starting before `end` can intersect, and the list is
    /// sorted, so the scan stops at that point.
    pub fn free_between(
        &self,
        trainer_id: TrainerId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> bool {
        let apts = self.appointments_for(trainer_id);
        let candidates = apts.partition_point(|apt| apt.starts_at < end);
        !apts[..candidates].iter().any(|apt| apt.overlaps(start, end))
    }

    /// Insert an appointment at its sorted position. Appointments with equal
    /// start times keep insertion order.
    pub fn add(&mut self, appointment: Appointment) {
        let apts = self.by_trainer.entry(appointment.trainer_id).or_default();
        let at = apts.partition_point(|apt| apt.starts_at <= appointment.starts_at);
        apts.insert(at, appointment);
    }

    /// One more than the highest id across all trainers (1 when empty).
    /// Always recomputed from the current contents.
    pub fn next_id(&self) -> AppointmentId {
        self.by_trainer
            .values()
            .flatten()
            .map(|apt| apt.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Total number of appointments across all trainers.
    pub fn len(&self) -> usize {
        self.by_trainer.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every appointment, ordered by id.
    pub fn all(&self) -> Vec<Appointment> {
        let mut apts: Vec<Appointment> = self.by_trainer.values().flatten().cloned().collect();
        apts.sort_by_key(|apt| apt.id);
        apts
    }
}
