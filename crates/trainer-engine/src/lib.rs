//! # trainer-engine
//!
//! In-memory scheduling engine for a trainer's fixed-length appointment slots.
//!
//! Clients ask which slots a trainer has open over a date range and book one.
//! The engine keeps every trainer's bookings in start order, enumerates slots
//! on the business calendar (timezone-aware operating hours), and makes the
//! check-then-insert of a booking atomic so a slot can never be sold twice.
//!
//! ## Modules
//!
//! - [`rules`] — Business calendar: hours, weekdays, timezone, slot size
//! - [`model`] — `Appointment` and `AppointmentWindow`
//! - [`schedule`] — Per-trainer sorted index with free/busy checks
//! - [`slots`] — Snap a range to slot boundaries and enumerate in-hours slots
//! - [`availability`] — Open slots for one trainer
//! - [`booking`] — Validate and commit a new appointment
//! - [`store`] — Load/save contracts and the JSON file store
//! - [`service`] — Lock-owning `Scheduler` tying it all together
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod error;
pub mod model;
pub mod rules;
pub mod schedule;
pub mod service;
pub mod slots;
pub mod store;

pub use availability::available_windows;
pub use error::{BookingError, RulesError, StoreError};
pub use model::{Appointment, AppointmentWindow};
pub use rules::TimeRules;
pub use schedule::TrainerSchedule;
pub use service::Scheduler;
pub use slots::generate_windows;
pub use store::{JsonFileStore, Loader, MemoryStore, Persister};
