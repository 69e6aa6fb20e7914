//! # ClinicDesk Core
//!
//! Reservation availability for clinic branches: time-of-day arithmetic, slot
//! generation from a weekly template, and per-day override resolution.
//!
//! Everything in this crate is synchronous and free of I/O so the same logic
//! backs the API server, the HTTP client and the command-line preview.

/// Local editing state for templates and single days
pub mod editor;
/// Domain errors shared by every crate in the workspace
pub mod errors;
/// Wire/domain models: templates, overrides and month availability
pub mod models;
/// Calendar months as used to page through overrides
pub mod month;
/// Override > weekly holiday > template resolution
pub mod resolver;
/// Slot generation from operating hours
pub mod slots;
/// `HH:MM` time-of-day parsing and arithmetic
pub mod time;

pub use errors::{TimeError, TimeResult};
pub use models::{daily_override::DailyOverride, template::{DayOfWeek, ScheduleTemplate}};
pub use month::YearMonth;
pub use time::TimeOfDay;
