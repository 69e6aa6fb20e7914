//! # ClinicDesk Client
//!
//! Typed access to the ClinicDesk scheduling API for the administration
//! tools. [`client::ScheduleClient`] wraps the REST resources one to one;
//! [`calendar`] builds the month view the calendar page shows and saves
//! what the editors produce.

pub mod calendar;
pub mod client;
pub mod config;

pub use calendar::{load_month_view, revert_day, save_day, save_template, MonthView};
pub use client::ScheduleClient;
pub use config::ClientConfig;
