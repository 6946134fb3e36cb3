//! Framework-agnostic business logic for the console: roster resolution,
//! the attendance day sheet, calendar exceptions and monthly reporting.
//! Everything here takes a pool and returns typed results; the HTTP layer
//! stays a thin binding.

pub mod attendance;
pub mod calendar;
pub mod report;
pub mod roster;
