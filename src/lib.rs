//! Club-management console backend: students, class groups, per-session
//! attendance with day-level calendar exceptions, and monthly fee payments
//! with derived reports.
//!
//! The crate is split so the HTTP binary stays thin: `core` holds the
//! framework-agnostic business logic over a SQLite pool, `api` binds it to
//! actix-web handlers, and integration tests drive `core` directly against
//! an in-memory database.

pub mod api;
pub mod config;
pub mod core;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod routes;
