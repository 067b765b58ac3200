//! Request handlers.
//!
//! Handlers delegate to the repositories in `tracker_db`, derive status via
//! `tracker_core`, and map errors via [`AppError`](crate::error::AppError).

pub mod project;
