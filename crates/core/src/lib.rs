//! Domain logic for the project tracker.
//!
//! This crate has no I/O and no database dependencies. It owns the project
//! record shape, the status engine that derives lifecycle state and payment
//! gating from a record, and the validation helpers the API runs before
//! writing anything to the store.

pub mod error;
pub mod project;
pub mod status;
pub mod types;
pub mod validation;
