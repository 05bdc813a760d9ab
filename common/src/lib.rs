//! Shared types for the school-portal login controller and its collaborators.
//!
//! This crate provides:
//! - Validated district, role and language identifiers
//! - The contracts (traits) through which the controller reaches its collaborators
//! - Dialog requests and platform styling types understood by UI hosts
#![expect(
    clippy::missing_errors_doc,
    reason = "The situation it maps to errors should be obvious."
)]

extern crate alloc;
extern crate core;

mod contracts;
mod dialog;
mod ids;
mod platform;

pub use contracts::*;
pub use dialog::*;
pub use ids::*;
pub use platform::*;
