//! Zewotir Admin Common Library
//!
//! Domain records, form inputs, roles and permissions shared by every consumer
//! of the admin backend.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
