//! Domain model for the cars resource.
//!
//! # Data Flow
//! ```text
//! request body (JSON)
//!     → CarDraft (candidate, id optional)
//!     → validation.rs (emptiness, then uniqueness)
//!     → Car (persisted shape, id assigned by the store)
//! ```

pub mod car;
pub mod validation;

pub use car::{Car, CarDraft, CarId};
pub use validation::{validate, ValidationError};
