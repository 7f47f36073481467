//! Business rules applied to a car before it is written.
//!
//! Rules run in a fixed order and stop at the first failure:
//! name emptiness, then name uniqueness. The uniqueness check here is a
//! pre-check for a friendly message; the store's name index is the
//! authoritative guard.

use crate::domain::car::{CarDraft, CarId};
use crate::store::CarStore;

/// A failed business rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Car name cannot be empty")]
    EmptyName,

    #[error("Car name must be unique")]
    DuplicateName,
}

/// Validate a draft against the current store contents.
///
/// `target` is the id of the record being updated, if any; a name owned by
/// that record does not count as a conflict.
pub fn validate(
    draft: &CarDraft,
    store: &dyn CarStore,
    target: Option<CarId>,
) -> Result<(), ValidationError> {
    let name = draft.name();
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    match store.find_by_name(name) {
        Some(owner) if Some(owner) != target => Err(ValidationError::DuplicateName),
        _ => Ok(()),
    }
}
