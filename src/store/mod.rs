//! Car persistence.
//!
//! # Data Flow
//! ```text
//! handlers
//!     → CarStore trait (list / count / get / insert / replace / remove)
//!     → memory.rs (DashMap records + DashMap name index)
//!
//! startup / tests:
//!     fixtures.rs (TOML dataset) → CarStore::seed
//! ```
//!
//! # Design Decisions
//! - Handlers only see the trait so another backend can be plugged in
//! - Name uniqueness is enforced by the store, not only by validation
//! - Records are returned as clones; the store keeps ownership

pub mod fixtures;
pub mod memory;

pub use fixtures::{load_dataset, parse_dataset, Dataset, FixtureError};
pub use memory::MemoryStore;

use crate::domain::{Car, CarDraft, CarId};
use crate::query::CarFilter;

/// Error type for store writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("car {0} not found")]
    NotFound(CarId),

    #[error("car name {0:?} is already taken")]
    DuplicateName(String),
}

/// Backing store for cars.
pub trait CarStore: Send + Sync {
    /// Cars matching `filter`, ordered by id ascending.
    fn list(&self, filter: &CarFilter) -> Vec<Car>;

    /// Total number of stored cars.
    fn count(&self) -> usize;

    fn get(&self, id: CarId) -> Option<Car>;

    /// Id of the car currently owning `name`.
    fn find_by_name(&self, name: &str) -> Option<CarId>;

    /// Persist a new car and assign its id.
    fn insert(&self, draft: CarDraft) -> Result<Car, StoreError>;

    /// Replace every field of the car with id `car.id`.
    fn replace(&self, car: Car) -> Result<Car, StoreError>;

    fn remove(&self, id: CarId) -> Result<Car, StoreError>;

    /// Load records with their ids preserved.
    fn seed(&self, cars: Vec<Car>) -> Result<(), StoreError>;

    /// Drop all records and restart id assignment.
    fn clear(&self);
}
