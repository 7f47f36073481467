//! In-memory car store.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{Car, CarDraft, CarId};
use crate::observability::metrics;
use crate::query::CarFilter;
use crate::store::{CarStore, StoreError};

const FIRST_ID: CarId = 1;

/// A thread-safe store keeping cars in memory.
///
/// `names` maps each stored name to its owner. Claiming a name goes through
/// the map's entry API, so two concurrent writers can never both own it.
pub struct MemoryStore {
    cars: DashMap<CarId, Car>,
    names: DashMap<String, CarId>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            cars: DashMap::new(),
            names: DashMap::new(),
            next_id: AtomicU64::new(FIRST_ID),
        }
    }

    /// Reserve `name` for `owner`. Succeeds if the name is free or already
    /// owned by `owner`.
    fn claim_name(&self, name: &str, owner: CarId) -> Result<(), StoreError> {
        match self.names.entry(name.to_string()) {
            Entry::Occupied(entry) if *entry.get() != owner => {
                Err(StoreError::DuplicateName(name.to_string()))
            }
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(owner);
                Ok(())
            }
        }
    }

    fn release_name(&self, name: &str, owner: CarId) {
        self.names.remove_if(name, |_, current| *current == owner);
    }

    fn snapshot(&self) -> Vec<Car> {
        self.cars.iter().map(|r| r.value().clone()).collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CarStore for MemoryStore {
    fn list(&self, filter: &CarFilter) -> Vec<Car> {
        filter.apply(self.snapshot())
    }

    fn count(&self) -> usize {
        self.cars.len()
    }

    fn get(&self, id: CarId) -> Option<Car> {
        self.cars.get(&id).map(|r| r.value().clone())
    }

    fn find_by_name(&self, name: &str) -> Option<CarId> {
        self.names.get(name).map(|r| *r.value())
    }

    fn insert(&self, draft: CarDraft) -> Result<Car, StoreError> {
        let name = draft.name().to_string();
        let id = match self.names.entry(name.clone()) {
            Entry::Occupied(_) => return Err(StoreError::DuplicateName(name)),
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                entry.insert(id);
                id
            }
        };

        let car = draft.into_car(id);
        self.cars.insert(id, car.clone());
        metrics::record_store_size(self.cars.len());
        tracing::debug!(car_id = id, name = %car.name, "Stored new car");
        Ok(car)
    }

    fn replace(&self, car: Car) -> Result<Car, StoreError> {
        let previous = self.get(car.id).ok_or(StoreError::NotFound(car.id))?;

        if previous.name != car.name {
            self.claim_name(&car.name, car.id)?;
        }

        match self.cars.get_mut(&car.id) {
            Some(mut slot) => *slot = car.clone(),
            None => {
                // Removed concurrently; undo the claim.
                if previous.name != car.name {
                    self.release_name(&car.name, car.id);
                }
                return Err(StoreError::NotFound(car.id));
            }
        }

        if previous.name != car.name {
            self.release_name(&previous.name, car.id);
        }
        tracing::debug!(car_id = car.id, "Replaced car");
        Ok(car)
    }

    fn remove(&self, id: CarId) -> Result<Car, StoreError> {
        let (_, car) = self.cars.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.release_name(&car.name, id);
        metrics::record_store_size(self.cars.len());
        tracing::debug!(car_id = id, "Removed car");
        Ok(car)
    }

    fn seed(&self, cars: Vec<Car>) -> Result<(), StoreError> {
        for car in cars {
            self.claim_name(&car.name, car.id)?;
            self.next_id.fetch_max(car.id + 1, Ordering::SeqCst);
            if let Some(replaced) = self.cars.insert(car.id, car.clone()) {
                if replaced.name != car.name {
                    self.release_name(&replaced.name, car.id);
                }
            }
        }
        metrics::record_store_size(self.cars.len());
        Ok(())
    }

    fn clear(&self) {
        self.cars.clear();
        self.names.clear();
        self.next_id.store(FIRST_ID, Ordering::SeqCst);
        metrics::record_store_size(0);
    }
}
