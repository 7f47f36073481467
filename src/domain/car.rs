//! Car record and candidate payload.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a car.
pub type CarId = u64;

/// A persisted car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub model: String,
    pub name: String,
    /// Serialized as a JSON number.
    pub price: Decimal,
}

/// Candidate car as submitted on create or update.
///
/// Every field is optional on the wire; a missing `name` is treated
/// as empty so the emptiness rule reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarDraft {
    pub id: Option<CarId>,
    pub model: String,
    pub name: Option<String>,
    pub price: Decimal,
}

impl CarDraft {
    pub fn new(model: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            model: model.into(),
            name: Some(name.into()),
            price,
        }
    }

    /// The submitted name, empty when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Materialize the draft as a record owned by `id`.
    pub fn into_car(self, id: CarId) -> Car {
        Car {
            id,
            model: self.model,
            name: self.name.unwrap_or_default(),
            price: self.price,
        }
    }
}
