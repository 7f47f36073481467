//! TOML datasets used to seed a store.
//!
//! ```toml
//! [[cars]]
//! id = 1
//! model = "Ferrari"
//! name = "ferrari spider"
//! price = 2450.8
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::domain::Car;

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate car id {0} in dataset")]
    DuplicateId(u64),
}

/// A set of cars to load into a store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub cars: Vec<Car>,
}

/// Parse a dataset from TOML text.
pub fn parse_dataset(content: &str) -> Result<Dataset, FixtureError> {
    let dataset: Dataset = toml::from_str(content)?;

    let mut seen = HashSet::new();
    for car in &dataset.cars {
        if !seen.insert(car.id) {
            return Err(FixtureError::DuplicateId(car.id));
        }
    }
    Ok(dataset)
}

/// Load a dataset from a TOML file.
pub fn load_dataset(path: &Path) -> Result<Dataset, FixtureError> {
    let content = fs::read_to_string(path)?;
    let dataset = parse_dataset(&content)?;
    tracing::info!(path = ?path, cars = dataset.cars.len(), "Loaded dataset");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_sample_dataset_parses() {
        let dataset = parse_dataset(include_str!("../../fixtures/cars.toml")).unwrap();
        assert_eq!(dataset.cars.len(), 4);
        assert_eq!(dataset.cars[0].model, "Ferrari");
        assert_eq!(dataset.cars[0].price, Decimal::from_str("2450.8").unwrap());
        assert_eq!(dataset.cars[2].price, Decimal::from_str("18990.23").unwrap());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let content = r#"
            [[cars]]
            id = 1
            model = "a"
            name = "a"
            price = 1.0

            [[cars]]
            id = 1
            model = "b"
            name = "b"
            price = 2.0
        "#;
        assert!(matches!(parse_dataset(content), Err(FixtureError::DuplicateId(1))));
    }

    #[test]
    fn test_empty_dataset() {
        assert!(parse_dataset("").unwrap().cars.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
    }
}
