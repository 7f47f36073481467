//! Conjunctive filter and pagination over cars.
//!
//! Every supplied predicate must hold; absent (or blank) parameters impose
//! no constraint. Results are ordered by id and then paginated as
//! `[start, start + max)`. No combination of parameters is an error.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

use crate::domain::Car;

/// Query parameters accepted by `GET /cars`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarFilter {
    /// Case-insensitive substring of the model.
    #[serde(deserialize_with = "blank_as_none")]
    pub model: Option<String>,

    /// Case-insensitive substring of the name.
    #[serde(deserialize_with = "blank_as_none")]
    pub name: Option<String>,

    /// Inclusive lower price bound.
    #[serde(deserialize_with = "blank_as_none")]
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound.
    #[serde(deserialize_with = "blank_as_none")]
    pub max_price: Option<Decimal>,

    /// Offset of the first result.
    #[serde(deserialize_with = "blank_as_none")]
    pub start: Option<usize>,

    /// Page size; zero means unbounded.
    #[serde(deserialize_with = "blank_as_none")]
    pub max: Option<usize>,
}

impl CarFilter {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_page(mut self, start: usize, max: usize) -> Self {
        self.start = Some(start);
        self.max = Some(max);
        self
    }

    /// Whether `car` satisfies every supplied predicate.
    pub fn matches(&self, car: &Car) -> bool {
        if let Some(model) = &self.model {
            if !contains_ignore_case(&car.model, model) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !contains_ignore_case(&car.name, name) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if car.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if car.price > max {
                return false;
            }
        }
        true
    }

    /// Filter, order by id, and paginate.
    pub fn apply(&self, cars: impl IntoIterator<Item = Car>) -> Vec<Car> {
        let mut matching: Vec<Car> = cars.into_iter().filter(|c| self.matches(c)).collect();
        matching.sort_by_key(|c| c.id);

        let limit = match self.max {
            Some(0) | None => usize::MAX,
            Some(max) => max,
        };
        matching
            .into_iter()
            .skip(self.start.unwrap_or(0))
            .take(limit)
            .collect()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parse a query value, treating missing or whitespace-only input as absent.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: u64, model: &str, name: &str, price: &str) -> Car {
        Car {
            id,
            model: model.into(),
            name: name.into(),
            price: Decimal::from_str(price).unwrap(),
        }
    }

    fn sample() -> Vec<Car> {
        vec![
            car(3, "Porche274", "Porche274", "18990.23"),
            car(1, "Ferrari", "ferrari spider", "2450.8"),
            car(4, "Porche", "porche avenger", "25000.0"),
            car(2, "Mustang", "mustang spider", "12999.0"),
        ]
    }

    fn ids(cars: &[Car]) -> Vec<u64> {
        cars.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_no_filter_returns_all_sorted() {
        assert_eq!(ids(&CarFilter::default().apply(sample())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_model_filter() {
        let result = CarFilter::default().with_model("Porche").apply(sample());
        assert_eq!(ids(&result), vec![3, 4]);
    }

    #[test]
    fn test_model_substring_case_insensitive() {
        let result = CarFilter::default().with_model("porche").apply(sample());
        assert_eq!(ids(&result), vec![3, 4]);

        let result = CarFilter::default().with_model("274").apply(sample());
        assert_eq!(ids(&result), vec![3]);
    }

    #[test]
    fn test_name_substring_case_insensitive() {
        let result = CarFilter::default().with_name("SPIDER").apply(sample());
        assert_eq!(ids(&result), vec![1, 2]);
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let filter = CarFilter::default().with_price_range(
            Some(Decimal::from(2450)),
            Some(Decimal::from(12999)),
        );
        assert_eq!(ids(&filter.apply(sample())), vec![1, 2]);

        let exact = CarFilter::default().with_price_range(
            Some(Decimal::from_str("2450.8").unwrap()),
            Some(Decimal::from_str("2450.8").unwrap()),
        );
        assert_eq!(ids(&exact.apply(sample())), vec![1]);
    }

    #[test]
    fn test_predicates_combine() {
        let filter = CarFilter::default()
            .with_model("Porche")
            .with_price_range(None, Some(Decimal::from(20000)));
        assert_eq!(ids(&filter.apply(sample())), vec![3]);
    }

    #[test]
    fn test_pagination() {
        assert_eq!(ids(&CarFilter::default().with_page(1, 2).apply(sample())), vec![2, 3]);
        assert_eq!(ids(&CarFilter::default().with_page(3, 10).apply(sample())), vec![4]);
        assert!(CarFilter::default().with_page(10, 10).apply(sample()).is_empty());
        assert_eq!(CarFilter::default().with_page(0, 0).apply(sample()).len(), 4);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(CarFilter::default().with_model("Tesla").apply(sample()).is_empty());
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let filter: CarFilter =
            serde_json::from_value(serde_json::json!({"minPrice": "2450", "maxPrice": "12999", "model": " "}))
                .unwrap();
        assert_eq!(filter.min_price, Some(Decimal::from(2450)));
        assert_eq!(filter.max_price, Some(Decimal::from(12999)));
        assert_eq!(filter.model, None);
        assert_eq!(filter.start, None);
    }

    #[test]
    fn test_deserialize_rejects_garbage_number() {
        let result: Result<CarFilter, _> =
            serde_json::from_value(serde_json::json!({"start": "abc"}));
        assert!(result.is_err());
    }
}
