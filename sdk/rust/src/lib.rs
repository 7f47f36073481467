//! Typed client for the cars service.

pub mod client;

pub use client::{Car, CarsClient, ClientError, Fetched, ListFilter, NewCar};
