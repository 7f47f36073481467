//! Cars service library.
//!
//! A small HTTP CRUD service for car records: filtered listing, counting,
//! conditional GET with entity tags, validated create/update, and
//! role-guarded delete.

pub mod config;
pub mod domain;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod security;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
