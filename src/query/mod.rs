//! List query parameters.

pub mod filter;

pub use filter::CarFilter;
