//! Caller identity and role checks.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → access_control.rs (Caller extractor reads the `user` header)
//!     → RoleProvider::has_role(identity, role)
//!     → handler proceeds, or 403 (no identity) / 401 (role missing)
//! ```

pub mod access_control;

pub use access_control::{authorize, Caller, ConfiguredRoles, RoleProvider, USER_HEADER};
