//! Access control for privileged operations.
//!
//! The `user` header is a stand-in for a real identity provider. Role
//! resolution sits behind [`RoleProvider`] so one can be plugged in.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::convert::Infallible;

use crate::http::error::ApiError;

/// Header carrying the caller identity.
pub const USER_HEADER: &str = "user";

/// Capability check for a caller identity.
pub trait RoleProvider: Send + Sync {
    fn has_role(&self, identity: &str, role: &str) -> bool;
}

/// Roles resolved from a static identity → roles table.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredRoles {
    users: HashMap<String, HashSet<String>>,
}

impl ConfiguredRoles {
    pub fn new(users: &BTreeMap<String, Vec<String>>) -> Self {
        let users = users
            .iter()
            .map(|(identity, roles)| (identity.clone(), roles.iter().cloned().collect()))
            .collect();
        Self { users }
    }
}

impl RoleProvider for ConfiguredRoles {
    fn has_role(&self, identity: &str, role: &str) -> bool {
        self.users
            .get(identity)
            .is_some_and(|roles| roles.contains(role))
    }
}

/// Identity of the caller, if one was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<String>);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(Caller(identity))
    }
}

/// Require `caller` to be present and to hold `role`.
///
/// Returns the identity on success.
pub fn authorize<'a>(
    caller: &'a Caller,
    roles: &dyn RoleProvider,
    role: &str,
) -> Result<&'a str, ApiError> {
    let identity = caller.0.as_deref().ok_or(ApiError::Forbidden)?;
    if roles.has_role(identity, role) {
        Ok(identity)
    } else {
        tracing::warn!(identity = %identity, role = %role, "Caller lacks required role");
        Err(ApiError::Unauthorized)
    }
}
