//! Authenticated principal and province scoping.
//!
//! A principal whose role is restricted only ever sees its assigned
//! province. The resulting [`ProvinceScope`] is resolved once at the edge
//! and handed to the engine, which never widens it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::ProvinceId;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role, e.g. `Admin`, `Manager`, `ASM`, `Supervisor`.
    pub role: String,
    /// Province the user is assigned to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<Uuid>,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        role: &str,
        province: Option<Uuid>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            province,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the assigned province, if any.
    #[must_use]
    pub fn province_id(&self) -> Option<ProvinceId> {
        self.province.map(ProvinceId::from_uuid)
    }

    /// Resolves the scope this principal may query.
    ///
    /// A restricted principal is pinned to its own province whatever it
    /// asked for. Everyone else gets exactly what was requested.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::NoAssignedProvince` if the principal is restricted
    /// but carries no province.
    pub fn scope_for(
        &self,
        requested: ProvinceScope,
        restricted: bool,
    ) -> Result<ProvinceScope, ScopeError> {
        if !restricted {
            return Ok(requested);
        }
        self.province_id()
            .map(ProvinceScope::single)
            .ok_or_else(|| ScopeError::NoAssignedProvince(self.role.clone()))
    }
}

/// Errors raised while scoping a principal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// Restricted role without an assigned province.
    #[error("role '{0}' requires an assigned province")]
    NoAssignedProvince(String),
}

/// Set of provinces a query is allowed to touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ProvinceScope {
    /// Every province in the store.
    #[default]
    All,
    /// Only the listed provinces.
    Only(BTreeSet<ProvinceId>),
}

impl ProvinceScope {
    /// Builds a scope from a requested list; an empty list means all provinces.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ProvinceId>) -> Self {
        let set: BTreeSet<ProvinceId> = ids.into_iter().collect();
        if set.is_empty() {
            Self::All
        } else {
            Self::Only(set)
        }
    }

    /// Scope limited to one province.
    #[must_use]
    pub fn single(id: ProvinceId) -> Self {
        Self::Only(BTreeSet::from([id]))
    }

    /// Returns true if the province is inside this scope.
    #[must_use]
    pub fn contains(&self, id: ProvinceId) -> bool {
        match self {
            Self::All => true,
            Self::Only(ids) => ids.contains(&id),
        }
    }

    /// Returns true if the scope is unrestricted.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns the explicit province ids, or `None` for all provinces.
    #[must_use]
    pub const fn ids(&self) -> Option<&BTreeSet<ProvinceId>> {
        match self {
            Self::All => None,
            Self::Only(ids) => Some(ids),
        }
    }
}

impl std::fmt::Display for ProvinceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Only(ids) => {
                let mut first = true;
                for id in ids {
                    if !first {
                        f.write_str(",")?;
                    }
                    write!(f, "{id}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(role: &str, province: Option<Uuid>) -> Claims {
        Claims::new(Uuid::new_v4(), role, province, Utc::now() + Duration::minutes(5))
    }

    #[test]
    fn test_empty_request_means_all() {
        assert_eq!(ProvinceScope::from_ids([]), ProvinceScope::All);
    }

    #[test]
    fn test_unrestricted_principal_keeps_request() {
        let a = ProvinceId::new();
        let b = ProvinceId::new();
        let requested = ProvinceScope::from_ids([a, b]);
        let scope = claims("Admin", None)
            .scope_for(requested.clone(), false)
            .unwrap();
        assert_eq!(scope, requested);
    }

    #[test]
    fn test_restricted_principal_is_pinned_to_own_province() {
        let own = Uuid::new_v4();
        let other = ProvinceId::new();
        let scope = claims("ASM", Some(own))
            .scope_for(ProvinceScope::single(other), true)
            .unwrap();
        assert_eq!(scope, ProvinceScope::single(ProvinceId::from_uuid(own)));
        assert!(!scope.contains(other));

        let scope = claims("ASM", Some(own))
            .scope_for(ProvinceScope::All, true)
            .unwrap();
        assert!(!scope.is_all());
    }

    #[test]
    fn test_restricted_principal_without_province_is_rejected() {
        let err = claims("Supervisor", None)
            .scope_for(ProvinceScope::All, true)
            .unwrap_err();
        assert_eq!(err, ScopeError::NoAssignedProvince("Supervisor".into()));
    }

    #[test]
    fn test_scope_display_is_stable() {
        let a = ProvinceId::from_uuid(Uuid::from_u128(1));
        let b = ProvinceId::from_uuid(Uuid::from_u128(2));
        let scope = ProvinceScope::from_ids([b, a]);
        assert_eq!(
            scope.to_string(),
            "00000000-0000-0000-0000-000000000001,00000000-0000-0000-0000-000000000002"
        );
        assert_eq!(ProvinceScope::All.to_string(), "*");
    }
}
