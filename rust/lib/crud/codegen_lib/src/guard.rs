//! Guard resolver: auth level → guard token.
//!
//! | level            | token                 |
//! |------------------|-----------------------|
//! | `public`         | none (no guard)       |
//! | `user`           | `JwtAuthGuard`        |
//! | `admin` / empty  | `AdminGuard`          |
//! | `editor`         | `AuthEditorGuard`     |
//!
//! Pure and total: any string yields either `None` or a valid identifier.

use std::collections::BTreeSet;

use crudgen_ir::{naming, AuthLevel, AuthPolicy, Operation};
use serde::{Deserialize, Serialize};

/// Naming conventions for guard tokens. Overridable from the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConventions {
    /// Token for `user`.
    pub user: String,
    /// Token for `admin`.
    pub admin: String,
    /// Custom roles become `{custom_prefix}{PascalRole}{custom_suffix}`.
    pub custom_prefix: String,
    pub custom_suffix: String,
}

impl Default for GuardConventions {
    fn default() -> Self {
        Self {
            user: "JwtAuthGuard".to_string(),
            admin: "AdminGuard".to_string(),
            custom_prefix: "Auth".to_string(),
            custom_suffix: "Guard".to_string(),
        }
    }
}

impl GuardConventions {
    /// Guard token for a parsed level; `None` for public.
    pub fn resolve(&self, level: &AuthLevel) -> Option<String> {
        match level {
            AuthLevel::Public => None,
            AuthLevel::User => Some(self.user.clone()),
            AuthLevel::Admin => Some(self.admin.clone()),
            AuthLevel::Custom(role) => Some(format!(
                "{}{}{}",
                self.custom_prefix,
                naming::pascal_case(role),
                self.custom_suffix
            )),
        }
    }

    /// Guard token for a raw level string. Missing or empty means admin.
    pub fn guard_for(&self, level: Option<&str>) -> Option<String> {
        self.resolve(&level.map(AuthLevel::parse).unwrap_or_default())
    }

    /// Guard of each operation, in emission order.
    pub fn guards(&self, policy: &AuthPolicy) -> Vec<(Operation, Option<String>)> {
        policy
            .iter()
            .map(|(op, level)| (op, self.resolve(level)))
            .collect()
    }

    /// Distinct guard tokens used by a policy, sorted.
    pub fn distinct_guards(&self, policy: &AuthPolicy) -> Vec<String> {
        policy
            .iter()
            .filter_map(|(_, level)| self.resolve(level))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Guard token for a raw level string under the default conventions.
pub fn guard_for(level: Option<&str>) -> Option<String> {
    GuardConventions::default().guard_for(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_levels() {
        assert_eq!(guard_for(Some("public")), None);
        assert_eq!(guard_for(Some("PUBLIC")), None);
        assert_eq!(guard_for(Some("user")).as_deref(), Some("JwtAuthGuard"));
        assert_eq!(guard_for(Some("Admin")).as_deref(), Some("AdminGuard"));
    }

    #[test]
    fn missing_or_empty_is_admin() {
        assert_eq!(guard_for(None).as_deref(), Some("AdminGuard"));
        assert_eq!(guard_for(Some("")).as_deref(), Some("AdminGuard"));
        assert_eq!(guard_for(Some("   ")).as_deref(), Some("AdminGuard"));
    }

    #[test]
    fn custom_roles_are_templated() {
        assert_eq!(guard_for(Some("editor")).as_deref(), Some("AuthEditorGuard"));
        assert_eq!(guard_for(Some("content-editor")).as_deref(), Some("AuthContentEditorGuard"));
        assert_eq!(guard_for(Some("super_admin")).as_deref(), Some("AuthSuperAdminGuard"));
    }

    #[test]
    fn deterministic() {
        let first = guard_for(Some("editor"));
        for _ in 0..3 {
            assert_eq!(guard_for(Some("editor")), first);
        }
    }

    #[test]
    fn custom_conventions() {
        let conventions = GuardConventions {
            user: "GqlAuthGuard".into(),
            admin: "GqlAdminGuard".into(),
            custom_prefix: "Gql".into(),
            custom_suffix: "RoleGuard".into(),
        };
        assert_eq!(conventions.guard_for(Some("user")).as_deref(), Some("GqlAuthGuard"));
        assert_eq!(conventions.guard_for(Some("editor")).as_deref(), Some("GqlEditorRoleGuard"));
    }

    #[test]
    fn distinct_guards_are_sorted_and_deduplicated() {
        let mut policy = AuthPolicy::default();
        policy.read_many = AuthLevel::Public;
        policy.count = AuthLevel::Public;
        policy.create = AuthLevel::User;
        policy.update = AuthLevel::Custom("editor".into());
        let guards = GuardConventions::default().distinct_guards(&policy);
        assert_eq!(guards, ["AdminGuard", "AuthEditorGuard", "JwtAuthGuard"]);
    }

    #[test]
    fn all_public_uses_no_guards() {
        let policy = AuthPolicy::uniform(AuthLevel::Public);
        let conventions = GuardConventions::default();
        assert!(conventions.distinct_guards(&policy).is_empty());
        assert!(conventions.guards(&policy).iter().all(|(_, g)| g.is_none()));
    }
}
