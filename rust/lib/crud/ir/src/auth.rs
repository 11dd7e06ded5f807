//! Auth IR - CRUD operations and the per-operation access policy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six generated CRUD operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    ReadMany,
    Count,
    ReadOne,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Emission order. Generated units always list operations in this order.
    pub const ALL: [Operation; 6] = [
        Operation::ReadMany,
        Operation::Count,
        Operation::ReadOne,
        Operation::Create,
        Operation::Update,
        Operation::Delete,
    ];

    /// Key used for this operation in `@crudAuth` annotations.
    pub fn key(self) -> &'static str {
        match self {
            Operation::ReadMany => "readMany",
            Operation::Count => "count",
            Operation::ReadOne => "readOne",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    /// Returns true for operations that write data.
    pub fn is_mutation(self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Delete)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Privilege required to run one operation.
///
/// `public`, `user` and `admin` are well known and matched case-insensitively.
/// Anything else is a custom role, kept verbatim (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthLevel {
    Public,
    User,
    #[default]
    Admin,
    Custom(String),
}

impl AuthLevel {
    /// Parse a level string. Empty input means the default level (`admin`).
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("admin") {
            AuthLevel::Admin
        } else if s.eq_ignore_ascii_case("public") {
            AuthLevel::Public
        } else if s.eq_ignore_ascii_case("user") {
            AuthLevel::User
        } else {
            AuthLevel::Custom(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AuthLevel::Public => "public",
            AuthLevel::User => "user",
            AuthLevel::Admin => "admin",
            AuthLevel::Custom(role) => role,
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, AuthLevel::Public)
    }
}

impl From<&str> for AuthLevel {
    fn from(s: &str) -> Self {
        AuthLevel::parse(s)
    }
}

impl From<String> for AuthLevel {
    fn from(s: String) -> Self {
        AuthLevel::parse(&s)
    }
}

impl From<AuthLevel> for String {
    fn from(level: AuthLevel) -> Self {
        match level {
            AuthLevel::Custom(role) => role,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for AuthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved access policy: one level for each of the six operations.
///
/// Every key is always present. [`AuthPolicy::default`] is admin-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicy {
    pub read_one: AuthLevel,
    pub read_many: AuthLevel,
    pub count: AuthLevel,
    pub create: AuthLevel,
    pub update: AuthLevel,
    pub delete: AuthLevel,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self::uniform(AuthLevel::Admin)
    }
}

impl AuthPolicy {
    /// A policy with the same level for every operation.
    pub fn uniform(level: AuthLevel) -> Self {
        Self {
            read_one: level.clone(),
            read_many: level.clone(),
            count: level.clone(),
            create: level.clone(),
            update: level.clone(),
            delete: level,
        }
    }

    pub fn level(&self, op: Operation) -> &AuthLevel {
        match op {
            Operation::ReadOne => &self.read_one,
            Operation::ReadMany => &self.read_many,
            Operation::Count => &self.count,
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
        }
    }

    pub fn set(&mut self, op: Operation, level: AuthLevel) {
        let slot = match op {
            Operation::ReadOne => &mut self.read_one,
            Operation::ReadMany => &mut self.read_many,
            Operation::Count => &mut self.count,
            Operation::Create => &mut self.create,
            Operation::Update => &mut self.update,
            Operation::Delete => &mut self.delete,
        };
        *slot = level;
    }

    /// Shallow merge: keys set in `overrides` win, the rest keep this policy's level.
    pub fn merge(&self, overrides: &AuthOverrides) -> AuthPolicy {
        let mut merged = self.clone();
        for op in Operation::ALL {
            if let Some(level) = overrides.level(op) {
                merged.set(op, level.clone());
            }
        }
        merged
    }

    /// Levels in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Operation, &AuthLevel)> + '_ {
        Operation::ALL.into_iter().map(move |op| (op, self.level(op)))
    }
}

/// Partial policy as written in a `@crudAuth:` annotation or a config file.
///
/// Unknown keys are ignored; unset keys fall back to the base policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_one: Option<AuthLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_many: Option<AuthLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<AuthLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<AuthLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<AuthLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<AuthLevel>,
}

impl AuthOverrides {
    pub fn level(&self, op: Operation) -> Option<&AuthLevel> {
        match op {
            Operation::ReadOne => self.read_one.as_ref(),
            Operation::ReadMany => self.read_many.as_ref(),
            Operation::Count => self.count.as_ref(),
            Operation::Create => self.create.as_ref(),
            Operation::Update => self.update.as_ref(),
            Operation::Delete => self.delete.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Operation::ALL.iter().all(|op| self.level(*op).is_none())
    }
}
