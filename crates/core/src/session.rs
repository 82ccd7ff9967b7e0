//! Authenticated identity and its bearer credential.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{DomainError, DomainResult, Role};

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

/// The identity bound to the current client context.
///
/// Serialises to the persisted `user` slot shape:
/// `{"username", "department", "role", "location"?}`.
///
/// # Invariants
/// - `username` is never empty for a session built by [`Session::new`] or
///   accepted by [`Session::validate`].
/// - `role` is client-asserted at login; it is not verified by the authority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    username: String,
    department: String,
    #[serde(default, deserialize_with = "role_or_default")]
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        department: impl Into<String>,
        role: Role,
    ) -> DomainResult<Self> {
        let session = Self {
            username: username.into(),
            department: department.into(),
            role,
            location: None,
        };
        session.validate()?;
        Ok(session)
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Check invariants that deserialisation alone cannot enforce.
    pub fn validate(&self) -> DomainResult<()> {
        if self.username.trim().is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        Ok(())
    }

    /// Return a copy of this session with profile fields replaced.
    ///
    /// The role is never touched by a profile update.
    pub fn apply_profile(&self, update: &ProfileUpdate) -> DomainResult<Self> {
        let mut next = self.clone();
        if let Some(username) = &update.username {
            next.username = username.clone();
        }
        if let Some(department) = &update.department {
            next.department = department.clone();
        }
        if let Some(location) = &update.location {
            next.location = Some(location.clone());
        }
        next.validate()?;
        Ok(next)
    }
}

impl core::fmt::Display for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}@{} ({})", self.username, self.department, self.role)
    }
}

/// A missing, `null` or empty role restores as [`Role::User`].
fn role_or_default<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Role::default()),
        Some(name) => name.parse().map_err(serde::de::Error::custom),
    }
}

/// Profile fields editable from the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Bearer token
// ─────────────────────────────────────────────────────────────────────────────

/// Opaque credential issued by the external authority.
///
/// Never parsed or interpreted; only stored and attached to outgoing requests.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("bearer token must not be empty"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl core::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}
