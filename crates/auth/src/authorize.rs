use serde::Serialize;

use assetology_core::Role;

use crate::PermissionPolicy;

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a route authorization decision.
///
/// Produced by [`PermissionPolicy::explain`]; `granted` always equals
/// [`PermissionPolicy::evaluate`] for the same inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    /// The path that was being checked.
    pub path: String,

    /// The role asking for access.
    pub role: Role,

    /// Whether access was granted.
    pub granted: bool,

    /// Prefix of the governing entry, if any entry matched.
    pub matched_prefix: Option<String>,

    /// Roles allowed by the governing entry (empty when nothing matched).
    pub allowed_roles: Vec<Role>,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// If denied, why.
    pub denial: Option<DenialKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoMatchingRoute,
    RoleNotAllowed,
}

impl PermissionPolicy {
    /// Explain why `role` is (or is not) allowed to access `path`.
    pub fn explain(&self, role: Role, path: &str) -> AuthorizationExplanation {
        let Some(entry) = self.governing_entry(path) else {
            return AuthorizationExplanation {
                path: path.to_string(),
                role,
                granted: false,
                matched_prefix: None,
                allowed_roles: Vec::new(),
                reason: format!("no route permission covers '{path}'"),
                denial: Some(DenialKind::NoMatchingRoute),
            };
        };

        let granted = entry.allows(role);
        let reason = if granted {
            format!("role '{role}' is allowed by route '{}'", entry.prefix())
        } else {
            let allowed: Vec<&str> = entry.allowed_roles().iter().map(Role::as_str).collect();
            format!(
                "role '{role}' is not allowed by route '{}' (allowed: {})",
                entry.prefix(),
                allowed.join(", ")
            )
        };

        AuthorizationExplanation {
            path: path.to_string(),
            role,
            granted,
            matched_prefix: Some(entry.prefix().to_string()),
            allowed_roles: entry.allowed_roles().to_vec(),
            reason,
            denial: (!granted).then_some(DenialKind::RoleNotAllowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RoutePermission;
    use proptest::prelude::*;

    #[test]
    fn explains_role_not_allowed() {
        let policy = PermissionPolicy::standard();
        let explanation = policy.explain(Role::Guest, "/settings");

        assert!(!explanation.granted);
        assert_eq!(explanation.matched_prefix.as_deref(), Some("/settings"));
        assert_eq!(explanation.allowed_roles, vec![Role::Admin]);
        assert_eq!(explanation.denial, Some(DenialKind::RoleNotAllowed));
        assert!(explanation.reason.contains("allowed: admin"));
    }

    #[test]
    fn explains_missing_route() {
        let policy = PermissionPolicy::new(vec![RoutePermission::new("/reports", [Role::Admin])]);
        let explanation = policy.explain(Role::Admin, "/unknown");

        assert!(!explanation.granted);
        assert_eq!(explanation.matched_prefix, None);
        assert_eq!(explanation.denial, Some(DenialKind::NoMatchingRoute));
    }

    #[test]
    fn explains_grant() {
        let explanation = PermissionPolicy::standard().explain(Role::User, "/asset-count/42");
        assert!(explanation.granted);
        assert_eq!(explanation.denial, None);
        assert_eq!(explanation.matched_prefix.as_deref(), Some("/asset-count"));
    }

    #[test]
    fn serializes_denial_kind_snake_case() {
        let json = serde_json::to_value(DenialKind::NoMatchingRoute).unwrap();
        assert_eq!(json, "no_matching_route");
    }

    const PATHS: &[&str] = &[
        "/",
        "/asset-register",
        "/asset-register/new",
        "/asset-assessment",
        "/reports",
        "/settings",
        "/login",
        "",
        "relative",
    ];

    proptest! {
        #[test]
        fn explain_agrees_with_evaluate(
            role in prop::sample::select(Role::ALL.to_vec()),
            path in prop::sample::select(PATHS.to_vec()),
            suffix in "[a-z/-]{0,8}",
        ) {
            let policy = PermissionPolicy::standard();
            let path = format!("{path}{suffix}");
            let explanation = policy.explain(role, &path);
            prop_assert_eq!(explanation.granted, policy.evaluate(role, &path));
            prop_assert_eq!(explanation.denial.is_none(), explanation.granted);
        }
    }
}
