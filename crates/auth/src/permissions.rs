use std::borrow::Cow;

use serde::Serialize;

use assetology_core::Role;

/// One row of the route table: a path prefix and the roles allowed behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePermission {
    prefix: Cow<'static, str>,
    allowed: Vec<Role>,
}

impl RoutePermission {
    pub fn new(prefix: impl Into<Cow<'static, str>>, allowed: impl IntoIterator<Item = Role>) -> Self {
        let mut roles: Vec<Role> = Vec::new();
        for role in allowed {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        Self {
            prefix: prefix.into(),
            allowed: roles,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed.contains(&role)
    }

    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prefix())
    }
}

/// Ordered route table deciding whether a role may enter a path.
///
/// Matching is **first match in declared order**, not longest match. An entry
/// whose prefix is covered by an earlier entry can never be selected; such
/// entries are kept (the order is the deployment's decision) and reported by
/// [`PermissionPolicy::unreachable_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionPolicy {
    entries: Vec<RoutePermission>,
}

impl PermissionPolicy {
    pub fn new(entries: Vec<RoutePermission>) -> Self {
        let policy = Self { entries };
        for shadowed in policy.unreachable_entries() {
            tracing::warn!(
                prefix = shadowed.prefix(),
                "route permission is shadowed by an earlier prefix and will never match"
            );
        }
        policy
    }

    /// The route table shipped with the asset management front-end.
    ///
    /// The role-neutral `/` row is declared last; declared first it would
    /// match every path and shadow the rest of the table.
    pub fn standard() -> Self {
        use Role::{Admin, Guest, Manager, User};

        Self::new(vec![
            RoutePermission::new("/asset-register", [Admin, Manager, User]),
            RoutePermission::new("/asset-received", [Admin, Manager, User]),
            RoutePermission::new("/asset-assessment", [Admin, Manager]),
            RoutePermission::new("/asset-move", [Admin, Manager, User]),
            RoutePermission::new("/asset-count", [Admin, Manager, User]),
            RoutePermission::new("/reports", [Admin, Manager]),
            RoutePermission::new("/settings", [Admin]),
            RoutePermission::new("/", [Admin, Manager, User, Guest]),
        ])
    }

    pub fn entries(&self) -> &[RoutePermission] {
        &self.entries
    }

    /// The entry governing `path`: the first one whose prefix leads it.
    pub fn governing_entry(&self, path: &str) -> Option<&RoutePermission> {
        self.entries.iter().find(|entry| entry.matches(path))
    }

    /// Decide whether `role` may access `path`.
    ///
    /// - No IO
    /// - No panics
    /// - Unmatched paths are denied
    pub fn evaluate(&self, role: Role, path: &str) -> bool {
        self.governing_entry(path)
            .is_some_and(|entry| entry.allows(role))
    }

    /// Route prefixes listing `role`, in declared order (navigation menus).
    pub fn accessible_routes(&self, role: Role) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.allows(role))
            .map(RoutePermission::prefix)
            .collect()
    }

    /// Entries that can never govern a path because an earlier prefix
    /// already leads theirs.
    pub fn unreachable_entries(&self) -> Vec<&RoutePermission> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(idx, entry)| {
                self.entries[..*idx]
                    .iter()
                    .any(|earlier| entry.prefix().starts_with(earlier.prefix()))
            })
            .map(|(_, entry)| entry)
            .collect()
    }
}

impl Default for PermissionPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
