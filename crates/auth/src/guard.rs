//! Per-navigation gate: render, redirect to login, or deny.

use std::borrow::Cow;

use assetology_core::{DomainError, DomainResult, Role, Session};

use crate::PermissionPolicy;

/// The single notice shown when a navigation is blocked.
pub const ACCESS_DENIED_NOTICE: &str = "You don't have permission to access this page";

/// Redirect targets used by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRoutes {
    /// Login entry point for anonymous visitors.
    pub login: Cow<'static, str>,
    /// Landing route for denied navigations; must admit every role.
    pub landing: Cow<'static, str>,
}

impl Default for GuardRoutes {
    fn default() -> Self {
        Self {
            login: Cow::Borrowed("/login"),
            landing: Cow::Borrowed("/"),
        }
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view.
    Render,
    /// No session: send the visitor to the login entry point.
    RedirectToLogin { to: String },
    /// Session present but its role may not enter the path. `notice` is
    /// shown exactly once for this attempt.
    AccessDenied { to: String, notice: String },
}

impl GuardDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }

    /// Redirect target, if the decision redirects.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Render => None,
            GuardDecision::RedirectToLogin { to } | GuardDecision::AccessDenied { to, .. } => {
                Some(to.as_str())
            }
        }
    }
}

/// Gatekeeper consulted before rendering any protected view.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    policy: PermissionPolicy,
    routes: GuardRoutes,
}

impl RouteGuard {
    /// Build a guard over `policy`.
    ///
    /// Fails unless the landing route is permitted for every role, so a
    /// denial redirect can never itself be denied.
    pub fn new(policy: PermissionPolicy, routes: GuardRoutes) -> DomainResult<Self> {
        let refused: Vec<Role> = Role::ALL
            .into_iter()
            .filter(|role| !policy.evaluate(*role, &routes.landing))
            .collect();

        if !refused.is_empty() {
            let names: Vec<&str> = refused.iter().map(Role::as_str).collect();
            return Err(DomainError::invariant(format!(
                "landing route '{}' is not permitted for: {}",
                routes.landing,
                names.join(", ")
            )));
        }

        Ok(Self { policy, routes })
    }

    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    pub fn routes(&self) -> &GuardRoutes {
        &self.routes
    }

    /// Decide what a navigation to `path` should do for `session`.
    pub fn check(&self, session: Option<&Session>, path: &str) -> GuardDecision {
        let Some(session) = session else {
            tracing::debug!(path, "anonymous navigation redirected to login");
            return GuardDecision::RedirectToLogin {
                to: self.routes.login.to_string(),
            };
        };

        let explanation = self.policy.explain(session.role(), path);
        if explanation.granted {
            return GuardDecision::Render;
        }

        // Both privileged and unprivileged roles land on the same route.
        tracing::info!(
            path,
            username = session.username(),
            role = %session.role(),
            reason = %explanation.reason,
            "navigation denied"
        );
        GuardDecision::AccessDenied {
            to: self.routes.landing.to_string(),
            notice: ACCESS_DENIED_NOTICE.to_string(),
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            policy: PermissionPolicy::standard(),
            routes: GuardRoutes::default(),
        }
    }
}
