//! `assetology-auth`: route-level authorization boundary.
//!
//! This crate is intentionally decoupled from storage, transport and async:
//! it answers "may this role enter this path?" and "what should navigation do?".

pub mod authorize;
pub mod guard;
pub mod permissions;

pub use authorize::{AuthorizationExplanation, DenialKind};
pub use guard::{ACCESS_DENIED_NOTICE, GuardDecision, GuardRoutes, RouteGuard};
pub use permissions::{PermissionPolicy, RoutePermission};
