//! `assetology-core`: identity primitives shared by the access-control gate.
//!
//! This crate contains **pure domain** types (no storage, no transport).

pub mod error;
pub mod role;
pub mod session;

pub use error::{DomainError, DomainResult};
pub use role::Role;
pub use session::{BearerToken, ProfileUpdate, Session};
