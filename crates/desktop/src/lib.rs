//! `assetology-desktop`
//!
//! **Responsibility:** client-side session lifecycle for the asset
//! management front-end.
//!
//! This crate provides:
//! - Durable session persistence with self-healing restore
//! - Login/logout orchestration against a remote credential authority
//! - Session change notifications and navigation checks
//!
//! Authorization rules themselves live in `assetology-auth`; this crate
//! only feeds them the live session.

pub mod authority;
pub mod config;
pub mod context;
pub mod events;
pub mod manager;
pub mod settings;
pub mod storage;
pub mod store;

pub use authority::{ApiClient, AuthorityError, CredentialAuthority, HttpAuthority};
pub use config::DesktopConfig;
pub use context::{ClientContext, DesktopSessionManager};
pub use events::{SessionEvent, SessionEvents, Subscription};
pub use manager::{AuthError, AuthSessionManager, AuthStatus, LoginRequest};
pub use settings::{AppSettings, AppSettingsStore, SettingsPatch, Theme};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{SessionStore, StoreError, StoredSession};
