//! Wiring of the client-side components from a [`DesktopConfig`].

use std::sync::Arc;

use anyhow::Context;

use assetology_auth::RouteGuard;

use crate::authority::{ApiClient, HttpAuthority};
use crate::config::DesktopConfig;
use crate::manager::AuthSessionManager;
use crate::settings::AppSettingsStore;
use crate::storage::FileStorage;
use crate::store::SessionStore;

pub type DesktopSessionManager = AuthSessionManager<Arc<FileStorage>, HttpAuthority>;

/// Everything the UI shell needs: the live session, the navigation guard,
/// branding settings and an API client for authenticated calls.
#[derive(Debug)]
pub struct ClientContext {
    pub sessions: DesktopSessionManager,
    pub guard: RouteGuard,
    pub settings: AppSettingsStore<Arc<FileStorage>>,
    pub api: ApiClient,
}

impl ClientContext {
    pub fn from_config(config: &DesktopConfig) -> anyhow::Result<Self> {
        let storage = Arc::new(
            FileStorage::open(&config.data_dir)
                .with_context(|| format!("failed to open data dir {}", config.data_dir.display()))?,
        );

        let api = ApiClient::from_config(config).context("failed to build API client")?;
        let sessions = AuthSessionManager::new(
            SessionStore::new(storage.clone()),
            HttpAuthority::new(api.clone()).with_timeout(config.auth_timeout),
        )
        .with_auth_timeout(config.auth_timeout);

        tracing::info!(
            api_url = %config.api_url,
            data_dir = %config.data_dir.display(),
            status = ?sessions.status(),
            "client context ready"
        );

        Ok(Self {
            sessions,
            guard: RouteGuard::default(),
            settings: AppSettingsStore::new(storage),
            api,
        })
    }
}
