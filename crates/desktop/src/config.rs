//! Client configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

use assetology_observability::LogFormat;

pub const ENV_API_URL: &str = "ASSETOLOGY_API_URL";
pub const ENV_LOCATION: &str = "ASSETOLOGY_LOCATION";
pub const ENV_AUTH_TIMEOUT_SECS: &str = "ASSETOLOGY_AUTH_TIMEOUT_SECS";
pub const ENV_DATA_DIR: &str = "ASSETOLOGY_DATA_DIR";
pub const ENV_LOG_FORMAT: &str = "ASSETOLOGY_LOG_FORMAT";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_LOCATION: &str = "001";
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    /// Base URL of the remote API (credential authority included).
    pub api_url: String,
    /// Value sent as the `x-location` header.
    pub location: String,
    /// Upper bound on a single authentication round-trip.
    pub auth_timeout: Duration,
    /// Directory holding the persisted session/settings slots.
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl DesktopConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (tests inject a map).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let location = lookup(ENV_LOCATION).unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let auth_timeout = match lookup(ENV_AUTH_TIMEOUT_SECS) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{ENV_AUTH_TIMEOUT_SECS} must be whole seconds, got '{raw}'"))?;
                anyhow::ensure!(secs > 0, "{ENV_AUTH_TIMEOUT_SECS} must be greater than zero");
                Duration::from_secs(secs)
            }
            None => DEFAULT_AUTH_TIMEOUT,
        };

        let data_dir = match lookup(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .with_context(|| format!("invalid {ENV_LOG_FORMAT}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api_url,
            location,
            auth_timeout,
            data_dir,
            log_format,
        })
    }
}

fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    dir.push("assetology");
    Ok(dir)
}
