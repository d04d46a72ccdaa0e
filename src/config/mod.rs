use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::utils::url::UrlUtils;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// How long in-flight requests may keep running after a shutdown signal
    #[serde(default = "default_shutdown_grace_period", with = "duration_serde::duration")]
    pub shutdown_grace_period: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the species source; the species name is appended as a path segment
    #[serde(default = "default_species_base_url")]
    pub species_base_url: String,
    /// Base URL of the translation source; `<kind>.json` is appended
    #[serde(default = "default_translation_base_url")]
    pub translation_base_url: String,
    /// Timeout applied to every upstream call
    #[serde(default = "default_request_timeout", with = "duration_serde::duration")]
    pub request_timeout: Duration,
    /// Overrides the default `pokedex-proxy/<version>` user agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether translation results are memoized per species and style
    #[serde(default = "default_cache_translations")]
    pub cache_translations: bool,
}

// Web defaults
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_shutdown_grace_period() -> Duration {
    Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_PERIOD_SECS)
}

// Upstream defaults
fn default_species_base_url() -> String {
    DEFAULT_SPECIES_BASE_URL.to_string()
}

fn default_translation_base_url() -> String {
    DEFAULT_TRANSLATION_BASE_URL.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
}

// Cache defaults
fn default_cache_translations() -> bool {
    DEFAULT_CACHE_TRANSLATIONS
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_grace_period: default_shutdown_grace_period(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            species_base_url: default_species_base_url(),
            translation_base_url: default_translation_base_url(),
            request_timeout: default_request_timeout(),
            user_agent: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_translations: default_cache_translations(),
        }
    }
}

impl UpstreamConfig {
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        })
    }
}

/// Command-line settings that take precedence over file and environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub species_base_url: Option<String>,
    pub translation_base_url: Option<String>,
}

impl Config {
    /// Build the effective configuration: file, then environment, then
    /// `overrides`, validated once at the end. A bad file value replaced by
    /// an override therefore never fails startup.
    pub fn load(config_file: &str, overrides: &ConfigOverrides) -> Result<Self> {
        let mut config = Self::load_from_file(config_file)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Read `config_file`, writing the defaults there if the file does not
    /// exist yet, and apply environment overrides. Not validated.
    pub fn load_from_file(config_file: &str) -> Result<Self> {
        let mut config = if std::path::Path::new(&config_file).exists() {
            let contents = std::fs::read_to_string(config_file)?;
            toml::from_str(&contents)?
        } else {
            let default_config = Self::default();
            let contents = toml::to_string_pretty(&default_config)?;
            std::fs::write(config_file, contents)?;
            info!("Created default config file: {}", config_file);
            default_config
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.web.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.web.port = port;
        }
        if let Some(url) = &overrides.species_base_url {
            self.upstream.species_base_url = url.clone();
        }
        if let Some(url) = &overrides.translation_base_url {
            self.upstream.translation_base_url = url.clone();
        }
    }

    /// Apply `POKEDEX_PROXY_HOST` / `POKEDEX_PROXY_PORT` on top of file values
    pub fn apply_env_overrides(&mut self) -> AppResult<()> {
        if let Ok(host) = std::env::var("POKEDEX_PROXY_HOST") {
            self.web.host = host;
        }
        if let Ok(port) = std::env::var("POKEDEX_PROXY_PORT") {
            self.web.port = port.parse().map_err(|_| {
                AppError::configuration(format!(
                    "POKEDEX_PROXY_PORT is not a valid port: {port}"
                ))
            })?;
        }
        Ok(())
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> AppResult<()> {
        UrlUtils::parse_and_validate(&self.upstream.species_base_url).map_err(|e| {
            AppError::configuration(format!("upstream.species_base_url: {e}"))
        })?;
        UrlUtils::parse_and_validate(&self.upstream.translation_base_url).map_err(|e| {
            AppError::configuration(format!("upstream.translation_base_url: {e}"))
        })?;

        if self.upstream.request_timeout.is_zero() {
            return Err(AppError::configuration(
                "upstream.request_timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    /// Listen address as `host:port`
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.web.host, self.web.port)
    }
}
