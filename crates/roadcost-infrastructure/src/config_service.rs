//! Configuration service implementation.
//!
//! Loads [`ClientConfig`] from `~/.config/roadcost/config.toml` and applies
//! the `ROADCOST_API_TARGET` environment override.

use crate::paths::RoadcostPaths;
use roadcost_core::config::API_TARGET_ENV;
use roadcost_core::{ClientConfig, Result, RoadcostError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` resolves the platform default on load.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service that reads the platform default config file.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service bound to a specific config file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an error, so a typo never silently points the client at the
    /// default target.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let path = self.resolve_path()?;
        let loaded = load_file(&path)?;
        let loaded = apply_target_override(loaded, std::env::var(API_TARGET_ENV).ok());

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => RoadcostPaths::config_file().map_err(|e| RoadcostError::config(e.to_string())),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn load_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(ClientConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: ClientConfig = toml::from_str(&content).map_err(|e| {
        RoadcostError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;
    tracing::debug!(path = %path.display(), target = %config.api_target, "loaded config file");
    Ok(config)
}

/// Replaces the configured target with a non-blank override.
pub fn apply_target_override(config: ClientConfig, target: Option<String>) -> ClientConfig {
    match target {
        Some(target) if !target.trim().is_empty() => config.with_api_target(target.trim()),
        _ => config,
    }
}
