//! Path management for roadcost configuration files.
//!
//! ```text
//! ~/.config/roadcost/          # Config directory (platform config dir)
//! └── config.toml              # Client configuration
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct RoadcostPaths;

impl RoadcostPaths {
    const APP_DIR: &'static str = "roadcost";

    /// Returns the roadcost configuration directory (e.g. `~/.config/roadcost/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_inside_app_dir() {
        if let Ok(path) = RoadcostPaths::config_file() {
            assert!(path.ends_with("roadcost/config.toml"));
        }
    }
}
