//! Configuration file parsing and discovery

use crate::config::schema::validate_config;
use crate::config::types::HelpConfig;
use crate::error::{ConfigError, ConfigResult, HelpError};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["richhelp.yml", "richhelp.yaml"];

/// File name inside the per-user config directory
const USER_CONFIG_FILE_NAME: &str = "config.yml";

/// Find the configuration file: the current directory and its parents
/// first, then the per-user config directory
pub fn find_config_file() -> ConfigResult<PathBuf> {
    let current_dir = env::current_dir().map_err(|e| {
        ConfigError::Invalid(format!("Failed to get current directory: {}", e))
    })?;

    match find_config_file_from(current_dir) {
        Ok(path) => Ok(path),
        Err(ConfigError::NotFound(searched)) => match user_config_file() {
            Some(path) if path.is_file() => Ok(path),
            Some(path) => Err(ConfigError::NotFound(format!(
                "{}, {}",
                searched,
                path.display()
            ))),
            None => Err(ConfigError::NotFound(searched)),
        },
        Err(e) => Err(e),
    }
}

/// Find the configuration file starting from a specific directory
pub fn find_config_file_from(start_dir: PathBuf) -> ConfigResult<PathBuf> {
    let mut current_dir = start_dir;
    let mut searched_paths = Vec::new();

    loop {
        for file_name in CONFIG_FILE_NAMES {
            let config_path = current_dir.join(file_name);
            searched_paths.push(config_path.display().to_string());

            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => return Err(ConfigError::NotFound(searched_paths.join(", "))),
        }
    }
}

/// Location of the per-user configuration file, whether or not it exists
pub fn user_config_file() -> Option<PathBuf> {
    ProjectDirs::from("", "", "richhelp")
        .map(|dirs| dirs.config_dir().join(USER_CONFIG_FILE_NAME))
}

/// Parse a configuration file from a path
pub fn parse_config_file(path: &Path) -> Result<HelpConfig, HelpError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    parse_config(&contents)
}

/// Parse configuration from a string; an empty document is the default config
pub fn parse_config(yaml: &str) -> Result<HelpConfig, HelpError> {
    let is_empty = yaml
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#') || line == "---");
    if is_empty {
        return Ok(HelpConfig::default());
    }

    let config: HelpConfig = serde_yaml::from_str(yaml)?;
    Ok(config)
}

/// Load and validate configuration.
///
/// An explicit path must exist. Without one, discovery runs and falls back
/// to the default configuration when nothing is found.
pub fn load_config(explicit: Option<&Path>) -> Result<(HelpConfig, Option<PathBuf>), HelpError> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            Err(ConfigError::NotFound(searched)) => {
                debug!(searched = %searched, "no config file, using defaults");
                None
            }
            Err(e) => return Err(e.into()),
        },
    };

    let config = match &path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            parse_config_file(path)?
        }
        None => HelpConfig::default(),
    };

    validate_config(&config)?;
    Ok((config, path))
}
