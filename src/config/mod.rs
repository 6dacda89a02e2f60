pub mod types;

use crate::error::{ConfigError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = ".cfn-tag-lint.toml";

/// Get the global config file path (~/.cfn-tag-lint.toml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_FILE_NAME))
}

/// Get the local config file path (dir/.cfn-tag-lint.toml)
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

/// Load and parse a single configuration file.
pub fn load_config_file(path: &Path) -> Result<types::Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| ConfigError::ParsingFailed(format!("{}: {}", path.display(), e)))?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load configuration from file or use defaults.
///
/// An explicit path must exist. Otherwise the local config in `working_dir`
/// is tried first, then the global config.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<types::Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()).into());
        }
        return load_config_file(path);
    }

    let local = local_config_path(working_dir);
    if local.exists() {
        return load_config_file(&local);
    }

    if let Some(global) = global_config_path()
        && global.exists()
    {
        return load_config_file(&global);
    }

    Ok(types::Config::default())
}
