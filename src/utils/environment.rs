use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "QUICK_CAPTURE_CONFIG";

/// Get the user's home directory from `$HOME`, falling back to the platform lookup
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = env::var("HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().context("Could not determine home directory")
}

/// Location of `config.json`: `$QUICK_CAPTURE_CONFIG`, else the platform config dir
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR)
        && !path.is_empty()
    {
        return Ok(PathBuf::from(path));
    }
    let config_dir = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(config_dir.join("quick-capture").join("config.json"))
}
