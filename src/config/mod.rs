//! Application configuration: where the notes live and how much history to show.
//!
//! Stored as pretty-printed JSON. A missing file is created with defaults on
//! first load; writes go through a temp file and a rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::{get_home_dir, resolve_root};

pub const DEFAULT_ROOT_DIR: &str = "QuickNotes";
pub const DEFAULT_HOTKEY: &str = "Ctrl+Alt+Space";
pub const DEFAULT_HISTORY_DAYS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Notes root; relative paths are resolved under the home directory
    pub root_path: String,
    /// Global hotkey, passed through untouched to the shell that registers it
    pub hotkey: String,
    /// Default window for recent notes
    pub history_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root_path: DEFAULT_ROOT_DIR.to_string(),
            hotkey: DEFAULT_HOTKEY.to_string(),
            history_days: DEFAULT_HISTORY_DAYS,
        }
    }
}

impl AppConfig {
    /// Load the config at `path`, writing defaults there first if it does not exist
    ///
    /// On first creation the default root is made absolute under the home
    /// directory when the home directory can be determined.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let mut config = Self::default();
                if let Ok(home) = get_home_dir() {
                    config.root_path = home.join(DEFAULT_ROOT_DIR).to_string_lossy().into_owned();
                }
                config.save(path)?;
                log::info!("Created default config at {}", path.display());
                Ok(config)
            }
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read config file: {}", path.display())),
        }
    }

    /// Write the config atomically (temp file + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, json).context("Failed to write config temp file")?;
        fs::rename(&temp, path).context("Failed to rename config temp file")?;
        Ok(())
    }

    /// Absolute notes root
    pub fn resolved_root(&self) -> Result<PathBuf> {
        resolve_root(&self.root_path)
    }
}
