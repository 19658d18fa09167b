use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::environment::get_home_dir;

/// Resolve a configured root: absolute paths are kept, relative ones are
/// placed under the home directory
pub fn resolve_root(root_path: &str) -> Result<PathBuf> {
    let path = Path::new(root_path);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(resolve_root_internal(path, &get_home_dir()?))
}

fn resolve_root_internal(root: &Path, home: &Path) -> PathBuf {
    let expanded = root.strip_prefix("~").unwrap_or(root);
    home.join(expanded)
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use quick_capture::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/QuickNotes");
/// // Returns "~/QuickNotes" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

/// Internal helper for path formatting with optional home override (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    // Avoid double allocation when converting Cow to String
    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
