//! Error types for the note store.
//!
//! Absence of a daily file is a normal steady state for most reads and is
//! recovered locally by the store. It only surfaces as [`NoteError::NotFound`]
//! from [`crate::store::NoteStore::read_daily`], where the caller asked for one
//! specific day.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    /// A date string did not parse as `YYYY-MM-DD`
    #[error("Invalid date '{value}', expected YYYY-MM-DD: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Note file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Filesystem failure with the operation and path that triggered it
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl NoteError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io { action, path: path.to_path_buf(), source }
    }

    pub(crate) fn invalid_date(value: &str, source: chrono::ParseError) -> Self {
        Self::InvalidDate { value: value.to_string(), source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type NoteResult<T> = std::result::Result<T, NoteError>;
