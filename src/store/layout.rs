//! Date-sharded directory layout: `root/YYYY/MM/YYYY-MM-DD.md`.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::{NoteError, NoteResult};

/// `strftime` format of a calendar date and of a daily file stem
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of daily files, and of the files search visits
pub const NOTE_EXTENSION: &str = "md";

/// Per-month directory holding uploaded attachments
pub const ATTACHMENT_DIR_NAME: &str = "Attachment";

/// Parse a strict `YYYY-MM-DD` string
///
/// # Errors
///
/// Returns [`NoteError::InvalidDate`] if the string is not a valid calendar date.
pub fn parse_date(value: &str) -> NoteResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| NoteError::invalid_date(value, e))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `root/YYYY/MM` for the given date
pub fn month_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(format!("{:04}", date.year())).join(format!("{:02}", date.month()))
}

/// `root/YYYY/MM/YYYY-MM-DD.md` for the given date
pub fn daily_file_path(root: &Path, date: NaiveDate) -> PathBuf {
    month_dir(root, date).join(format!("{}.{}", format_date(date), NOTE_EXTENSION))
}

/// `root/YYYY/MM/Attachment` for the given date
pub fn attachment_dir(root: &Path, date: NaiveDate) -> PathBuf {
    month_dir(root, date).join(ATTACHMENT_DIR_NAME)
}

/// Returns the date a daily file name stands for, if it is exactly
/// `YYYY-MM-DD.md` with a valid calendar date
pub fn daily_file_date(file_name: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(".md")?;
    let bytes = stem.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}
