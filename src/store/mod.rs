//! Date-sharded, append-only note store.
//!
//! The filesystem is the single source of truth: a `NoteStore` holds only its
//! root path and reads files fresh on every call.
//!
//! # Error Handling Strategy
//!
//! - **Missing days**: A date whose file does not exist is a legitimate steady
//!   state ("no notes yet"). Range and recent reads skip it silently.
//! - **Missing day on direct lookup**: [`NoteStore::read_daily`] reports
//!   [`NoteError::NotFound`] so the caller can show an empty day.
//! - **Genuine I/O failures**: Permission errors, full disks and the like
//!   propagate as [`NoteError::Io`] carrying the operation and path.
//!   Nothing is retried here.
//! - **Free text**: Non-entry lines are excluded from parsed entries, never an error.

pub mod layout;

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate, NaiveDateTime};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::error::{NoteError, NoteResult};
use crate::models::{DailyNote, NoteEntry};
use crate::parsers::{decode_lossy, encode_line, format_time_marker, parse_note_file};
use layout::{
    ATTACHMENT_DIR_NAME, daily_file_date, daily_file_path, format_date, month_dir, parse_date,
};

/// Recent-notes windows longer than this are bounded by [`NoteStore::list_dates`]
const LONG_WINDOW_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Build a store rooted at the configured notes directory
    ///
    /// A relative `root_path` is resolved under the home directory.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self::new(config.resolved_root()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Append one entry to the daily file of `now`'s date.
    ///
    /// Empty content is a no-op: no directory or file is created. The encoded
    /// line is written with a single `write_all` on an append-mode handle, so a
    /// concurrent reader sees either the whole line or none of it.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Io`] if the month directory cannot be created or
    /// the daily file cannot be opened or written.
    pub fn append_note(&self, content: &str, now: NaiveDateTime) -> NoteResult<()> {
        if content.is_empty() {
            return Ok(());
        }

        let date = now.date();
        self.ensure_month_dir(date)?;

        let path = daily_file_path(&self.root, date);
        let line = encode_line(&format_time_marker(&now.time()), content);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| NoteError::io("open note file", &path, e))?;
        file.write_all(line.as_bytes()).map_err(|e| NoteError::io("write note", &path, e))?;

        log::debug!("Appended note to {}", path.display());
        Ok(())
    }

    /// Daily notes for the last `n_days` days ending at `today`, newest first.
    ///
    /// Days without a file are skipped. `n_days == 0` yields nothing; a window
    /// reaching past the earliest representable date is clamped to it.
    pub fn read_recent(&self, n_days: u32, today: NaiveDate) -> NoteResult<Vec<DailyNote>> {
        if n_days == 0 {
            return Ok(Vec::new());
        }
        let mut start = today
            .checked_sub_days(Days::new(u64::from(n_days - 1)))
            .unwrap_or(NaiveDate::MIN);
        // Long windows start at the oldest day on disk instead of probing every date
        if (today - start).num_days() > LONG_WINDOW_DAYS {
            match self.list_dates()?.last() {
                Some(oldest) => start = start.max(*oldest),
                None => return Ok(Vec::new()),
            }
        }
        self.daily_notes_between(start, today)
    }

    /// Whole-day contents for the inclusive range `[start, end]`, newest first
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::InvalidDate`] for a malformed date and
    /// [`NoteError::Io`] if an existing file cannot be read.
    pub fn read_daily_notes(&self, start: &str, end: &str) -> NoteResult<Vec<DailyNote>> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        self.daily_notes_between(start, end)
    }

    fn daily_notes_between(&self, start: NaiveDate, end: NaiveDate) -> NoteResult<Vec<DailyNote>> {
        let mut notes = Vec::new();
        for date in days_descending(start, end) {
            let path = daily_file_path(&self.root, date);
            match fs::read(&path) {
                Ok(bytes) => {
                    notes.push(DailyNote { date: format_date(date), content: decode_lossy(bytes) })
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(NoteError::io("read note file", &path, e)),
            }
        }
        Ok(notes)
    }

    /// Parsed entries for the inclusive range `[start, end]`.
    ///
    /// Days are visited from `end` down to `start` and each day's entries are
    /// returned last-written-first, so the whole sequence is reverse
    /// chronological. `start > end` is an empty range, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::InvalidDate`] if either bound is not `YYYY-MM-DD`,
    /// and [`NoteError::Io`] if an existing file cannot be read.
    pub fn read_range(&self, start: &str, end: &str) -> NoteResult<Vec<NoteEntry>> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;

        let mut entries = Vec::new();
        for date in days_descending(start, end) {
            let path = daily_file_path(&self.root, date);
            match parse_note_file(&path, &format_date(date)) {
                Ok(day_entries) => entries.extend(day_entries.into_iter().rev()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(NoteError::io("read note file", &path, e)),
            }
        }
        Ok(entries)
    }

    /// Raw content of exactly one day's file, with invalid UTF-8 replaced
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::NotFound`] if that day has no file yet.
    pub fn read_daily(&self, date: &str) -> NoteResult<DailyNote> {
        let date = parse_date(date)?;
        let path = daily_file_path(&self.root, date);
        match fs::read(&path) {
            Ok(bytes) => Ok(DailyNote { date: format_date(date), content: decode_lossy(bytes) }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(NoteError::NotFound(path)),
            Err(e) => Err(NoteError::io("read note file", &path, e)),
        }
    }

    /// Every date that has a daily file, most recent first.
    ///
    /// Walks the whole tree except `Attachment` directories. Only files named
    /// exactly `YYYY-MM-DD.md` with a valid date count; anything else is
    /// ignored. Unreadable directories are logged and skipped.
    pub fn list_dates(&self) -> NoteResult<Vec<NaiveDate>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dates = BTreeSet::new();
        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry.file_name() == ATTACHMENT_DIR_NAME)
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable path while listing dates: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(date) = entry.file_name().to_str().and_then(daily_file_date) {
                dates.insert(date);
            }
        }

        Ok(dates.into_iter().rev().collect())
    }

    /// Create today's month directory and daily file if missing and return its path
    pub fn ensure_today_file(&self, now: NaiveDateTime) -> NoteResult<PathBuf> {
        self.ensure_file_for(now.date())
    }

    /// Create the daily file for a `YYYY-MM-DD` date if missing and return its path
    pub fn ensure_date_file(&self, date: &str) -> NoteResult<PathBuf> {
        self.ensure_file_for(parse_date(date)?)
    }

    fn ensure_file_for(&self, date: NaiveDate) -> NoteResult<PathBuf> {
        self.ensure_month_dir(date)?;
        let path = daily_file_path(&self.root, date);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| NoteError::io("create note file", &path, e))?;
        log::debug!("Ensured note file {}", path.display());
        Ok(path)
    }

    fn ensure_month_dir(&self, date: NaiveDate) -> NoteResult<PathBuf> {
        let dir = month_dir(&self.root, date);
        fs::create_dir_all(&dir).map_err(|e| NoteError::io("create directory", &dir, e))?;
        Ok(dir)
    }
}

/// Calendar days from `end` down to `start`, both inclusive
fn days_descending(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(end), |day| day.pred_opt()).take_while(move |day| *day >= start)
}
