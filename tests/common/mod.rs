//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

/// Builder for creating test notes directory trees
pub struct NotesDirBuilder {
    temp_dir: TempDir,
}

impl NotesDirBuilder {
    /// Create a new builder with an empty notes root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the notes root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a daily file at `YYYY/MM/YYYY-MM-DD.md` with raw content
    pub fn with_day(self, date: &str, content: &str) -> Self {
        let path = daily_path(self.temp_dir.path(), date);
        fs::create_dir_all(path.parent().expect("daily file has a parent"))
            .expect("Failed to create month dir");
        fs::write(&path, content).expect("Failed to write daily file");
        self
    }

    /// Write a daily file built from `(HH:MM, content)` entries
    pub fn with_entries(self, date: &str, entries: &[(&str, &str)]) -> Self {
        let content: String =
            entries.iter().map(|(time, text)| format!("- [{}] {}\n", time, text)).collect();
        self.with_day(date, &content)
    }

    /// Write an arbitrary file relative to the root
    pub fn with_file(self, relative: &str, content: &[u8]) -> Self {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for NotesDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `root/YYYY/MM/YYYY-MM-DD.md` for a date string
pub fn daily_path(root: &Path, date: &str) -> PathBuf {
    root.join(&date[0..4]).join(&date[5..7]).join(format!("{}.md", date))
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{} {}", date, time), "%Y-%m-%d %H:%M")
        .expect("valid test datetime")
}

/// A realistic notes tree: a month of mixed content plus attachments
pub fn realistic_notes_dir() -> TempDir {
    NotesDirBuilder::new()
        .with_entries("2024-02-28", &[("08:30", "standup notes"), ("17:45", "ship release")])
        .with_day(
            "2024-02-29",
            "# Leap day\n\n- [09:15] buy milk\nfree text about milk\n- [21:00] read a book\n",
        )
        .with_entries("2024-03-01", &[("09:15", "buy milk"), ("09:20", "call mom")])
        .with_file("2024/03/Attachment/1709280000000_photo.png", b"\x89PNG")
        .with_file("2024/03/Attachment/2020-01-01.md", b"- [00:00] hidden milk")
        .with_file("README.md", b"notes root readme")
        .build()
}
