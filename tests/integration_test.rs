/// End-to-end integration tests for the note store
///
/// These tests verify complete workflows: append → read back → list → search
mod common;

use chrono::{TimeZone, Utc};
use common::{NotesDirBuilder, at, date, realistic_notes_dir};
use quick_capture::{AttachmentManager, NoteStore, search};

#[test]
fn test_e2e_append_then_read_range_reverse_chronological() {
    let dir = NotesDirBuilder::new().build();
    let store = NoteStore::new(dir.path());

    store.append_note("buy milk", at("2024-03-01", "09:15")).unwrap();
    store.append_note("call mom", at("2024-03-01", "09:20")).unwrap();

    let entries = store.read_range("2024-03-01", "2024-03-01").unwrap();
    let pairs: Vec<_> =
        entries.iter().map(|e| (e.timestamp.as_str(), e.content.as_str())).collect();

    assert_eq!(pairs, vec![("09:20", "call mom"), ("09:15", "buy milk")]);
}

#[test]
fn test_e2e_range_across_days_is_newest_first() {
    let dir = realistic_notes_dir();
    let store = NoteStore::new(dir.path());

    let entries = store.read_range("2024-02-28", "2024-03-01").unwrap();
    let flattened: Vec<_> =
        entries.iter().map(|e| format!("{} {}", e.date, e.timestamp)).collect();

    assert_eq!(
        flattened,
        vec![
            "2024-03-01 09:20",
            "2024-03-01 09:15",
            "2024-02-29 21:00",
            "2024-02-29 09:15",
            "2024-02-28 17:45",
            "2024-02-28 08:30",
        ]
    );
}

#[test]
fn test_e2e_read_recent_only_existing_day() {
    let dir = NotesDirBuilder::new().with_entries("2024-03-08", &[("10:00", "lonely")]).build();
    let store = NoteStore::new(dir.path());

    let notes = store.read_recent(3, date("2024-03-10")).unwrap();

    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].date, "2024-03-08");
    assert!(notes[0].content.contains("lonely"));
}

#[test]
fn test_e2e_read_daily_notes_keeps_free_text() {
    let dir = realistic_notes_dir();
    let store = NoteStore::new(dir.path());

    let notes = store.read_daily_notes("2024-02-29", "2024-03-01").unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].date, "2024-03-01");
    assert!(notes[1].content.starts_with("# Leap day"));
    assert!(notes[1].content.contains("free text about milk"));
}

#[test]
fn test_e2e_list_dates() {
    let dir = realistic_notes_dir();
    let store = NoteStore::new(dir.path());

    let dates = store.list_dates().unwrap();

    assert_eq!(dates, vec![date("2024-03-01"), date("2024-02-29"), date("2024-02-28")]);
}

#[test]
fn test_e2e_search_case_insensitive_with_line_numbers() {
    let dir = realistic_notes_dir();

    let results = search(dir.path(), "MILK");
    let summary: Vec<_> =
        results.iter().map(|r| (r.date.as_str(), r.time.as_str(), r.line_no)).collect();

    // Search does not skip attachment folders; the .md file inside is a note file too
    assert_eq!(
        summary,
        vec![
            ("2024-02-29", "09:15", 3),
            ("2024-02-29", "", 4),
            ("2024-03-01", "09:15", 1),
            ("2020-01-01", "00:00", 1),
        ]
    );
    assert_eq!(results[1].content, "free text about milk");
}

#[test]
fn test_e2e_search_sees_fresh_appends() {
    let dir = NotesDirBuilder::new().build();
    let store = NoteStore::new(dir.path());

    assert!(search(dir.path(), "dentist").is_empty());
    store.append_note("dentist at 3pm", at("2024-03-01", "08:00")).unwrap();

    let results = search(dir.path(), "Dentist");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].content, "dentist at 3pm");
    assert_eq!(results[0].file_path, common::daily_path(dir.path(), "2024-03-01"));
}

#[test]
fn test_e2e_attachment_scenario() {
    let dir = NotesDirBuilder::new().build();
    let manager = AttachmentManager::new(dir.path());
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();

    let access_path = manager.save(b"image", "my:notes?.png", &now).unwrap();

    assert_eq!(access_path, "/attachments/2023/11/Attachment/1700000000000_my_notes_.png");
    let physical = manager.resolve_access_path(&access_path).unwrap();
    assert_eq!(std::fs::read(physical).unwrap(), b"image");

    // Attachments never show up as dates
    let store = NoteStore::new(dir.path());
    assert!(store.list_dates().unwrap().is_empty());
}
