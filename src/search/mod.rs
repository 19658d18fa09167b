//! Linear full-text search over the note tree.
//!
//! There is no index: every query walks the tree from the root and reads each
//! note file line by line. Results are produced fresh per call.
//!
//! # Error Handling Strategy
//!
//! A single unreadable file or directory must not abort the whole search.
//! Walk errors and open failures are logged as warnings and the affected file
//! is skipped. Invalid UTF-8 is replaced per line, so the rest of the file is
//! still searched. A missing root yields no results.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use walkdir::WalkDir;

use crate::models::SearchResult;
use crate::parsers::{decode_line, read_lines_lossy};
use crate::store::layout::NOTE_EXTENSION;

/// Scanning stops across the whole tree once this many results are collected
pub const MAX_SEARCH_RESULTS: usize = 100;

/// Case-insensitive substring search over every note file under `root`.
///
/// Files are visited in lexical order. Line numbers are 1-based. Matching lines
/// that are entry lines have their `- [HH:MM] ` marker split into `time`;
/// other lines are returned whole with an empty `time`. An empty query
/// matches every line.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use quick_capture::search::search;
///
/// for hit in search(Path::new("/home/alice/QuickNotes"), "milk") {
///     println!("{} {} {}:{}", hit.date, hit.content, hit.file_path.display(), hit.line_no);
/// }
/// ```
pub fn search(root: &Path, query: &str) -> Vec<SearchResult> {
    let query = query.to_lowercase();
    let mut results = Vec::new();

    if !root.exists() {
        return results;
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable path during search: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_note_file(entry.path()) {
            continue;
        }

        if search_file(entry.path(), &query, &mut results) {
            break;
        }
    }

    results
}

fn is_note_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTE_EXTENSION)
}

/// Scan one file, pushing hits into `results`. Returns true once the cap is reached.
fn search_file(path: &Path, query: &str, results: &mut Vec<SearchResult>) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::warn!("Skipping unreadable note file {}: {}", path.display(), e);
            return false;
        }
    };

    let date = path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();

    for (index, line) in read_lines_lossy(BufReader::new(file)).enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Stopped reading {} at line {}: {}", path.display(), index + 1, e);
                break;
            }
        };

        if !line.to_lowercase().contains(query) {
            continue;
        }

        let (time, content) = match decode_line(&line) {
            Some(decoded) => (decoded.time.to_string(), decoded.content.to_string()),
            None => (String::new(), line.clone()),
        };

        results.push(SearchResult {
            content,
            date: date.clone(),
            time,
            file_path: path.to_path_buf(),
            line_no: index + 1,
        });

        if results.len() >= MAX_SEARCH_RESULTS {
            return true;
        }
    }

    false
}
