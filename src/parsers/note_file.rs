use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::models::NoteEntry;
use crate::parsers::line::decode_line;

/// Lines of a note file with invalid UTF-8 replaced by U+FFFD.
///
/// Splits on `\n` and strips one trailing `\r`. A stray byte from a manual
/// edit only affects its own line; only read failures are errors.
pub fn read_lines_lossy<R: BufRead>(reader: R) -> impl Iterator<Item = io::Result<String>> {
    reader.split(b'\n').map(|line| {
        let mut bytes = line?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Ok(decode_lossy(bytes))
    })
}

/// Decode a whole file's bytes, replacing invalid UTF-8 with U+FFFD
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

/// Parse the structured entries of one daily file, in line order.
///
/// Each line is trimmed before decoding. Lines that are not entries (headings,
/// manual edits, blank lines) are left out of the result; they are never an
/// error. `date` is stamped on every entry as-is.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read,
/// including `NotFound` so callers can treat a missing day as empty.
pub fn parse_note_file(path: &Path, date: &str) -> io::Result<Vec<NoteEntry>> {
    let file = File::open(path)?;
    let mut entries = Vec::new();

    for line in read_lines_lossy(BufReader::new(file)) {
        let line = line?;
        let line = line.trim();

        if let Some(decoded) = decode_line(line) {
            entries.push(NoteEntry {
                content: decoded.content.to_string(),
                timestamp: decoded.time.to_string(),
                date: date.to_string(),
                raw_line: line.to_string(),
            });
        }
    }

    Ok(entries)
}
