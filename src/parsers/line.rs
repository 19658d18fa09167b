//! Codec for a single note line: `- [HH:MM] <content>`.
//!
//! Decoding is a best-effort recognizer over free-form files. A line that does
//! not have the exact shape is "not an entry", never an error.

use std::sync::LazyLock;

use chrono::Timelike;
use regex::Regex;

/// `strftime` format of the time marker
pub const TIME_FORMAT: &str = "%H:%M";

/// Shape of an entry line. ASCII digits only; `\d` would admit other scripts.
pub const NOTE_LINE_PATTERN: &str = r"^- \[([0-9]{2}:[0-9]{2})\] (.*)$";

static NOTE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NOTE_LINE_PATTERN).expect("note line pattern is valid"));

/// Time marker and content recovered from an entry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedLine<'a> {
    pub time: &'a str,
    pub content: &'a str,
}

/// Format the `HH:MM` marker for a wall-clock time, dropping seconds
pub fn format_time_marker<T: Timelike>(time: &T) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Encode one entry as a newline-terminated line.
///
/// `content` must not contain a newline; no escaping is performed.
pub fn encode_line(time: &str, content: &str) -> String {
    let mut line = String::with_capacity(time.len() + content.len() + 6);
    line.push_str("- [");
    line.push_str(time);
    line.push_str("] ");
    line.push_str(content);
    line.push('\n');
    line
}

/// Decode a line, returning `None` when it is not an entry line
pub fn decode_line(line: &str) -> Option<DecodedLine<'_>> {
    let captures = NOTE_LINE_RE.captures(line)?;
    let time = captures.get(1)?.as_str();
    let content = captures.get(2)?.as_str();
    Some(DecodedLine { time, content })
}
