//! Parsers for the on-disk note format
//!
//! # Error Handling Strategy
//!
//! Daily files are free text that happens to contain structured lines. Parsing
//! is "decode, discard non-matches": a line that is not an entry is excluded
//! from parsed results while the rest of the file, and its raw content, stay
//! intact. Only I/O failures are errors.

pub mod line;
pub mod note_file;

pub use line::{DecodedLine, decode_line, encode_line, format_time_marker};
pub use note_file::{decode_lossy, parse_note_file, read_lines_lossy};
