//! Quick Capture - a date-sharded, append-only plain-text note log
//!
//! Notes are captured as single timestamped lines and appended to one file per
//! day under `root/YYYY/MM/YYYY-MM-DD.md`. This library provides:
//!
//! - The line codec for `- [HH:MM] <content>` entries
//! - A note store for appending, range reads and date listing
//! - A linear, case-insensitive full-text search over the note tree
//! - Attachment ingestion with collision-free names and URL-safe access paths
//! - A command registry for shells that dispatch named actions
//!
//! The filesystem is the only source of truth; nothing is cached between calls.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use quick_capture::NoteStore;
//!
//! let store = NoteStore::new("/Users/alice/QuickNotes");
//! let now = Local::now().naive_local();
//! store.append_note("buy milk", now)?;
//! for entry in store.read_range("2024-03-01", "2024-03-07")? {
//!     println!("{} {} {}", entry.date, entry.timestamp, entry.content);
//! }
//! # Ok::<(), quick_capture::NoteError>(())
//! ```

pub mod attachments;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod opener;
pub mod parsers;
pub mod search;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use attachments::AttachmentManager;
pub use commands::{CommandError, CommandInfo, CommandRegistry};
pub use config::AppConfig;
pub use error::{NoteError, NoteResult};
pub use models::{DailyNote, NoteEntry, SearchResult};
pub use parsers::{decode_line, encode_line};
pub use search::{MAX_SEARCH_RESULTS, search};
pub use store::NoteStore;
pub use utils::format_path_with_tilde;
