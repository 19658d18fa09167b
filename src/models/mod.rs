//! Data models for the note store.
//!
//! - [`NoteEntry`] - A structured entry parsed out of a daily file
//! - [`DailyNote`] - The raw content of one day's file
//! - [`SearchResult`] - A line-level search hit
//!
//! All of these are transient query results. The filesystem is the only
//! durable state; nothing here is cached between calls.

pub mod note;
pub mod search;

pub use note::{DailyNote, NoteEntry};
pub use search::SearchResult;
