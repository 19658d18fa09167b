use serde::{Deserialize, Serialize};

/// One timestamped line recovered from a daily file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub content: String,
    /// Display time, `HH:MM`
    pub timestamp: String,
    /// Date of the file the entry was read from, `YYYY-MM-DD`
    pub date: String,
    #[serde(skip)]
    pub raw_line: String,
}

/// The whole content of one day's file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    pub date: String,
    pub content: String,
}
