use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A single line that matched a search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Line content with any `- [HH:MM] ` marker stripped
    pub content: String,
    /// File stem of the containing file, not validated
    pub date: String,
    /// `HH:MM`, or empty when the line carried no marker
    pub time: String,
    pub file_path: PathBuf,
    /// 1-based
    pub line_no: usize,
}
