//! Command-line shell over the note store.
//!
//! Stands in for the desktop shell: each subcommand maps onto one store,
//! search or attachment operation, and `commands`/`run` go through the
//! [`CommandRegistry`](crate::commands::CommandRegistry).

pub mod builtins;
pub mod commands;

pub use commands::{Cli, Commands, run};

use crate::models::SearchResult;

/// One line per hit: `date [time] content  (path:line)`
pub(crate) fn format_search_result(result: &SearchResult) -> String {
    let mut line = result.date.clone();
    if !result.time.is_empty() {
        line.push(' ');
        line.push_str(&result.time);
    }
    line.push(' ');
    line.push_str(&result.content);
    format!("{}  ({}:{})", line, result.file_path.display(), result.line_no)
}
