//! Actions registered at startup for the command palette and `run`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;

use crate::commands::{CommandInfo, CommandRegistry};
use crate::opener::EditorLauncher;
use crate::search::search;
use crate::store::NoteStore;

pub const OPEN_TODAY: &str = "cmd:open-today";
pub const OPEN_DATE: &str = "cmd:open-date";
pub const FIND: &str = "cmd:find";
pub const SETTINGS: &str = "cmd:settings";
pub const HELP: &str = "cmd:help";

pub type SharedLauncher = Arc<dyn EditorLauncher + Send + Sync>;

/// Build the registry with every built-in command
pub fn build_registry(
    store: NoteStore,
    launcher: SharedLauncher,
    config_path: PathBuf,
) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    {
        let store = store.clone();
        let launcher = Arc::clone(&launcher);
        registry.register(
            CommandInfo::new(OPEN_TODAY, "Open Today", "Open today's note in the editor"),
            move |_args| {
                let path = store.ensure_today_file(Local::now().naive_local())?;
                launcher.open(&path)
            },
        );
    }

    {
        let store = store.clone();
        let launcher = Arc::clone(&launcher);
        registry.register(
            CommandInfo::new(OPEN_DATE, "Open Date...", "Open the note of a specific date")
                .with_usage("open-date <YYYY-MM-DD>"),
            move |args| {
                let date = args.first().context("Missing date argument (YYYY-MM-DD)")?;
                let path = store.ensure_date_file(date)?;
                launcher.open(&path)
            },
        );
    }

    {
        let root = store.root().to_path_buf();
        registry.register(
            CommandInfo::new(FIND, "Find / Search", "Search notes by keyword")
                .with_usage("find <keyword>"),
            move |args| {
                let query = args.join(" ");
                for result in search(&root, &query) {
                    println!("{}", super::format_search_result(&result));
                }
                Ok(())
            },
        );
    }

    {
        let launcher = Arc::clone(&launcher);
        registry.register(
            CommandInfo::new(SETTINGS, "Settings", "Open the configuration file"),
            move |_args| launcher.open(&config_path),
        );
    }

    registry.register(
        CommandInfo::new(HELP, "Help", "Show how to use quick-capture"),
        |_args| {
            println!("Capture a note:      quick-capture add <text>");
            println!("Browse recent days:  quick-capture recent");
            println!("Search everything:   quick-capture search <query>");
            println!("List commands:       quick-capture commands");
            Ok(())
        },
    );

    registry
}
