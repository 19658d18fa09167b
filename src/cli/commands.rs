use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};

use super::builtins::{SharedLauncher, build_registry};
use crate::attachments::AttachmentManager;
use crate::config::AppConfig;
use crate::error::NoteError;
use crate::opener::SystemLauncher;
use crate::parsers::parse_note_file;
use crate::search::search;
use crate::store::NoteStore;
use crate::store::layout::{daily_file_path, format_date};
use crate::utils::{format_path_with_tilde, get_config_path};

#[derive(Parser)]
#[command(name = "quick-capture")]
#[command(version = "0.1.0")]
#[command(about = "Capture quick notes into a date-sharded plain-text log", long_about = None)]
pub struct Cli {
    /// Notes root directory (overrides the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Path to config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append a note to today's file
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show the full notes of the last few days
    Recent {
        /// Number of days, defaults to history_days from the config
        #[arg(long)]
        days: Option<u32>,
    },
    /// List entries between two dates, newest first
    Range {
        start: String,
        end: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the raw note of one date
    Day { date: String },
    /// List every date that has notes
    Dates,
    /// Case-insensitive search across all notes
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Store a file as an attachment and print its access path
    Attach {
        file: PathBuf,
        /// Name to store the file under instead of its own
        #[arg(long)]
        name: Option<String>,
    },
    /// Create today's note file if needed and print its path
    Today {
        /// Also open it in the editor
        #[arg(long)]
        open: bool,
    },
    /// Open the note of a date in the editor
    Open {
        date: String,
        /// Jump to this line when the editor supports it
        #[arg(long)]
        line: Option<usize>,
    },
    /// List the registered commands
    Commands,
    /// Execute a registered command by id
    Run {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show statistics about the notes
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    let config = load_config(&config_path, cli.root.is_some())?;
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => config.resolved_root()?,
    };

    let store = NoteStore::new(&root);
    let launcher: SharedLauncher = Arc::new(SystemLauncher);
    // "now" is resolved once per invocation
    let now = Local::now().naive_local();

    match command {
        Commands::Add { text } => add_note(&store, &text.join(" "), now)?,
        Commands::Recent { days } => {
            show_recent(&store, days.unwrap_or(config.history_days), now)?
        }
        Commands::Range { start, end, json } => show_range(&store, start, end, *json)?,
        Commands::Day { date } => show_day(&store, date)?,
        Commands::Dates => {
            for date in store.list_dates()? {
                println!("{}", format_date(date));
            }
        }
        Commands::Search { query, json } => show_search(&root, query, *json)?,
        Commands::Attach { file, name } => {
            attach_file(&AttachmentManager::new(&root), file, name.as_deref())?
        }
        Commands::Today { open } => {
            let path = store.ensure_today_file(now)?;
            println!("{}", path.display());
            if *open {
                launcher.open(&path)?;
            }
        }
        Commands::Open { date, line } => {
            let path = store.ensure_date_file(date)?;
            match line {
                Some(line) => launcher.open_at(&path, *line)?,
                None => launcher.open(&path)?,
            }
            println!("{}", path.display());
        }
        Commands::Commands => {
            let registry = build_registry(store, launcher, config_path);
            for info in registry.list() {
                println!("{:<16} {} - {}", info.id, info.title, info.description);
                if let Some(usage) = &info.usage {
                    println!("{:<16} usage: {}", "", usage);
                }
            }
        }
        Commands::Run { id, args } => {
            let registry = build_registry(store, launcher, config_path);
            registry.execute(id, args)?;
        }
        Commands::Stats => show_stats(&store)?,
    }

    Ok(())
}

/// With an explicit `--root` a missing config file is not created
fn load_config(path: &Path, root_overridden: bool) -> Result<AppConfig> {
    if root_overridden && !path.exists() {
        return Ok(AppConfig::default());
    }
    AppConfig::load_or_create(path)
}

fn add_note(store: &NoteStore, content: &str, now: NaiveDateTime) -> Result<()> {
    let content = content.trim();
    if content.is_empty() {
        println!("Nothing to save");
        return Ok(());
    }
    store.append_note(content, now)?;
    println!("Saved note for {}", format_date(now.date()));
    Ok(())
}

fn show_recent(store: &NoteStore, days: u32, now: NaiveDateTime) -> Result<()> {
    let notes = store.read_recent(days, now.date())?;
    if notes.is_empty() {
        println!("No notes in the last {} days", days);
        return Ok(());
    }
    for note in notes {
        println!("## {}", note.date);
        println!("{}", note.content.trim_end());
        println!();
    }
    Ok(())
}

fn show_range(store: &NoteStore, start: &str, end: &str, json: bool) -> Result<()> {
    let entries = store.read_range(start, end)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries).context("Failed to serialize entries")?);
        return Ok(());
    }
    for entry in entries {
        println!("{} {} {}", entry.date, entry.timestamp, entry.content);
    }
    Ok(())
}

fn show_day(store: &NoteStore, date: &str) -> Result<()> {
    match store.read_daily(date) {
        Ok(note) => print!("{}", note.content),
        Err(NoteError::NotFound(_)) => println!("No notes for {}", date),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn show_search(root: &Path, query: &str, json: bool) -> Result<()> {
    let results = search(root, query);
    if json {
        println!("{}", serde_json::to_string_pretty(&results).context("Failed to serialize results")?);
        return Ok(());
    }
    if results.is_empty() {
        println!("No matches for \"{}\"", query);
        return Ok(());
    }
    for result in &results {
        println!("{}", super::format_search_result(result));
    }
    Ok(())
}

fn attach_file(manager: &AttachmentManager, file: &Path, name: Option<&str>) -> Result<()> {
    let content =
        fs::read(file).with_context(|| format!("Failed to read attachment: {}", file.display()))?;
    let name = match name {
        Some(name) => name.to_string(),
        None => file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Attachment has no file name: {}", file.display()))?,
    };
    let access_path = manager.save(&content, &name, &Local::now())?;
    println!("{}", access_path);
    Ok(())
}

fn show_stats(store: &NoteStore) -> Result<()> {
    let dates = store.list_dates()?;

    let mut total_entries = 0;
    for date in &dates {
        let path = daily_file_path(store.root(), *date);
        match parse_note_file(&path, &format_date(*date)) {
            Ok(entries) => total_entries += entries.len(),
            Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
        }
    }

    println!("Quick Capture Statistics");
    println!("========================");
    println!("Days with notes: {}", dates.len());
    println!("Total entries: {}", total_entries);
    println!();
    println!("Notes directory: {}", format_path_with_tilde(store.root()));

    if let Some(oldest) = dates.last() {
        println!("Oldest day: {}", format_date(*oldest));
    }
    if let Some(newest) = dates.first() {
        println!("Newest day: {}", format_date(*newest));
    }

    Ok(())
}
