//! Hands note files to a user-facing editor.
//!
//! Processes are spawned detached with null stdio. A background thread waits
//! on each one so no zombie is left behind; nothing else about their lifecycle
//! is managed.

use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result, bail};

/// Opens files for the user (allows mocking in tests)
pub trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;

    /// Open at a 1-based line; launchers without line support just open the file
    fn open_at(&self, path: &Path, line: usize) -> Result<()>;
}

/// Platform opener, preferring VS Code when it is on `PATH` for line jumps
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl EditorLauncher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        let mut command = platform_open_command(path)?;
        spawn_detached(&mut command)
            .with_context(|| format!("Failed to open {}", path.display()))
    }

    fn open_at(&self, path: &Path, line: usize) -> Result<()> {
        match which::which("code") {
            Ok(code) => {
                let mut command = goto_line_command(&code, path, line);
                spawn_detached(&mut command)
                    .with_context(|| format!("Failed to open {} in VS Code", path.display()))
            }
            Err(_) => self.open(path),
        }
    }
}

fn platform_open_command(path: &Path) -> Result<Command> {
    let command = if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/c", "start", ""]).arg(path);
        command
    } else if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(path);
        command
    } else if cfg!(target_os = "linux") {
        let mut command = Command::new("xdg-open");
        command.arg(path);
        command
    } else {
        bail!("Opening files is not supported on this platform");
    };
    Ok(command)
}

/// `code -g path:line`
fn goto_line_command(code: &Path, path: &Path, line: usize) -> Command {
    let mut command = Command::new(code);
    command.arg("-g").arg(format!("{}:{}", path.display(), line));
    command
}

fn spawn_detached(command: &mut Command) -> Result<()> {
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    let mut child = command.spawn().context("Failed to spawn process")?;
    let pid = child.id();
    log::debug!("Spawned editor process {}", pid);

    thread::spawn(move || match child.wait() {
        Ok(status) => log::debug!("Editor process {} exited with {}", pid, status),
        Err(e) => log::warn!("Failed to wait for editor process {}: {}", pid, e),
    });
    Ok(())
}
