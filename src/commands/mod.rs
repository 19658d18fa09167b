//! Named-action dispatch for shells (CLI, tray, hotkey) that want to list and
//! invoke actions without hard-wiring call sites.

pub mod registry;

pub use registry::{CommandAction, CommandError, CommandInfo, CommandRegistry};
