// CLI layer - argument parsing, console interaction and the two commands.

#[path = "args.rs"]
pub mod args;

#[path = "console_approval.rs"]
pub mod console_approval;

#[path = "commands/command_catalog.rs"]
pub mod commands;

pub use args::Args;
