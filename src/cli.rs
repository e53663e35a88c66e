//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `vault-sync`.
#[derive(Debug, Parser)]
#[command(name = "vault-sync", version, about = "Run your vault's sync command")]
pub struct Cli {
    /// Settings file (defaults to `$VAULT_SYNC_SETTINGS`, then `.vault-sync/data.json`).
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the configured sync command.
    Sync,
    /// Show or edit the sync settings.
    Config {
        /// What to do with the settings.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Settings edits, one field at a time.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print every setting with its description.
    Show,
    /// Set the command line to run.
    SetCommand {
        /// Shell command line, e.g. "git pull && git push".
        value: String,
    },
    /// Set the directory the command runs in.
    SetWorkingDir {
        /// Directory path; empty means the current directory.
        value: String,
    },
}
