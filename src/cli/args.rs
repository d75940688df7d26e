//! CLI argument definitions using clap.
//!
//! This module defines the command-line interface structure for all
//! keylift commands. It uses clap's derive API for declarative argument
//! parsing.
//!
//! ## Commands
//!
//! - `extract`: Scan source files and print the aggregated key map
//! - `init`: Initialize a keylift configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Glob patterns selecting the files to scan (overrides config file)
    pub patterns: Vec<String>,

    /// Path to a custom extractor module (overrides config file)
    #[arg(long)]
    pub extractor: Option<PathBuf>,

    /// Namespace for keys without an explicit one (overrides config file)
    #[arg(long)]
    pub default_namespace: Option<String>,

    /// Maximum number of files extracted concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract localization keys and print the namespace-partitioned map as JSON
    Extract(ExtractCommand),
    /// Initialize a new .keyliftrc.json configuration file
    Init,
}
