//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `fix`: Rewrite pending catch blocks into the enriched idiom
//! - `check`: Report migration state without writing
//! - `init`: Initialize catchfix configuration file

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

/// Common arguments shared by `fix` and `check`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Files or directories to process (overrides `files` and `includes` from the config file)
    pub paths: Vec<String>,

    /// Directory to start the config file search from (defaults to the working directory)
    #[arg(long, env = "CATCHFIX_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rewrite pending catch blocks to extract error data and error code
    Fix(FixCommand),
    /// Report which files still contain pending catch blocks
    Check(CheckCommand),
    /// Initialize a new .catchfixrc.json configuration file
    Init,
}
