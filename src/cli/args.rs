//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Describe exported declarations as JSON
//! - `list`: List exported declarations and their kinds
//! - `init`: Initialize the apiref configuration file

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

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::List(cmd)) => cmd.common.verbose,
            Some(Command::Init(cmd)) => cmd.common.verbose,
            None => false,
        }
    }
}

/// Common arguments shared by commands that read a module.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Module root directory holding the build configuration
    #[arg(long, env = "APIREF_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    /// Exported names to describe, in output order
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub names: Vec<String>,

    /// Describe every exported declaration
    #[arg(long)]
    pub all: bool,

    /// Glob patterns selecting names for --all (overrides config file)
    /// Can be specified multiple times: --include 'Button*' --include 'use*'
    #[arg(long, requires = "all")]
    pub include: Vec<String>,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct InitCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Describe exported declarations (interfaces, type aliases, enums, classes, functions) as JSON
    Extract(ExtractCommand),
    /// List exported declarations and their kinds
    List(ListCommand),
    /// Initialize a new .apirefrc.json configuration file in the module root
    Init(InitCommand),
}
