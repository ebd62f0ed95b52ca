//! CLI surface and dispatch

use crate::commands;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spaceman_core::logging;
use std::path::PathBuf;

/// Log format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Log level options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Informational messages and above
    Info,
    /// Debug messages and above
    Debug,
    /// All messages including trace
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Manage run/clean commands for the directories of a workspace
#[derive(Debug, Parser)]
#[command(name = "spaceman", version, about)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Default log level when no filter env vars are set
    #[arg(long, value_enum, global = true, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// spaceman subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactively configure a new workspace
    Init {
        /// Workspace directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },
    /// Reconfigure an existing workspace
    Edit {
        /// Workspace directory (defaults to the current directory)
        dir: Option<PathBuf>,
    },
    /// Execute each scheduled mode's command, starting from "run"
    Run {
        /// Additional mode tokens to combine with "run" (e.g. "clean")
        #[arg(value_name = "MODE")]
        modes: Vec<String>,

        /// Directory names excluded from execution
        #[arg(long, num_args = 1.., value_name = "NAME")]
        skip: Vec<String>,

        /// Target directory (defaults to the current directory)
        #[arg(short = 'd', long = "dir", value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Execute each scheduled mode's command, starting from "clean"
    Clean {
        /// Additional mode tokens to combine with "clean" (e.g. "run")
        #[arg(value_name = "MODE")]
        modes: Vec<String>,

        /// Directory names excluded from execution
        #[arg(long, num_args = 1.., value_name = "NAME")]
        skip: Vec<String>,

        /// Target directory (defaults to the current directory)
        #[arg(short = 'd', long = "dir", value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn dispatch(self) -> Result<()> {
        logging::init(
            self.log_format.map(LogFormat::as_str),
            Some(self.log_level.as_str()),
        )?;
        spaceman_core::signals::install()?;

        match self.command {
            Commands::Init { dir } => commands::init::execute(dir, commands::init::Wizard::Init),
            Commands::Edit { dir } => commands::init::execute(dir, commands::init::Wizard::Edit),
            Commands::Run { modes, skip, dir } => {
                commands::exec::execute("run", modes, skip, dir).await
            }
            Commands::Clean { modes, skip, dir } => {
                commands::exec::execute("clean", modes, skip, dir).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_accepts_extra_modes_and_flags() {
        let cli = Cli::parse_from(["spaceman", "run", "clean", "--skip", "app", "-d", "/ws/app"]);
        match cli.command {
            Commands::Run { modes, skip, dir } => {
                assert_eq!(modes, vec!["clean".to_string()]);
                assert_eq!(skip, vec!["app".to_string()]);
                assert_eq!(dir, Some(PathBuf::from("/ws/app")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_skip_requires_a_name() {
        assert!(Cli::try_parse_from(["spaceman", "run", "--skip"]).is_err());
    }
}
