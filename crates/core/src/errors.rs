//! Error types and handling
//!
//! The error taxonomy is structured with specific error enums for each domain
//! (configuration, workspace resolution, command execution, mode dispatch)
//! that are then wrapped in the main SpacemanError enum for unified handling
//! at the CLI boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration store errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found at the computed path
    #[error("Configuration file not found: {path}")]
    NotFound { path: String },

    /// Configuration file present but malformed or failing validation
    #[error("Corrupt configuration file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Configuration file write error (disk full, permission denied)
    #[error("Failed to write configuration file {path}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// No per-user configuration root could be determined
    #[error("Could not determine the user configuration directory; set SPACEMAN_CONFIG_DIR")]
    NoConfigRoot,

    /// Configuration file I/O error
    #[error("Failed to read configuration file")]
    Io(#[from] std::io::Error),
}

/// Workspace resolution errors
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// No configuration exists for the parent directory of the target
    #[error("Could not find config file for the workspace {}. Define a workspace by using \"spaceman init\"", workspace.display())]
    NotFound { workspace: PathBuf },
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    /// Child process exited with a non-zero status
    #[error("{label} command failed with exit code {code}")]
    Failed { label: String, code: i32 },

    /// Child process was killed before it could report an exit code
    #[error("{label} command terminated without an exit code")]
    Terminated { label: String },

    /// Child process could not be spawned (binary not found, permission denied)
    #[error("Error executing {label} command: {source}")]
    Spawn {
        label: String,
        #[source]
        source: std::io::Error,
    },

    /// Host received a termination signal while the child was running
    #[error("{label} command interrupted by {signal}")]
    Interrupted { label: String, signal: &'static str },
}

/// Mode dispatch errors
#[derive(Error, Debug)]
pub enum ModeError {
    /// A mode outside the executable set reached the dispatcher
    #[error("Unexpected mode: {mode}")]
    Unexpected { mode: String },
}

/// Main error enum wrapping all domain-specific errors
#[derive(Error, Debug)]
pub enum SpacemanError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Workspace resolution errors
    #[error("{0}")]
    Workspace(#[from] WorkspaceError),

    /// Command execution errors
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Mode dispatch errors
    #[error("{0}")]
    Mode(#[from] ModeError),
}

/// Convenience type alias for Results with SpacemanError
pub type Result<T> = std::result::Result<T, SpacemanError>;
