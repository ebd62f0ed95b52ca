//! Workspace configuration model and on-disk store
//!
//! A workspace's configuration is persisted as pretty-printed JSON under a
//! single config root, at a filename derived from the workspace directory's
//! absolute path (`space_<12-hex-char-hash>.json`). The file is the sole
//! source of truth: it is read fresh on every invocation and never cached or
//! locked. Concurrent external mutation is an accepted race.

use crate::errors::{ConfigError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Filename prefix for persisted workspace configurations
pub const CONFIG_PREFIX: &str = "space_";

/// Environment variable overriding the config root directory
pub const CONFIG_DIR_ENV: &str = "SPACEMAN_CONFIG_DIR";

/// Hex characters of the path digest kept in the filename. Sufficient to
/// avoid collisions for realistic workspace counts.
const HASH_LEN: usize = 12;

/// Root persisted record for one workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Absolute path of the workspace directory. Must equal the normalized
    /// path used to derive the config's storage hash.
    #[serde(rename = "dirPath")]
    pub root_path: PathBuf,
    /// Per-subdirectory settings, keyed by subdirectory name
    pub directories: IndexMap<String, DirectoryConfig>,
    /// Optional auxiliary compose dependency brought up before "run" commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency: Option<DependencyConfig>,
}

/// Per-subdirectory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Shell command line for the "run" mode; empty means no-op with a warning
    #[serde(rename = "command", default)]
    pub run_command: String,
    /// Shell command line for the "clean" mode, same empty semantics
    #[serde(rename = "cleanCommand", default)]
    pub clean_command: String,
    /// Classification metadata only; does not affect execution
    #[serde(rename = "type")]
    pub kind: DirectoryKind,
}

/// Closed classification set for configured directories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryKind {
    #[serde(rename = "fe")]
    Frontend,
    #[serde(rename = "be")]
    Backend,
}

impl DirectoryKind {
    /// Human-readable label for prompts and messages
    pub fn label(self) -> &'static str {
        match self {
            DirectoryKind::Frontend => "Frontend",
            DirectoryKind::Backend => "Backend",
        }
    }
}

/// Auxiliary compose dependency settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyConfig {
    pub active: bool,
    /// Location of the compose descriptor, relative to the workspace root
    #[serde(rename = "composePath")]
    pub compose_path: PathBuf,
}

/// Maps workspace directories to deterministic config file locations and
/// loads/saves the serialized configuration.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Create a store rooted at `SPACEMAN_CONFIG_DIR` if set, otherwise at
    /// `<user config dir>/spaceman`.
    pub fn new() -> Result<Self> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(Self {
                root: PathBuf::from(dir),
            });
        }
        let base = directories_next::BaseDirs::new().ok_or(ConfigError::NoConfigRoot)?;
        Ok(Self {
            root: base.config_dir().join("spaceman"),
        })
    }

    /// Create a store with an explicit root (primarily for tests)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The config root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Bootstrap the config root, creating it (recursively) if absent
    pub fn ensure_root(&self) -> Result<()> {
        if !self.root.exists() {
            warn!(
                "Did not find a config folder. Initializing: {}",
                self.root.display()
            );
            fs::create_dir_all(&self.root).map_err(|source| ConfigError::Write {
                path: self.root.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Compute the config file path for a workspace directory.
    ///
    /// The filename embeds a truncated SHA-256 digest of the normalized
    /// absolute directory path, so distinct workspaces map to distinct files
    /// and the same workspace always maps to the same file. Performs no
    /// file I/O.
    pub fn path_for(&self, dir: &Path) -> PathBuf {
        let normalized = normalize_workspace_path(dir);
        let mut hasher = Sha256::new();
        hasher.update(normalized.to_string_lossy().as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        self.root
            .join(format!("{}{}.json", CONFIG_PREFIX, &digest[..HASH_LEN]))
    }

    /// Whether a configuration exists for the given workspace directory
    pub fn exists_for(&self, dir: &Path) -> bool {
        self.path_for(dir).exists()
    }

    /// Load and validate a workspace configuration from `file`
    pub fn load(&self, file: &Path) -> Result<WorkspaceConfig> {
        let raw = match fs::read_to_string(file) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound {
                    path: file.display().to_string(),
                }
                .into());
            }
            Err(err) => return Err(ConfigError::Io(err).into()),
        };
        let config: WorkspaceConfig =
            serde_json::from_str(&raw).map_err(|err| ConfigError::Corrupt {
                path: file.display().to_string(),
                message: err.to_string(),
            })?;
        if !config.root_path.is_absolute() {
            return Err(ConfigError::Corrupt {
                path: file.display().to_string(),
                message: format!(
                    "dirPath must be absolute, got {}",
                    config.root_path.display()
                ),
            }
            .into());
        }
        debug!("Loaded workspace config from {}", file.display());
        Ok(config)
    }

    /// Persist a workspace configuration as pretty-printed JSON at `file`
    pub fn save(&self, file: &Path, config: &WorkspaceConfig) -> Result<()> {
        let payload = serde_json::to_string_pretty(config).map_err(|err| ConfigError::Corrupt {
            path: file.display().to_string(),
            message: err.to_string(),
        })?;
        fs::write(file, payload).map_err(|source| ConfigError::Write {
            path: file.display().to_string(),
            source,
        })?;
        debug!("Saved workspace config to {}", file.display());
        Ok(())
    }
}

/// Normalize a workspace directory path: make it absolute (joined to the
/// current directory if relative), strip trailing separators, and resolve
/// `.`/`..` segments lexically. Symlinks are not resolved.
pub fn normalize_workspace_path(dir: &Path) -> PathBuf {
    let absolute = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(dir)
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
