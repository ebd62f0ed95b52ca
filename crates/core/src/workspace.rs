//! Workspace resolution
//!
//! A subdirectory belongs to the workspace that is its direct parent. The
//! resolver walks exactly one level up and asks the config store for the
//! parent's config file; it never recurses further up the filesystem tree.

use crate::config::{normalize_workspace_path, ConfigStore};
use crate::errors::{Result, WorkspaceError};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Resolve the config file for the workspace owning `target_dir`.
///
/// Returns the computed path if a configuration exists for the parent
/// directory, otherwise `WorkspaceError::NotFound` naming the workspace
/// directory.
#[instrument(skip_all, fields(target = %target_dir.display()))]
pub fn resolve_config_file(store: &ConfigStore, target_dir: &Path) -> Result<PathBuf> {
    let target = normalize_workspace_path(target_dir);
    let workspace = match target.parent() {
        Some(parent) => parent.to_path_buf(),
        None => target.clone(),
    };
    let config_file = store.path_for(&workspace);
    if config_file.exists() {
        debug!("Resolved workspace config at {}", config_file.display());
        Ok(config_file)
    } else {
        Err(WorkspaceError::NotFound { workspace }.into())
    }
}
