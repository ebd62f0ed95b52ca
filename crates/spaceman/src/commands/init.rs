//! Interactive workspace setup wizard
//!
//! `init` creates a workspace configuration from scratch; `edit` re-runs the
//! same wizard over an existing one, prefilled with the current values.
//! Cancelling a prompt (Ctrl-C or closing stdin) exits gracefully with
//! status 0.

use anyhow::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use spaceman_core::config::{
    normalize_workspace_path, ConfigStore, DependencyConfig, DirectoryConfig, DirectoryKind,
    WorkspaceConfig,
};
use spaceman_core::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Which flavor of the wizard is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wizard {
    Init,
    Edit,
}

pub fn execute(dir: Option<PathBuf>, wizard: Wizard) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let root = normalize_workspace_path(&dir);
    let store = ConfigStore::new()?;
    store.ensure_root()?;

    if !root.is_dir() {
        eprintln!(
            "{}",
            style(format!("ERROR: Directory not found: {}", root.display())).red()
        );
        std::process::exit(1);
    }

    let config_file = store.path_for(&root);

    let existing = match wizard {
        Wizard::Init => {
            if config_file.exists() {
                println!(
                    "{}",
                    style(format!("Workspace already exists at {}", root.display())).yellow()
                );
                println!(
                    "{}",
                    style("Use: \"spaceman edit\" to modify the configuration instead.").blue()
                );
                std::process::exit(1);
            }
            None
        }
        Wizard::Edit => {
            if !config_file.exists() {
                println!(
                    "{}",
                    style(format!("No workspace configured at {}", root.display())).yellow()
                );
                println!("{}", style("Use: \"spaceman init\" to create one.").blue());
                std::process::exit(1);
            }
            Some(store.load(&config_file)?)
        }
    };

    println!(
        "{}",
        style(format!("Initializing workspace at {}", root.display())).blue()
    );
    println!("Config file: {}", config_file.display());

    let subdirs = subdirectories(&root)?;
    if subdirs.is_empty() {
        anyhow::bail!("No subdirectories found in {}", root.display());
    }

    let theme = ColorfulTheme::default();
    let defaults: Vec<bool> = subdirs
        .iter()
        .map(|name| {
            existing
                .as_ref()
                .is_some_and(|config| config.directories.contains_key(name))
        })
        .collect();
    let selected = prompt(
        MultiSelect::with_theme(&theme)
            .with_prompt("Select directories to initialize")
            .items(&subdirs)
            .defaults(&defaults)
            .interact(),
    );

    let mut directories = IndexMap::new();
    for index in selected {
        let name = &subdirs[index];
        let previous = existing
            .as_ref()
            .and_then(|config| config.directories.get(name));

        let kind_default = match previous.map(|dir| dir.kind) {
            Some(DirectoryKind::Backend) => 1,
            _ => 0,
        };
        let kind_index = prompt(
            Select::with_theme(&theme)
                .with_prompt(format!("Select the type of directory \"{name}\""))
                .items(&[
                    DirectoryKind::Frontend.label(),
                    DirectoryKind::Backend.label(),
                ])
                .default(kind_default)
                .interact(),
        );
        let kind = if kind_index == 1 {
            DirectoryKind::Backend
        } else {
            DirectoryKind::Frontend
        };

        let run_command = prompt(
            Input::<String>::with_theme(&theme)
                .with_prompt(format!("Command to run for \"{name}\""))
                .allow_empty(true)
                .with_initial_text(previous.map(|dir| dir.run_command.clone()).unwrap_or_default())
                .interact_text(),
        );
        let clean_command = prompt(
            Input::<String>::with_theme(&theme)
                .with_prompt(format!("Clean install command for \"{name}\""))
                .allow_empty(true)
                .with_initial_text(
                    previous
                        .map(|dir| dir.clean_command.clone())
                        .unwrap_or_default(),
                )
                .interact_text(),
        );

        directories.insert(
            name.clone(),
            DirectoryConfig {
                run_command,
                clean_command,
                kind,
            },
        );
    }

    let previous_dependency = existing.as_ref().and_then(|config| config.dependency.clone());
    let wants_dependency = prompt(
        Confirm::with_theme(&theme)
            .with_prompt("Bring up a compose dependency before run commands?")
            .default(
                previous_dependency
                    .as_ref()
                    .map(|dep| dep.active)
                    .unwrap_or(false),
            )
            .interact(),
    );
    let dependency = if wants_dependency {
        let compose_path = prompt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Compose directory, relative to the workspace root")
                .with_initial_text(
                    previous_dependency
                        .as_ref()
                        .map(|dep| dep.compose_path.display().to_string())
                        .unwrap_or_default(),
                )
                .interact_text(),
        );
        Some(DependencyConfig {
            active: true,
            compose_path: PathBuf::from(compose_path),
        })
    } else {
        None
    };

    let config = WorkspaceConfig {
        root_path: root.clone(),
        directories,
        dependency,
    };
    store.save(&config_file, &config)?;
    println!(
        "{}",
        style(format!("Initialized workspace at: {}", root.display())).green()
    );
    Ok(())
}

/// Immediate subdirectories of the workspace root, sorted by name
fn subdirectories(root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Unwrap a prompt result, exiting gracefully on cancellation
fn prompt<T>(result: dialoguer::Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(_) => {
            println!("Exiting gracefully.");
            std::process::exit(0);
        }
    }
}
