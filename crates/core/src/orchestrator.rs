//! Workspace orchestration
//!
//! Top-level coordinator for one invocation: per scheduled mode it resolves
//! the workspace configuration, checks the target against the skip set,
//! invokes the dependency gate for "run", and hands the configured command to
//! the runner. Modes execute strictly sequentially; each one fully completes
//! (success or definitive failure) before the next starts.

use crate::config::{normalize_workspace_path, ConfigStore};
use crate::errors::{CommandError, ModeError, Result, SpacemanError};
use crate::gate::{self, GateOutcome};
use crate::modes::{Mode, USAGE};
use crate::runner;
use crate::signals;
use crate::workspace;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Execute a single mode against `target_dir`.
///
/// The workspace configuration is re-read from disk on every call; nothing is
/// cached across modes. A directory absent from the configuration's
/// `directories` map is not configured: the call warns and completes
/// successfully without running anything, distinct from the empty-command
/// no-op inside the runner.
#[instrument(skip_all, fields(target = %target_dir.display(), mode = %mode))]
pub async fn run_one(store: &ConfigStore, target_dir: &Path, mode: Mode) -> Result<()> {
    let target = normalize_workspace_path(target_dir);
    let config_file = workspace::resolve_config_file(store, &target)?;
    let config = store.load(&config_file)?;

    let name = directory_name(&target);
    let Some(dir_config) = config.directories.get(&name) else {
        warn!(
            "Directory {} is not configured in workspace {}; nothing to do",
            name,
            config.root_path.display()
        );
        return Ok(());
    };

    match mode {
        Mode::Run => {
            match gate::ensure(&config).await {
                GateOutcome::Skipped => {}
                GateOutcome::Started => info!("Compose dependency is up"),
                GateOutcome::Failed(err) => {
                    // Best-effort gate, but an interrupt must still abort
                    if matches!(err, SpacemanError::Command(CommandError::Interrupted { .. })) {
                        return Err(err);
                    }
                    warn!("Compose dependency failed to start: {}; continuing", err);
                }
            }
            runner::run(&dir_config.run_command, Mode::Run.as_str(), &target).await
        }
        Mode::Clean => runner::run(&dir_config.clean_command, Mode::Clean.as_str(), &target).await,
        Mode::Skip => {
            // skip is a scheduling pseudo-mode; it should never be dispatched
            let err = ModeError::Unexpected {
                mode: mode.as_str().to_string(),
            };
            warn!("{}", err);
            info!("{}", USAGE);
            Ok(())
        }
    }
}

/// Execute one mode unless the target directory is in the skip set.
///
/// A skipped directory completes successfully without resolving any
/// configuration, so skipping works even where no workspace exists.
pub async fn run_with_skip(
    store: &ConfigStore,
    target_dir: &Path,
    skip_set: &HashSet<String>,
    mode: Mode,
) -> Result<()> {
    let target = normalize_workspace_path(target_dir);
    if skip_set.contains(&directory_name(&target)) {
        warn!("Skipping directory {} as specified.", target.display());
        return Ok(());
    }
    run_one(store, &target, mode).await
}

/// Execute the scheduled modes strictly in order.
///
/// Each mode fully completes before the next starts; a fatal failure aborts
/// the remainder. A termination signal observed between modes aborts the
/// sequence without starting the next one.
pub async fn run_sequenced(
    store: &ConfigStore,
    target_dir: &Path,
    skip_set: &HashSet<String>,
    modes: &[Mode],
) -> Result<()> {
    for mode in modes {
        if let Some(sig) = signals::received() {
            warn!("{} received; aborting remaining modes", sig.as_str());
            return Err(CommandError::Interrupted {
                label: mode.as_str().to_string(),
                signal: sig.as_str(),
            }
            .into());
        }
        info!("Executing mode: {}", mode);
        run_with_skip(store, target_dir, skip_set, *mode).await?;
    }
    Ok(())
}

fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DependencyConfig, DirectoryConfig, DirectoryKind, WorkspaceConfig};
    use crate::errors::WorkspaceError;
    use indexmap::IndexMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _config_root: TempDir,
        store: ConfigStore,
        workspace: TempDir,
    }

    fn fixture(directories: IndexMap<String, DirectoryConfig>) -> Fixture {
        fixture_with_dependency(directories, None)
    }

    fn fixture_with_dependency(
        directories: IndexMap<String, DirectoryConfig>,
        dependency: Option<DependencyConfig>,
    ) -> Fixture {
        let config_root = TempDir::new().unwrap();
        let store = ConfigStore::with_root(config_root.path());
        let workspace = TempDir::new().unwrap();
        for name in directories.keys() {
            fs::create_dir(workspace.path().join(name)).unwrap();
        }
        let config = WorkspaceConfig {
            root_path: workspace.path().to_path_buf(),
            directories,
            dependency,
        };
        let file = store.path_for(workspace.path());
        store.save(&file, &config).unwrap();
        Fixture {
            _config_root: config_root,
            store,
            workspace,
        }
    }

    fn app_directory(run_command: &str, clean_command: &str) -> IndexMap<String, DirectoryConfig> {
        IndexMap::from([(
            "app".to_string(),
            DirectoryConfig {
                run_command: run_command.to_string(),
                clean_command: clean_command.to_string(),
                kind: DirectoryKind::Frontend,
            },
        )])
    }

    #[tokio::test]
    async fn test_run_mode_executes_run_command() {
        let fx = fixture(app_directory("touch ran.txt", ""));
        let app = fx.workspace.path().join("app");
        run_one(&fx.store, &app, Mode::Run).await.unwrap();
        assert!(app.join("ran.txt").exists());
    }

    #[tokio::test]
    async fn test_clean_mode_with_empty_command_is_noop() {
        let fx = fixture(app_directory("touch ran.txt", ""));
        let app = fx.workspace.path().join("app");
        run_one(&fx.store, &app, Mode::Clean).await.unwrap();
        assert!(!app.join("ran.txt").exists());
    }

    #[tokio::test]
    async fn test_missing_workspace_is_fatal() {
        let config_root = TempDir::new().unwrap();
        let store = ConfigStore::with_root(config_root.path());
        let err = run_one(&store, Path::new("/ws/app"), Mode::Run)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SpacemanError::Workspace(WorkspaceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_unconfigured_directory_warns_and_succeeds() {
        let fx = fixture(app_directory("false", "false"));
        let other = fx.workspace.path().join("other");
        fs::create_dir(&other).unwrap();
        // "false" would fail if it ran; absence of the entry must not run it
        run_one(&fx.store, &other, Mode::Run).await.unwrap();
    }

    #[tokio::test]
    async fn test_skip_mode_dispatch_is_nonfatal() {
        let fx = fixture(app_directory("false", "false"));
        let app = fx.workspace.path().join("app");
        run_one(&fx.store, &app, Mode::Skip).await.unwrap();
    }

    #[tokio::test]
    async fn test_failing_command_propagates() {
        let fx = fixture(app_directory("false", ""));
        let app = fx.workspace.path().join("app");
        let err = run_one(&fx.store, &app, Mode::Run).await.unwrap_err();
        assert!(matches!(
            err,
            SpacemanError::Command(CommandError::Failed { code: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_gate_failure_does_not_abort_run() {
        let fx = fixture_with_dependency(
            app_directory("touch ran.txt", ""),
            Some(DependencyConfig {
                active: true,
                compose_path: PathBuf::from("missing-compose-dir"),
            }),
        );
        let app = fx.workspace.path().join("app");
        run_one(&fx.store, &app, Mode::Run).await.unwrap();
        assert!(app.join("ran.txt").exists());
    }

    #[tokio::test]
    async fn test_skip_set_bypasses_resolution() {
        // No config anywhere; skipping must still succeed
        let config_root = TempDir::new().unwrap();
        let store = ConfigStore::with_root(config_root.path());
        let skip_set = HashSet::from(["app".to_string()]);
        run_with_skip(&store, Path::new("/ws/app"), &skip_set, Mode::Run)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sequenced_runs_clean_before_run() {
        let fx = fixture(app_directory("touch ran.txt", "touch cleaned.txt"));
        let app = fx.workspace.path().join("app");
        let modes = crate::modes::schedule(&["run", "clean"]);
        run_sequenced(&fx.store, &app, &HashSet::new(), &modes)
            .await
            .unwrap();
        assert!(app.join("cleaned.txt").exists());
        assert!(app.join("ran.txt").exists());
    }

    #[tokio::test]
    async fn test_sequenced_aborts_after_failure() {
        let fx = fixture(app_directory("touch ran.txt", "false"));
        let app = fx.workspace.path().join("app");
        let modes = crate::modes::schedule(&["run", "clean"]);
        let err = run_sequenced(&fx.store, &app, &HashSet::new(), &modes)
            .await
            .unwrap_err();
        assert!(matches!(err, SpacemanError::Command(_)));
        // clean failed first, so run never started
        assert!(!app.join("ran.txt").exists());
    }
}
