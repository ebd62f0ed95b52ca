//! External command execution
//!
//! Runs one command line to completion in a given working directory with the
//! host's standard streams inherited, so interactive or output-heavy children
//! behave transparently. While the child is alive, a termination signal
//! received by the host is forwarded to it verbatim and the runner returns
//! promptly; a child is never left orphaned on shutdown.
//!
//! Command lines are tokenized by whitespace only. Arguments containing
//! spaces or shell quoting are a known limitation; wrap such commands in a
//! script.

use crate::errors::{CommandError, Result};
use crate::signals::{self, TermSignal};
use std::path::Path;
use std::process::Stdio;
use tokio::process::{Child, Command};
use tracing::{info, instrument, warn};

/// Execute `command_line` in `cwd`, labeled for messages and errors.
///
/// An empty command line is a no-op: a warning is emitted and the call
/// succeeds, since not every directory needs a given mode. Otherwise the call
/// resolves successfully only if the child exits with status 0.
#[instrument(skip_all, fields(label = %label, cwd = %cwd.display()))]
pub async fn run(command_line: &str, label: &str, cwd: &Path) -> Result<()> {
    let mut parts = command_line.split_whitespace();
    let Some(program) = parts.next() else {
        warn!("Skipping {}, no command specified.", label);
        return Ok(());
    };

    info!("Running {} command...", label);
    let mut child = Command::new(program)
        .args(parts)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| CommandError::Spawn {
            label: label.to_string(),
            source,
        })?;

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|source| CommandError::Spawn {
                label: label.to_string(),
                source,
            })?;
            match status.code() {
                Some(0) => {
                    info!("{} command completed with exit code 0", label);
                    Ok(())
                }
                Some(code) => Err(CommandError::Failed {
                    label: label.to_string(),
                    code,
                }
                .into()),
                None => Err(CommandError::Terminated {
                    label: label.to_string(),
                }
                .into()),
            }
        }
        sig = signals::wait() => {
            warn!("Caught {}. Stopping process...", sig.as_str());
            forward_signal(&mut child, sig);
            // Reap the child so it is never orphaned
            let _ = child.wait().await;
            Err(CommandError::Interrupted {
                label: label.to_string(),
                signal: sig.as_str(),
            }
            .into())
        }
    }
}

#[cfg(unix)]
fn forward_signal(child: &mut Child, sig: TermSignal) {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    if let Some(pid) = child.id() {
        if let Err(err) = kill(Pid::from_raw(pid as i32), sig.as_nix()) {
            warn!("Failed to forward {} to child {}: {}", sig.as_str(), pid, err);
        }
    }
}

#[cfg(not(unix))]
fn forward_signal(child: &mut Child, sig: TermSignal) {
    // No per-signal delivery on this platform; kill the child outright.
    warn!("Cannot forward {} on this platform; killing child", sig.as_str());
    let _ = child.start_kill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SpacemanError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_command_is_noop() {
        let tmp = TempDir::new().unwrap();
        assert!(run("", "run", tmp.path()).await.is_ok());
        assert!(run("   ", "clean", tmp.path()).await.is_ok());
    }

    #[tokio::test]
    async fn test_successful_command() {
        let tmp = TempDir::new().unwrap();
        assert!(run("true", "run", tmp.path()).await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_command_carries_exit_code() {
        let tmp = TempDir::new().unwrap();
        let err = run("false", "run", tmp.path()).await.unwrap_err();
        match err {
            SpacemanError::Command(CommandError::Failed { label, code }) => {
                assert_eq!(label, "run");
                assert_eq!(code, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let tmp = TempDir::new().unwrap();
        let err = run("definitely-not-a-real-binary-54321", "run", tmp.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SpacemanError::Command(CommandError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn test_command_runs_in_cwd() {
        let tmp = TempDir::new().unwrap();
        run("touch marker.txt", "run", tmp.path()).await.unwrap();
        assert!(tmp.path().join("marker.txt").exists());
    }
}
