//! Dependency gate
//!
//! Optional compose bring-up executed before a workspace's primary "run"
//! command. The gate is best-effort: the orchestrator logs a failure and
//! proceeds with the primary command rather than treating the dependency as
//! a hard precondition.

use crate::config::WorkspaceConfig;
use crate::errors::SpacemanError;
use crate::runner;
use tracing::{debug, info};

/// Fixed bring-up command for the compose dependency
pub const COMPOSE_UP: &str = "docker-compose up -d";

/// Typed outcome of a gate attempt, surfaced to the orchestrator so callers
/// can decide how strictly to treat dependency failures.
#[derive(Debug)]
pub enum GateOutcome {
    /// No dependency configured, or configured inactive
    Skipped,
    /// Bring-up command completed successfully
    Started,
    /// Bring-up was attempted and failed
    Failed(SpacemanError),
}

/// Bring up the workspace's compose dependency if it is declared active.
///
/// The bring-up command runs with the workspace root joined with the
/// configured compose path as its working directory.
pub async fn ensure(config: &WorkspaceConfig) -> GateOutcome {
    let Some(dependency) = &config.dependency else {
        return GateOutcome::Skipped;
    };
    if !dependency.active {
        debug!("Compose dependency configured but inactive; skipping");
        return GateOutcome::Skipped;
    }

    let cwd = config.root_path.join(&dependency.compose_path);
    info!("Bringing up compose dependency in {}", cwd.display());
    match runner::run(COMPOSE_UP, "dependency", &cwd).await {
        Ok(()) => GateOutcome::Started,
        Err(err) => GateOutcome::Failed(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DependencyConfig;
    use indexmap::IndexMap;
    use std::path::PathBuf;

    fn config_with(dependency: Option<DependencyConfig>) -> WorkspaceConfig {
        WorkspaceConfig {
            root_path: PathBuf::from("/ws"),
            directories: IndexMap::new(),
            dependency,
        }
    }

    #[tokio::test]
    async fn test_no_dependency_is_skipped() {
        let outcome = ensure(&config_with(None)).await;
        assert!(matches!(outcome, GateOutcome::Skipped));
    }

    #[tokio::test]
    async fn test_inactive_dependency_is_skipped() {
        let outcome = ensure(&config_with(Some(DependencyConfig {
            active: false,
            compose_path: PathBuf::from("infra"),
        })))
        .await;
        assert!(matches!(outcome, GateOutcome::Skipped));
    }
}
