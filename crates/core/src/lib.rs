//! Core library for the spaceman workspace manager
//!
//! This crate contains the workspace resolution, mode scheduling, and command
//! execution engine shared by the `spaceman` CLI: the configuration store,
//! workspace resolver, mode scheduler, command runner, dependency gate,
//! orchestrator, signal relay, logging, and error handling.

pub mod config;
pub mod errors;
pub mod gate;
pub mod logging;
pub mod modes;
pub mod orchestrator;
pub mod runner;
pub mod signals;
pub mod workspace;

// Re-export IndexMap for use by dependent crates (preserves insertion order for ordered maps)
pub use indexmap::IndexMap;

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let version = version();
        assert!(!version.is_empty());
        assert!(version.contains('.'));
    }
}
