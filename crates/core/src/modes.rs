//! Mode tokens and scheduling
//!
//! A mode is one of the operations that can be requested for an invocation.
//! `skip` is a pseudo-mode: it gates execution for the named directories but
//! never executes a command itself.

use std::fmt;

/// Usage text shown when dispatch receives a mode it cannot execute
pub const USAGE: &str = "Usage: spaceman [init|edit|run|clean] [--skip <name>...] [-d <dir>]";

/// The closed set of modes, in priority order: skip gates first, then clean,
/// then run. Derived `Ord` follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Skip,
    Clean,
    Run,
}

impl Mode {
    /// Parse a raw token into a mode. Tokens are case-sensitive.
    pub fn from_token(token: &str) -> Option<Mode> {
        match token {
            "skip" => Some(Mode::Skip),
            "clean" => Some(Mode::Clean),
            "run" => Some(Mode::Run),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Skip => "skip",
            Mode::Clean => "clean",
            Mode::Run => "run",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produce the deduplicated, priority-ordered mode sequence for a raw token
/// list. Unrecognized tokens are silently ignored; they may be flags consumed
/// elsewhere. Deterministic: the same input multiset always yields the same
/// sequence regardless of original ordering.
pub fn schedule<S: AsRef<str>>(raw_tokens: &[S]) -> Vec<Mode> {
    let mut modes: Vec<Mode> = raw_tokens
        .iter()
        .filter_map(|token| Mode::from_token(token.as_ref()))
        .collect();
    modes.sort();
    modes.dedup();
    modes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_dedup_and_priority() {
        assert_eq!(
            schedule(&["run", "clean", "run"]),
            vec![Mode::Clean, Mode::Run]
        );
    }

    #[test]
    fn test_schedule_skip_first() {
        assert_eq!(schedule(&["skip", "run"]), vec![Mode::Skip, Mode::Run]);
        assert_eq!(
            schedule(&["run", "clean", "skip"]),
            vec![Mode::Skip, Mode::Clean, Mode::Run]
        );
    }

    #[test]
    fn test_schedule_empty() {
        assert_eq!(schedule::<&str>(&[]), Vec::<Mode>::new());
    }

    #[test]
    fn test_schedule_ignores_unrecognized_tokens() {
        assert_eq!(schedule(&["-d", "/ws/app", "run"]), vec![Mode::Run]);
        assert_eq!(schedule(&["bogus", "RUN"]), Vec::<Mode>::new());
    }

    #[test]
    fn test_schedule_order_independent() {
        let a = schedule(&["run", "skip", "clean"]);
        let b = schedule(&["clean", "run", "skip"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_token_round_trip() {
        for mode in [Mode::Skip, Mode::Clean, Mode::Run] {
            assert_eq!(Mode::from_token(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_token("edit"), None);
    }
}
