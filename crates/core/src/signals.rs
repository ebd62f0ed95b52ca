//! Process-wide termination signal relay
//!
//! One SIGINT/SIGTERM listener is installed once at startup. It records the
//! first signal received and wakes any task waiting on it, so the command
//! runner can forward the signal into the currently active child. Handlers
//! are never registered per command, so sequential mode executions cannot
//! accumulate duplicate listeners.

use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::Notify;
use tracing::debug;

/// Termination signals consumed by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSignal {
    Interrupt,
    Terminate,
}

impl TermSignal {
    pub fn as_str(self) -> &'static str {
        match self {
            TermSignal::Interrupt => "SIGINT",
            TermSignal::Terminate => "SIGTERM",
        }
    }

    #[cfg(unix)]
    pub(crate) fn as_nix(self) -> nix::sys::signal::Signal {
        match self {
            TermSignal::Interrupt => nix::sys::signal::Signal::SIGINT,
            TermSignal::Terminate => nix::sys::signal::Signal::SIGTERM,
        }
    }

    fn code(self) -> u8 {
        match self {
            TermSignal::Interrupt => 1,
            TermSignal::Terminate => 2,
        }
    }

    fn from_code(code: u8) -> Option<TermSignal> {
        match code {
            1 => Some(TermSignal::Interrupt),
            2 => Some(TermSignal::Terminate),
            _ => None,
        }
    }
}

struct Relay {
    // 0 = none, otherwise TermSignal::code
    received: AtomicU8,
    notify: Notify,
}

static RELAY: OnceCell<Relay> = OnceCell::new();
static INSTALLED: OnceCell<()> = OnceCell::new();

fn relay() -> &'static Relay {
    RELAY.get_or_init(|| Relay {
        received: AtomicU8::new(0),
        notify: Notify::new(),
    })
}

/// Install the process-wide listener.
///
/// Must be called from within a tokio runtime. Calling it again is a no-op.
pub fn install() -> std::io::Result<()> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut terminate = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            loop {
                let received = tokio::select! {
                    received = interrupt.recv() => received.map(|_| TermSignal::Interrupt),
                    received = terminate.recv() => received.map(|_| TermSignal::Terminate),
                };
                match received {
                    Some(sig) => record(sig),
                    None => break,
                }
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            loop {
                if tokio::signal::ctrl_c().await.is_err() {
                    break;
                }
                record(TermSignal::Interrupt);
            }
        });
    }

    let _ = INSTALLED.set(());
    Ok(())
}

fn record(sig: TermSignal) {
    let relay = relay();
    // First signal wins; repeats still wake waiters so they can re-forward.
    let _ = relay
        .received
        .compare_exchange(0, sig.code(), Ordering::SeqCst, Ordering::SeqCst);
    debug!("Recorded termination signal {}", sig.as_str());
    relay.notify.notify_waiters();
}

/// The first termination signal received so far, if any
pub fn received() -> Option<TermSignal> {
    TermSignal::from_code(relay().received.load(Ordering::SeqCst))
}

/// Wait until a termination signal has been received.
///
/// Returns immediately if one was already recorded.
pub async fn wait() -> TermSignal {
    let relay = relay();
    loop {
        // Register interest before checking, so a signal recorded in between
        // cannot be missed.
        let notified = relay.notify.notified();
        if let Some(sig) = received() {
            return sig;
        }
        notified.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_install_is_idempotent() {
        assert!(install().is_ok());
        assert!(install().is_ok());
    }

    #[test]
    fn test_signal_codes_round_trip() {
        for sig in [TermSignal::Interrupt, TermSignal::Terminate] {
            assert_eq!(TermSignal::from_code(sig.code()), Some(sig));
        }
        assert_eq!(TermSignal::from_code(0), None);
    }
}
