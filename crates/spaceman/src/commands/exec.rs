//! Shared execution path for the `run` and `clean` subcommands
//!
//! The subcommand name plus any extra positional mode tokens form the raw
//! token list handed to the scheduler, so `spaceman run clean` executes clean
//! before run. The `--skip` names contribute the `skip` pseudo-token and the
//! skip set consulted per mode.

use anyhow::Result;
use spaceman_core::config::ConfigStore;
use spaceman_core::modes::{self, Mode};
use spaceman_core::orchestrator;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

pub async fn execute(
    verb: &str,
    extra_modes: Vec<String>,
    skip: Vec<String>,
    dir: Option<PathBuf>,
) -> Result<()> {
    let mut tokens = vec![verb.to_string()];
    tokens.extend(extra_modes);
    if !skip.is_empty() {
        tokens.push(Mode::Skip.as_str().to_string());
    }
    let scheduled = modes::schedule(&tokens);
    debug!("Scheduled modes: {:?}", scheduled);

    let target = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let skip_set: HashSet<String> = skip.into_iter().collect();

    let store = ConfigStore::new()?;
    store.ensure_root()?;
    orchestrator::run_sequenced(&store, &target, &skip_set, &scheduled).await?;
    Ok(())
}
