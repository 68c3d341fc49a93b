use anyhow::Result;
use console::style;
use std::path::PathBuf;

use buildstamp::fingerprint::{StampCache, StampStatus};

use crate::cli::SelectionOptions;
use crate::config::resolve_config;

use super::fingerprint::compute;

pub fn run(
    target: String,
    selection: SelectionOptions,
    update: bool,
    strict: bool,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(selection.config.as_deref())?;
    let cache_dir = cache_dir.unwrap_or_else(|| config.cache.directory.clone());

    let current = compute(&selection, &config)?;
    let mut cache = StampCache::load(&cache_dir)?;
    let status = cache.status(&target, &current.fingerprint);

    let marker = match status {
        StampStatus::Fresh => style("✓").green().bold(),
        StampStatus::Changed => style("✗").red().bold(),
        StampStatus::New => style("+").yellow().bold(),
    };
    println!(
        "{} {}: {} ({})",
        marker,
        style(&target).cyan(),
        status,
        current.fingerprint
    );

    if let Some(previous) = cache.entries.get(&target) {
        if status == StampStatus::Changed {
            println!(
                "  Recorded: {} ({} variables)",
                style(previous.fingerprint).dim(),
                previous.variables
            );
        }
    }

    let mut recorded = false;
    if update && status != StampStatus::Fresh {
        if config.cache.enabled {
            cache.update(&target, current.fingerprint, current.variables, current.key_order);
            cache.save(&cache_dir)?;
            recorded = true;
            println!(
                "  Recorded fingerprint in {}",
                style(cache_dir.display()).cyan()
            );
        } else {
            tracing::warn!("Stamp cache is disabled in config, not recording {}", target);
        }
    }

    // A stale target only passes strict mode once its stamp is on disk
    if strict && !recorded && status != StampStatus::Fresh {
        anyhow::bail!("Environment fingerprint for `{}` is {}", target, status);
    }

    Ok(())
}
