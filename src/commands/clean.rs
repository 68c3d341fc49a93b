use anyhow::Result;
use console::style;
use std::path::PathBuf;

use buildstamp::fingerprint::StampCache;
use buildstamp::utils::{dir_size, format_size};

use crate::config::find_and_load_config;

pub fn run(cache_dir: Option<PathBuf>, target: Option<String>) -> Result<()> {
    // Try to load config to find the default directory
    let config = find_and_load_config().ok().flatten();

    let cache_path = cache_dir
        .or_else(|| config.as_ref().map(|c| c.cache.directory.clone()))
        .unwrap_or_else(|| PathBuf::from(".buildstamp-cache"));

    if let Some(target) = target {
        let mut cache = StampCache::load(&cache_path)?;
        match cache.remove(&target) {
            Some(entry) => {
                cache.save(&cache_path)?;
                println!(
                    "  {} Forgot {} ({})",
                    style("✓").green(),
                    style(&target).cyan(),
                    entry.fingerprint
                );
            }
            None => println!(
                "  {} No stamp recorded for {}",
                style("-").dim(),
                target
            ),
        }
        return Ok(());
    }

    println!("{} Cleaning recorded fingerprints", style("🧹").blue().bold());

    if cache_path.exists() {
        let stats = StampCache::load(&cache_path)
            .map(|c| c.stats())
            .ok();
        let cache_size = dir_size(&cache_path).unwrap_or(0);
        std::fs::remove_dir_all(&cache_path)?;
        println!(
            "  {} Removed cache: {} ({})",
            style("✓").green(),
            cache_path.display(),
            format_size(cache_size)
        );
        if let Some(stats) = stats.filter(|s| s.total_entries > 0) {
            println!(
                "  {} {} target(s): {}",
                style("-").dim(),
                stats.total_entries,
                stats.targets.join(", ")
            );
        }
    } else {
        println!(
            "  {} Cache not found: {}",
            style("-").dim(),
            cache_path.display()
        );
    }

    println!();
    println!("{} Clean complete!", style("✓").green().bold());

    Ok(())
}
