use anyhow::{Context, Result};
use serde::Serialize;

use buildstamp::fingerprint::{fingerprint_with, EnvironmentMap, Fingerprint, KeyOrder, VarFilter};

use crate::cli::{FingerprintFormat, SelectionOptions};
use crate::config::{resolve_config, Config};

/// Fingerprint of a selected environment
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub fingerprint: Fingerprint,
    pub variables: usize,
    pub key_order: KeyOrder,
}

pub fn run(selection: SelectionOptions, format: FingerprintFormat) -> Result<()> {
    let config = resolve_config(selection.config.as_deref())?;
    let result = compute(&selection, &config)?;
    tracing::debug!("Printing fingerprint as {}", format);

    match format {
        FingerprintFormat::Text => println!("{}", result.fingerprint),
        FingerprintFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(())
}

/// Select variables per CLI flags and config, then fingerprint them
pub fn compute(selection: &SelectionOptions, config: &Config) -> Result<Selection> {
    let key_order = if selection.preserve_order {
        KeyOrder::Insertion
    } else {
        config.fingerprint.key_order
    };

    let include: Vec<String> = config
        .fingerprint
        .include
        .iter()
        .chain(&selection.include)
        .cloned()
        .collect();
    let exclude: Vec<String> = config
        .fingerprint
        .exclude
        .iter()
        .chain(&selection.exclude)
        .cloned()
        .collect();
    let filter = VarFilter::new(&include, &exclude)?;

    let env = match &selection.from {
        Some(path) => load_env_file(path, &filter)?,
        None => EnvironmentMap::capture(&filter)?,
    };

    if env.is_empty() {
        tracing::warn!("No environment variables selected, fingerprinting an empty set");
    }

    let fingerprint = fingerprint_with(&env, key_order)?;
    tracing::debug!(
        "Fingerprinted {} variables ({} keys): {}",
        env.len(),
        key_order,
        fingerprint
    );

    Ok(Selection {
        fingerprint,
        variables: env.len(),
        key_order,
    })
}

fn load_env_file(path: &std::path::Path, filter: &VarFilter) -> Result<EnvironmentMap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read environment file: {}", path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse environment file: {}", path.display()))?;

    let env = EnvironmentMap::from_json(&value)
        .with_context(|| format!("Invalid environment file: {}", path.display()))?;

    Ok(env
        .iter()
        .filter(|(name, _)| filter.matches(name))
        .collect())
}
