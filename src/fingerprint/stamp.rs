use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::{Fingerprint, KeyOrder};

/// Last fingerprint recorded for a build target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampEntry {
    pub fingerprint: Fingerprint,
    /// Number of variables that went into the fingerprint
    pub variables: usize,
    pub key_order: KeyOrder,
    /// Recording timestamp (Unix seconds)
    pub recorded_at: u64,
}

/// Recorded fingerprints keyed by target name
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StampCache {
    pub entries: HashMap<String, StampEntry>,
    /// Format version; a mismatch discards the stored stamps
    pub version: u32,
}

/// Outcome of comparing a fingerprint with the recorded one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampStatus {
    Fresh,
    Changed,
    New,
}

impl std::fmt::Display for StampStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StampStatus::Fresh => write!(f, "fresh"),
            StampStatus::Changed => write!(f, "changed"),
            StampStatus::New => write!(f, "new"),
        }
    }
}

const STAMP_VERSION: u32 = 1;
const STAMP_FILE_NAME: &str = "stamps.json";

impl StampCache {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            version: STAMP_VERSION,
        }
    }

    /// Load stamps from directory
    pub fn load(cache_dir: &Path) -> Result<Self> {
        let stamp_file = cache_dir.join(STAMP_FILE_NAME);

        if !stamp_file.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(&stamp_file)
            .with_context(|| format!("Failed to read stamp file: {}", stamp_file.display()))?;

        let cache: StampCache = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse stamp file: {}", stamp_file.display()))?;

        if cache.version != STAMP_VERSION {
            tracing::info!("Stamp file version mismatch, starting fresh");
            return Ok(Self::new());
        }

        Ok(cache)
    }

    /// Save stamps to directory
    pub fn save(&self, cache_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;

        let stamp_file = cache_dir.join(STAMP_FILE_NAME);
        let content = serde_json::to_string_pretty(self)?;

        std::fs::write(&stamp_file, content)
            .with_context(|| format!("Failed to write stamp file: {}", stamp_file.display()))?;

        Ok(())
    }

    pub fn status(&self, target: &str, fingerprint: &Fingerprint) -> StampStatus {
        match self.entries.get(target) {
            None => StampStatus::New,
            Some(entry) if entry.fingerprint == *fingerprint => StampStatus::Fresh,
            Some(_) => StampStatus::Changed,
        }
    }

    /// Check whether a target's cached artifacts must be rebuilt
    pub fn needs_refresh(&self, target: &str, fingerprint: &Fingerprint) -> bool {
        self.status(target, fingerprint) != StampStatus::Fresh
    }

    /// Record the fingerprint for a target
    pub fn update(
        &mut self,
        target: &str,
        fingerprint: Fingerprint,
        variables: usize,
        key_order: KeyOrder,
    ) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        self.entries.insert(
            target.to_string(),
            StampEntry {
                fingerprint,
                variables,
                key_order,
                recorded_at: now,
            },
        );
    }

    pub fn remove(&mut self, target: &str) -> Option<StampEntry> {
        self.entries.remove(target)
    }

    pub fn stats(&self) -> StampStats {
        let mut targets: Vec<String> = self.entries.keys().cloned().collect();
        targets.sort();

        StampStats {
            total_entries: self.entries.len(),
            targets,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Stamp cache statistics
#[derive(Debug, Clone)]
pub struct StampStats {
    pub total_entries: usize,
    pub targets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::{fingerprint, EnvironmentMap};
    use tempfile::TempDir;

    fn fp(value: &str) -> Fingerprint {
        let env: EnvironmentMap = [("A", value)].into_iter().collect();
        fingerprint(&env).unwrap()
    }

    #[test]
    fn test_stamp_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let cache_dir = temp_dir.path().join("stamps");

        let mut cache = StampCache::new();
        cache.update("web", fp("1"), 1, KeyOrder::Sorted);
        cache.save(&cache_dir).unwrap();

        let loaded = StampCache::load(&cache_dir).unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries["web"].fingerprint, fp("1"));
        assert_eq!(loaded.entries["web"].key_order, KeyOrder::Sorted);
    }

    #[test]
    fn test_missing_file_gives_empty_cache() {
        let temp_dir = TempDir::new().unwrap();
        let cache = StampCache::load(temp_dir.path()).unwrap();
        assert!(cache.entries.is_empty());
        assert_eq!(cache.version, STAMP_VERSION);
    }

    #[test]
    fn test_version_mismatch_discards_entries() {
        let temp_dir = TempDir::new().unwrap();

        let mut cache = StampCache::new();
        cache.update("web", fp("1"), 1, KeyOrder::Sorted);
        cache.version = STAMP_VERSION + 1;
        cache.save(temp_dir.path()).unwrap();

        let loaded = StampCache::load(temp_dir.path()).unwrap();
        assert!(loaded.entries.is_empty());
    }

    #[test]
    fn test_needs_refresh_transitions() {
        let mut cache = StampCache::new();
        assert_eq!(cache.status("web", &fp("1")), StampStatus::New);
        assert!(cache.needs_refresh("web", &fp("1")));

        cache.update("web", fp("1"), 1, KeyOrder::Sorted);
        assert_eq!(cache.status("web", &fp("1")), StampStatus::Fresh);
        assert!(!cache.needs_refresh("web", &fp("1")));

        assert_eq!(cache.status("web", &fp("2")), StampStatus::Changed);
        assert!(cache.remove("web").is_some());
        assert_eq!(cache.stats().total_entries, 0);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(STAMP_FILE_NAME), "not json").unwrap();
        assert!(StampCache::load(temp_dir.path()).is_err());
    }
}
