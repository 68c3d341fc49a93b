use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use buildstamp::fingerprint::KeyOrder;

/// Root configuration structure for buildstamp.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Which variables feed the fingerprint
    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    /// Background layout settings
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Stamp cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FingerprintConfig {
    /// Variable name globs to include (empty means all)
    #[serde(default)]
    pub include: Vec<String>,

    /// Variable name globs to exclude
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Key ordering used when serializing the environment
    #[serde(default)]
    pub key_order: KeyOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Directory background images are resolved against
    #[serde(default = "default_asset_dir")]
    pub asset_dir: PathBuf,

    /// Background image reference
    #[serde(default)]
    pub image: Option<String>,

    /// Maximum width of the content container in pixels
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Top and bottom padding of the content layer in pixels
    #[serde(default = "default_padding_y")]
    pub padding_y: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            asset_dir: default_asset_dir(),
            image: None,
            max_width: default_max_width(),
            padding_y: default_padding_y(),
        }
    }
}

fn default_asset_dir() -> PathBuf {
    PathBuf::from("./assets")
}

fn default_max_width() -> u32 {
    buildstamp::layout::CONTAINER_STYLE.max_width_px
}

fn default_padding_y() -> u32 {
    buildstamp::layout::CONTENT_STYLE.padding_y_px
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enable recording stamps
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Cache directory
    #[serde(default = "default_cache_dir")]
    pub directory: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            directory: default_cache_dir(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".buildstamp-cache")
}

impl Config {
    /// Generate default TOML content
    pub fn default_toml() -> String {
        r#"[fingerprint]
# Variable name globs; an empty include list fingerprints every variable
include = []  # e.g. ["CARGO_*", "RUST*", "NODE_ENV"]
exclude = []  # e.g. ["*_TOKEN", "*_SECRET"]
key_order = "sorted"  # "insertion" keeps enumeration order

[layout]
asset_dir = "./assets"
# image = "bg.png"
max_width = 1200
padding_y = 64

[cache]
enabled = true
directory = ".buildstamp-cache"
"#
        .to_string()
    }
}
