use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "buildstamp",
    version,
    about = "Environment fingerprints and page layout helpers for build pipelines",
    long_about = "buildstamp - deterministic build-environment fingerprints.\n\n\
                  Hashes environment variables into a stable cache key, records\n\
                  fingerprints per build target, and renders the fixed background\n\
                  page layout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new buildstamp.toml configuration file
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Print the fingerprint of the environment
    Fingerprint {
        #[command(flatten)]
        selection: SelectionOptions,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FingerprintFormat,
    },

    /// Compare the environment fingerprint with the one recorded for a target
    Check {
        /// Build target name
        target: String,

        #[command(flatten)]
        selection: SelectionOptions,

        /// Record the current fingerprint
        #[arg(long)]
        update: bool,

        /// Exit with an error if the fingerprint changed or was never recorded
        #[arg(long)]
        strict: bool,

        /// Stamp cache directory
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Render the fixed background layout
    Layout {
        #[command(flatten)]
        options: LayoutOptions,
    },

    /// Remove recorded fingerprints
    Clean {
        /// Stamp cache directory
        #[arg(short, long)]
        cache_dir: Option<PathBuf>,

        /// Only forget this target instead of removing the whole cache
        #[arg(long)]
        target: Option<String>,
    },
}

/// Which environment is fingerprinted and how
#[derive(Args, Clone, Debug)]
pub struct SelectionOptions {
    /// Read variables from a JSON object file instead of the process environment
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Include variables matching this glob (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Exclude variables matching this glob (repeatable)
    #[arg(short, long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Serialize keys in enumeration order instead of sorting them
    #[arg(long)]
    pub preserve_order: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Clone, Debug)]
pub struct LayoutOptions {
    /// Background image reference (default: layout.image from config)
    #[arg(long, env = "BUILDSTAMP_BACKGROUND")]
    pub image: Option<String>,

    /// Directory background images are resolved against
    #[arg(long)]
    pub asset_dir: Option<PathBuf>,

    /// File with child markup to place inside the content container
    #[arg(long, conflicts_with = "text")]
    pub content: Option<PathBuf>,

    /// Plain text to place inside the content container
    #[arg(long)]
    pub text: Option<String>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "html")]
    pub format: LayoutFormat,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FingerprintFormat {
    /// A single hex line
    #[default]
    Text,
    /// Fingerprint with variable count and key order
    Json,
}

impl std::fmt::Display for FingerprintFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FingerprintFormat::Text => write!(f, "text"),
            FingerprintFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LayoutFormat {
    /// Indented HTML
    #[default]
    Html,
    /// The layout tree as JSON
    Json,
}

impl std::fmt::Display for LayoutFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutFormat::Html => write!(f, "html"),
            LayoutFormat::Json => write!(f, "json"),
        }
    }
}
