use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "evidence-tags")]
#[command(about = "Resolve evidence tags to canonical categories and report sections")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Base directory (default: ~/.evidence-tags)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// External section -> tags map (overrides registry.source)
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a category from a declared category, tags and/or a file path
    Resolve {
        /// Declared category (e.g., "billing", "#Field-Notes")
        #[arg(short, long)]
        category: Option<String>,

        /// Tag (repeatable)
        #[arg(short, long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// File path used for the extension fallback
        #[arg(short, long, value_name = "PATH")]
        file: Option<PathBuf>,
    },

    /// Normalize tags into tokens
    Normalize {
        /// Tags to normalize
        tags: Vec<String>,
    },

    /// List every category matching the given tags
    Candidates {
        /// Tags to match
        tags: Vec<String>,
    },

    /// List categories, or show one in detail
    Categories {
        /// Category slug to show
        slug: Option<String>,
    },

    /// Show the file extension fallback table
    Extensions,

    /// Inspect registry sources
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },

    /// Resolve every file below a directory
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Glob patterns to skip, relative to the scan root (replaces defaults)
        #[arg(long, value_name = "GLOB")]
        exclude: Vec<String>,

        /// Only list files whose category matched
        #[arg(long)]
        matched_only: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RegistryAction {
    /// Check that a section map is well formed
    Validate {
        /// Section map (JSON object of section -> tag list)
        path: PathBuf,
    },

    /// Print the fingerprint of the active registry
    Fingerprint,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g., registry.source, priorities.billing)
        key: String,
    },

    /// Set a config value (empty value clears it)
    Set {
        /// Config key (e.g., registry.source, priorities.billing)
        key: String,

        /// Value to set (e.g., "sections.json" or "150")
        value: String,
    },

    /// List all config values
    List,

    /// Show config file path
    Path,

    /// Initialize config file with defaults
    Init,
}
