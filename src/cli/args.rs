//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Rebuild element-combination derivation trees from step logs and estimate render layout
#[derive(Parser, Debug)]
#[command(name = "alchetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeatable: -d -d -d)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Generate completion scripts for the given shell
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,

    /// Print author and version
    #[arg(long)]
    pub info: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rebuild the derivation tree and render it
    Tree {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,

        /// Record to use from a batch payload (1-based)
        #[arg(short, long, default_value_t = 1, requires = "json")]
        nth: usize,

        /// Render every record in a batch payload
        #[arg(long, requires = "json", conflicts_with = "nth")]
        all: bool,
    },

    /// Show layout statistics for the rebuilt tree
    Stats {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,

        /// Record to use from a batch payload (1-based)
        #[arg(short, long, default_value_t = 1, requires = "json")]
        nth: usize,
    },

    /// Compute the scale factor that fits the tree into a viewport
    Scale {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Viewport width in pixels
        #[arg(long)]
        width: f64,

        /// Viewport height in pixels
        #[arg(long)]
        height: f64,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,

        /// Record to use from a batch payload (1-based)
        #[arg(short, long, default_value_t = 1, requires = "json")]
        nth: usize,
    },

    /// List the base elements (leaf names) of the rebuilt tree
    Leaves {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,

        /// Record to use from a batch payload (1-based)
        #[arg(short, long, default_value_t = 1, requires = "json")]
        nth: usize,

        /// Deduplicate, keeping first-seen order
        #[arg(short, long)]
        unique: bool,
    },

    /// Validate input without rendering
    Check {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,
    },

    /// Show the element-to-icon mapping for the rebuilt tree
    Icons {
        /// Step log file ('-' for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Treat input as a search-service JSON payload
        #[arg(long)]
        json: bool,

        /// Record to use from a batch payload (1-based)
        #[arg(short, long, default_value_t = 1, requires = "json")]
        nth: usize,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Show version and config status
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
