use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level for CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for search results and configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// How `qs snapshot` enumerates the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SnapshotStrategy {
    /// Pattern scan with local filtering (keeps named graphs)
    #[default]
    Scan,
    /// Filtering CONSTRUCT query evaluated by the store
    Query,
}

#[derive(Debug, Parser)]
#[command(name = "qs")]
#[command(about = "qs - keep a search index in sync with a quad store, and query it")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses config file value or defaults to 'warn'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (falls back to $QUADSEARCH_CONFIG, then defaults)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Level requested on the command line, if any
    pub fn requested_level(&self) -> Option<LevelFilter> {
        if self.verbose {
            return Some(LevelFilter::DEBUG);
        }
        self.log_level.map(LevelFilter::from)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load N-Quads through change capture, then run a hybrid search
    Search {
        /// Search query text
        query: String,

        /// N-Quads files to load before searching
        #[arg(short, long = "data", required = true)]
        data: Vec<PathBuf>,

        /// Maximum number of results (defaults to index.default_limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Load the store first, then populate the index with one bulk pull
        #[arg(long)]
        pull: bool,
    },

    /// Print every index-worthy quad from the given N-Quads files
    Snapshot {
        /// N-Quads files to load
        #[arg(short, long = "data", required = true)]
        data: Vec<PathBuf>,

        /// Enumeration strategy
        #[arg(short, long, value_enum, default_value_t = SnapshotStrategy::Scan)]
        strategy: SnapshotStrategy,
    },

    /// Print the document id a quad maps to
    Skolem {
        /// One N-Quads statement
        statement: String,

        /// Also print the canonical form that is hashed
        #[arg(long)]
        canonical: bool,
    },

    /// Print the effective configuration
    Config {
        /// Output format (table prints TOML)
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}
