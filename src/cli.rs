use clap::{Parser, ValueEnum};

use dusage::engine::DEFAULT_MAX_CONCURRENCY;

pub const MIN_DEPTH: usize = 1;
pub const MAX_DEPTH: usize = 5;

#[derive(Parser, Debug)]
#[command(name = "dusage")]
#[command(about = "Report disk space usage of a directory tree", long_about = None)]
pub struct Cli {
    /// Path to analyse (defaults to the filesystem root)
    pub path: Option<String>,

    /// Directory levels to expand, clamped to 1..=5
    #[arg(short, long, default_value_t = MIN_DEPTH)]
    pub depth: usize,

    /// Maximum number of top-level entries sized concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Include entries that could not be read in the output
    #[arg(long)]
    pub warnings: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    Json,
    Tree,
}

impl Cli {
    pub fn clamped_depth(&self) -> usize {
        self.depth.clamp(MIN_DEPTH, MAX_DEPTH)
    }
}
