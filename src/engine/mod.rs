mod analyze;
mod format;
pub mod render;

pub use analyze::{AnalyzeOptions, Analyzer, DEFAULT_MAX_CONCURRENCY, analyze_path};
pub use format::format_size;
