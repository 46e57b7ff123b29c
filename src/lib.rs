pub mod engine;
pub mod error;
pub mod fs;
pub mod models;
pub mod paths;

use std::path::Path;

pub use crate::engine::{AnalyzeOptions, Analyzer, analyze_path, format_size};
pub use crate::error::AnalyzeError;
pub use crate::models::{Entry, UsageResult, Warning};

/// Name shown for an analysed root: its final component, or the whole path
/// for roots such as `/` or `C:\` that have none.
pub fn root_display_name(root_path: &Path) -> String {
    root_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root_path.as_os_str().to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_the_last_component() {
        assert_eq!(root_display_name(Path::new("/var/log/syslog")), "syslog");
        assert_eq!(root_display_name(Path::new("/")), "/");
    }
}
