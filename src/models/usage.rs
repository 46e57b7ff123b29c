use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::engine::format_size;
use crate::error::AnalyzeError;

/// One file or directory in an analysis result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    /// Bytes of every regular file under this entry, regardless of how far
    /// `children` was expanded.
    pub size: u64,
    pub size_str: String,
    pub is_dir: bool,
    /// `None` when the entry was not expanded; `Some(vec![])` for an expanded
    /// empty directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Entry>>,
}

impl Entry {
    pub fn new(name: String, path: PathBuf, size: u64, is_dir: bool) -> Self {
        Self {
            name,
            path,
            size,
            size_str: format_size(size),
            is_dir,
            children: None,
        }
    }

    pub fn with_children(mut self, children: Option<Vec<Entry>>) -> Self {
        self.children = children;
        self
    }
}

/// A per-entry failure that was absorbed during analysis.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Warning {
    #[serde(serialize_with = "lossy_path")]
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResult {
    #[serde(serialize_with = "lossy_path")]
    pub root_path: PathBuf,
    pub total_size: u64,
    pub total_str: String,
    pub items: Vec<Entry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
}

impl UsageResult {
    /// Build a result from already sorted items, totalling their sizes.
    pub fn from_items(root_path: PathBuf, items: Vec<Entry>) -> Self {
        let total_size = items.iter().map(|item| item.size).sum();
        Self {
            root_path,
            total_size,
            total_str: format_size(total_size),
            items,
            error: None,
            warnings: None,
        }
    }

    /// The error-shaped result for a request whose root could not be accessed:
    /// only the root path and the message are populated.
    pub fn from_error(err: &AnalyzeError) -> Self {
        Self {
            root_path: err.path().to_path_buf(),
            total_size: 0,
            total_str: format_size(0),
            items: Vec::new(),
            error: Some(err.to_string()),
            warnings: None,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }
}

fn lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
