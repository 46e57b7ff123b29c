mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::models::{DirSize, FsEntry, FsMetadata};

#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Stat `path`, following symlinks.
    async fn metadata(&self, path: &Path) -> Result<FsMetadata>;

    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>>;

    /// Sum the length of every regular file under `dir` without following
    /// symlinks. Unreadable entries are recorded in [`DirSize::skipped`]
    /// instead of failing the walk.
    async fn dir_size(&self, dir: &Path) -> Result<DirSize>;
}
