use anyhow::Result;
use async_trait::async_trait;
use std::fs::FileType;
use std::path::Path;
use tokio::task;
use tracing::debug;
use walkdir::WalkDir;

use crate::models::{DirSize, EntryKind, FsEntry, FsMetadata, SkippedEntry};

use super::FileSystem;

pub struct RealFileSystem;

fn entry_kind(file_type: FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn metadata(&self, path: &Path) -> Result<FsMetadata> {
        let path = path.to_path_buf();
        task::spawn_blocking(move || {
            let metadata = std::fs::metadata(&path)?;
            let kind = entry_kind(metadata.file_type());
            let len = if kind == EntryKind::File {
                metadata.len()
            } else {
                0
            };
            Ok(FsMetadata { kind, len })
        })
        .await?
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(&dir)?.filter_map(|e| e.ok()) {
                let kind = match entry.file_type() {
                    Ok(file_type) => entry_kind(file_type),
                    Err(_) => continue,
                };
                let len = match kind {
                    EntryKind::File => entry.metadata().map(|m| m.len()).unwrap_or(0),
                    EntryKind::Directory | EntryKind::Symlink | EntryKind::Other => 0,
                };

                entries.push(FsEntry {
                    path: entry.path(),
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                    len,
                });
            }
            Ok(entries)
        })
        .await?
    }

    async fn dir_size(&self, dir: &Path) -> Result<DirSize> {
        let dir = dir.to_path_buf();
        let size = task::spawn_blocking(move || {
            let mut size = DirSize::default();
            for entry in WalkDir::new(&dir) {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        let path = err.path().unwrap_or(dir.as_path()).to_path_buf();
                        debug!("skipping {}: {err}", path.display());
                        size.skipped.push(SkippedEntry {
                            path,
                            reason: err.to_string(),
                        });
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                match entry.metadata() {
                    Ok(metadata) => size.bytes += metadata.len(),
                    Err(err) => {
                        debug!("skipping {}: {err}", entry.path().display());
                        size.skipped.push(SkippedEntry {
                            path: entry.path().to_path_buf(),
                            reason: err.to_string(),
                        });
                    }
                }
            }
            size
        })
        .await?;
        Ok(size)
    }
}
