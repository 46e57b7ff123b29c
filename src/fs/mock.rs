use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::models::{DirSize, EntryKind, FsEntry, FsMetadata, SkippedEntry};

use super::FileSystem;

#[derive(Clone, Debug)]
enum Response {
    Ok(Vec<FsEntry>),
    Err(String),
}

#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[derive(Default)]
struct Inner {
    responses: HashMap<PathBuf, Response>,
    files: HashMap<PathBuf, u64>,
    stat_errors: HashMap<PathBuf, String>,
    sizing_delay: Option<Duration>,
    calls: Vec<PathBuf>,
    sized: Vec<PathBuf>,
}

impl MockFileSystem {
    pub fn dir(path: &str) -> FsEntry {
        Self::entry(path, EntryKind::Directory, 0)
    }

    pub fn file(path: &str, len: u64) -> FsEntry {
        Self::entry(path, EntryKind::File, len)
    }

    pub fn symlink(path: &str) -> FsEntry {
        Self::entry(path, EntryKind::Symlink, 0)
    }

    fn entry(path: &str, kind: EntryKind, len: u64) -> FsEntry {
        let path = PathBuf::from(path);
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        FsEntry {
            path,
            name,
            kind,
            len,
        }
    }

    pub fn set_dir_entries(&self, dir: impl Into<PathBuf>, entries: Vec<FsEntry>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.responses.insert(dir.into(), Response::Ok(entries));
    }

    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .responses
            .insert(dir.into(), Response::Err(message.into()));
    }

    pub fn set_stat_error(&self, path: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.stat_errors.insert(path.into(), message.into());
    }

    pub fn set_file(&self, path: impl Into<PathBuf>, len: u64) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.files.insert(path.into(), len);
    }

    /// Make every `dir_size` call sleep for `delay` before answering.
    pub fn set_sizing_delay(&self, delay: Duration) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.sizing_delay = Some(delay);
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    pub fn sized(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.sized.clone()
    }

    /// Highest number of `dir_size` calls observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn subtree_size(inner: &Inner, dir: &Path, size: &mut DirSize) {
        match inner.responses.get(dir) {
            Some(Response::Ok(entries)) => {
                for entry in entries {
                    match entry.kind {
                        EntryKind::File => size.bytes += entry.len,
                        EntryKind::Directory => Self::subtree_size(inner, &entry.path, size),
                        EntryKind::Symlink | EntryKind::Other => {}
                    }
                }
            }
            Some(Response::Err(message)) => size.skipped.push(SkippedEntry {
                path: dir.to_path_buf(),
                reason: message.clone(),
            }),
            None => size.skipped.push(SkippedEntry {
                path: dir.to_path_buf(),
                reason: format!("no mock response for {}", dir.display()),
            }),
        }
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn metadata(&self, path: &Path) -> Result<FsMetadata> {
        let inner = self.inner.lock().expect("mock fs lock");
        if let Some(message) = inner.stat_errors.get(path) {
            return Err(anyhow!("{message}"));
        }
        if let Some(&len) = inner.files.get(path) {
            return Ok(FsMetadata {
                kind: EntryKind::File,
                len,
            });
        }
        if inner.responses.contains_key(path) {
            return Ok(FsMetadata {
                kind: EntryKind::Directory,
                len: 0,
            });
        }
        Err(anyhow!("No such file or directory"))
    }

    async fn read_dir(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());

        match inner.responses.get(dir) {
            Some(Response::Ok(entries)) => Ok(entries.clone()),
            Some(Response::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock response for {}", dir.display())),
        }
    }

    async fn dir_size(&self, dir: &Path) -> Result<DirSize> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = {
            let mut inner = self.inner.lock().expect("mock fs lock");
            inner.sized.push(dir.to_path_buf());
            inner.sizing_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut size = DirSize::default();
        {
            let inner = self.inner.lock().expect("mock fs lock");
            Self::subtree_size(&inner, dir, &mut size);
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(size)
    }
}
