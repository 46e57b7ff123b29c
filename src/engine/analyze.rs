use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::AnalyzeError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::models::{Entry, EntryKind, FsEntry, UsageResult, Warning};

/// Upper bound on top-level entries sized at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Maximum number of top-level entries whose subtrees are walked
    /// concurrently. Zero is treated as one.
    pub max_concurrency: usize,
    /// Report absorbed per-entry failures in [`UsageResult::warnings`].
    pub collect_warnings: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            collect_warnings: false,
        }
    }
}

/// Computes size breakdowns of directory trees.
///
/// Each immediate child of the analysed root runs as its own task, gated by a
/// semaphore so that at most `max_concurrency` subtree walks are in flight.
/// Everything below the top level runs sequentially inside its parent's task.
/// There is no timeout: a filesystem call that hangs blocks its task and the
/// request with it.
pub struct Analyzer<F> {
    fs: Arc<F>,
    options: AnalyzeOptions,
}

impl<F: FileSystem + 'static> Analyzer<F> {
    pub fn new(fs: F) -> Self {
        Self::with_options(fs, AnalyzeOptions::default())
    }

    pub fn with_options(fs: F, options: AnalyzeOptions) -> Self {
        Self {
            fs: Arc::new(fs),
            options,
        }
    }

    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyse `root`, expanding `depth` levels of directories into entries.
    ///
    /// Sizes always cover whole subtrees; `depth` only controls how many
    /// nested `children` are returned. A depth of zero behaves like one.
    ///
    /// Only failing to stat or list `root` itself is an error. Use
    /// [`UsageResult::from_error`] to obtain the error-shaped result.
    pub async fn analyze(&self, root: &Path, depth: usize) -> Result<UsageResult, AnalyzeError> {
        let started = Instant::now();
        let root: PathBuf = root.components().collect();
        let depth = depth.max(1);

        let metadata = self
            .fs
            .metadata(&root)
            .await
            .map_err(|err| AnalyzeError::Stat {
                path: root.clone(),
                reason: err.to_string(),
            })?;

        if metadata.kind != EntryKind::Directory {
            let item = Entry::new(
                crate::root_display_name(&root),
                root.clone(),
                metadata.len,
                false,
            );
            return Ok(UsageResult::from_items(root, vec![item]));
        }

        let entries = self
            .fs
            .read_dir(&root)
            .await
            .map_err(|err| AnalyzeError::ReadDir {
                path: root.clone(),
                reason: err.to_string(),
            })?;

        debug!(
            "Analyzing {} ({} entries, depth {depth})",
            root.display(),
            entries.len()
        );

        let semaphore = Arc::new(Semaphore::new(self.options.max_concurrency.max(1)));
        let collected = Arc::new(Mutex::new(Collected::default()));
        let mut tasks = JoinSet::new();

        for entry in entries {
            let fs = Arc::clone(&self.fs);
            let semaphore = Arc::clone(&semaphore);
            let collected = Arc::clone(&collected);
            let collect_warnings = self.options.collect_warnings;

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return;
                };
                let mut warnings = Warnings::new(collect_warnings);
                let item = describe(&*fs, entry, depth, &mut warnings).await;
                debug!("Sized {} at {} bytes", item.path.display(), item.size);

                let mut collected = collected.lock();
                collected.items.push(item);
                collected.warnings.extend(warnings.into_vec());
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                warn!("Sizing task under {} failed: {err}", root.display());
            }
        }

        let Collected {
            mut items,
            warnings,
        } = std::mem::take(&mut *collected.lock());
        sort_by_size(&mut items);

        let mut result = UsageResult::from_items(root, items);
        if self.options.collect_warnings {
            result.warnings = Some(warnings);
        }

        info!(
            "Analyzed {}: {} in {} entries ({:?})",
            result.root_path.display(),
            result.total_str,
            result.items.len(),
            started.elapsed()
        );
        Ok(result)
    }
}

/// Analyse `root` on the real filesystem with default options.
pub async fn analyze_path(root: &Path, depth: usize) -> Result<UsageResult, AnalyzeError> {
    Analyzer::new(RealFileSystem).analyze(root, depth).await
}

#[derive(Default)]
struct Collected {
    items: Vec<Entry>,
    warnings: Vec<Warning>,
}

/// Per-task sink for absorbed failures. Always logs; keeps them only when
/// the caller asked for warnings.
struct Warnings(Option<Vec<Warning>>);

impl Warnings {
    fn new(collect: bool) -> Self {
        Self(collect.then(Vec::new))
    }

    fn record(&mut self, path: PathBuf, reason: String) {
        debug!("Skipping {}: {reason}", path.display());
        if let Some(warnings) = self.0.as_mut() {
            warnings.push(Warning { path, reason });
        }
    }

    fn into_vec(self) -> Vec<Warning> {
        self.0.unwrap_or_default()
    }
}

/// Build the entry for one directory child, expanding `depth - 1` further
/// levels below it when it is a directory.
fn describe<'a, F: FileSystem + ?Sized>(
    fs: &'a F,
    entry: FsEntry,
    depth: usize,
    warnings: &'a mut Warnings,
) -> BoxFuture<'a, Entry> {
    Box::pin(async move {
        if entry.kind != EntryKind::Directory {
            return Entry::new(entry.name, entry.path, entry.len, false);
        }

        // Sizing always walks the full subtree, even when nothing below is expanded.
        let size = match fs.dir_size(&entry.path).await {
            Ok(size) => {
                for skipped in size.skipped {
                    warnings.record(skipped.path, skipped.reason);
                }
                size.bytes
            }
            Err(err) => {
                warn!("Could not size {}: {err}", entry.path.display());
                warnings.record(entry.path.clone(), err.to_string());
                0
            }
        };

        let children = if depth > 1 {
            breakdown(fs, &entry.path, depth - 1, warnings).await
        } else {
            None
        };

        Entry::new(entry.name, entry.path, size, true).with_children(children)
    })
}

async fn breakdown<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &Path,
    depth: usize,
    warnings: &mut Warnings,
) -> Option<Vec<Entry>> {
    let entries = match fs.read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) => {
            warnings.record(dir.to_path_buf(), err.to_string());
            return None;
        }
    };

    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        children.push(describe(fs, entry, depth, warnings).await);
    }
    sort_by_size(&mut children);
    Some(children)
}

/// Largest first; equal sizes fall back to name order.
fn sort_by_size(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
}
