mod entry;
mod usage;

pub use entry::{DirSize, EntryKind, FsEntry, FsMetadata, SkippedEntry};
pub use usage::{Entry, UsageResult, Warning};
