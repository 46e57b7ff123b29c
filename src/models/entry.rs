use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// One immediate child as reported by [`crate::fs::FileSystem::read_dir`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    /// Byte length for regular files, zero for everything else.
    pub len: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FsMetadata {
    pub kind: EntryKind,
    pub len: u64,
}

/// An entry that could not be read while sizing a subtree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of summing every regular file under a directory.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirSize {
    pub bytes: u64,
    pub skipped: Vec<SkippedEntry>,
}
