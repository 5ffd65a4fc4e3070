use indexmap::IndexSet;
use std::path::{Path, PathBuf};

/// Interned identifier of one source file in a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Bidirectional map between file paths and [`FileId`]s.
///
/// Ids are dense and follow insertion order.
#[derive(Debug, Default, Clone)]
pub struct FileSet {
    paths: IndexSet<PathBuf>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `path`, returning the existing id if it was already known
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> FileId {
        let (index, _) = self.paths.insert_full(path.into());
        FileId(index as u32)
    }

    pub fn file_id(&self, path: &Path) -> Option<FileId> {
        self.paths.get_index_of(path).map(|i| FileId(i as u32))
    }

    pub fn path(&self, id: FileId) -> Option<&Path> {
        self.paths.get_index(id.index()).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
