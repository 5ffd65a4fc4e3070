//! File system access for the corpus.

use crate::error::{Error, Result};
use crate::syntax::validate_extension;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All `.webidl` files below `dir`, sorted by path
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && validate_extension(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

pub fn load_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Replace the whole content of `path`
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}
