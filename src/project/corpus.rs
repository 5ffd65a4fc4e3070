//! A directory of WebIDL files parsed into documents.
//!
//! Loading parses every file in parallel and then indexes declarations in a
//! single pass; edits happen afterwards, one file at a time.

use super::file_loader::{collect_file_paths, write_file};
use crate::base::{FileId, FileSet};
use crate::error::{Error, Result};
use crate::parser::{Definition, Interface};
use crate::syntax::{IdlFile, LoadError, ParseError, load_and_parse};
use indexmap::IndexMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Non-partial interfaces by name, in corpus order
pub type DeclarationIndex = IndexMap<String, (FileId, Interface)>;

/// Member names per interface across its partial blocks and included mixins
pub type MemberIndex = FxHashMap<String, FxHashSet<String>>;

/// A file left out of the corpus because it did not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ParseError,
}

#[derive(Debug, Default)]
pub struct Corpus {
    file_set: FileSet,
    files: IndexMap<FileId, IdlFile>,
    skipped: Vec<SkippedFile>,
}

impl Corpus {
    /// Parse every `.webidl` file below `root`.
    ///
    /// Unreadable files abort the load; files that fail to parse are skipped
    /// and listed in [`Corpus::skipped`].
    pub fn load(root: &Path) -> Result<Self> {
        let mut file_set = FileSet::new();
        let paths: Vec<(FileId, PathBuf)> = collect_file_paths(root)?
            .into_iter()
            .map(|path| (file_set.insert(path.clone()), path))
            .collect();

        let results: Vec<_> = paths
            .par_iter()
            .map(|(id, path)| (path, load_and_parse(*id, path)))
            .collect();

        let mut files = IndexMap::new();
        let mut skipped = Vec::new();
        for (path, result) in results {
            match result {
                Ok(file) => {
                    files.insert(file.id(), file);
                }
                Err(LoadError::Io(source)) => return Err(Error::io(path, source)),
                Err(LoadError::Parse(error)) => {
                    warn!(path = %path.display(), %error, "skipping file that does not parse");
                    skipped.push(SkippedFile {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            root = %root.display(),
            files = files.len(),
            skipped = skipped.len(),
            "loaded corpus"
        );
        Ok(Self {
            file_set,
            files,
            skipped,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &IdlFile> + '_ {
        self.files.values()
    }

    pub fn file(&self, id: FileId) -> Option<&IdlFile> {
        self.files.get(&id)
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut IdlFile> {
        self.files.get_mut(&id)
    }

    pub fn path(&self, id: FileId) -> Option<&Path> {
        self.file_set.path(id)
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Index every non-partial interface by name. When a name is defined
    /// twice the first definition wins.
    pub fn load_all_declarations(&self) -> DeclarationIndex {
        let mut index = DeclarationIndex::new();
        for file in self.files.values() {
            for iface in file.interfaces() {
                if iface.is_partial() {
                    continue;
                }
                let Some(name) = iface.name() else { continue };
                if index.contains_key(&name) {
                    debug!(name, path = %file.path().display(), "duplicate interface ignored");
                    continue;
                }
                index.insert(name, (file.id(), iface));
            }
        }
        index
    }

    /// Collect the member names each interface declares anywhere in the
    /// corpus: its main body, every `partial interface` block, and the
    /// bodies of mixins attached to it with `includes`.
    pub fn declared_members(&self) -> MemberIndex {
        let mut declared = MemberIndex::default();
        let mut mixins = MemberIndex::default();
        let mut includes = Vec::new();
        for file in self.files.values() {
            let Some(root) = file.source_file() else { continue };
            for definition in root.definitions() {
                match definition {
                    Definition::Interface(iface) => {
                        let Some(name) = iface.name() else { continue };
                        let bucket = if iface.is_mixin() {
                            &mut mixins
                        } else {
                            &mut declared
                        };
                        bucket
                            .entry(name)
                            .or_default()
                            .extend(iface.members().filter_map(|m| m.name()));
                    }
                    Definition::Includes(stmt) => {
                        if let (Some(target), Some(mixin)) = (stmt.target(), stmt.mixin()) {
                            includes.push((target, mixin));
                        }
                    }
                    _ => {}
                }
            }
        }
        for (target, mixin) in includes {
            match mixins.get(&mixin) {
                Some(members) => declared
                    .entry(target)
                    .or_default()
                    .extend(members.iter().cloned()),
                None => debug!(interface = %target, mixin = %mixin, "included mixin not found"),
            }
        }
        declared
    }

    /// The interface `name` in the current (possibly edited) tree of `id`
    pub fn current_interface(&self, id: FileId, name: &str) -> Option<Interface> {
        self.file(id)?.interface(name)
    }

    pub fn changed_files(&self) -> impl Iterator<Item = &IdlFile> + '_ {
        self.files.values().filter(|f| f.is_changed())
    }

    /// Write every edited file back; returns the written paths
    pub fn write_changed(&self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for file in self.changed_files() {
            write_file(file.path(), &file.text())?;
            info!(path = %file.path().display(), "rewrote file");
            written.push(file.path().to_path_buf());
        }
        Ok(written)
    }
}
