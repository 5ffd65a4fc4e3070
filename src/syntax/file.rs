//! Parsed WebIDL document.
//!
//! An [`IdlFile`] owns the green tree of one source file. Edits never mutate
//! the tree: they produce a new root which replaces the old one, and the file
//! remembers that it changed so the orchestrator only writes what it must.

use crate::base::FileId;
use crate::parser::{AstNode, GreenNode, Interface, SourceFile, SyntaxNode};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct IdlFile {
    id: FileId,
    path: PathBuf,
    green: GreenNode,
    changed: bool,
}

impl IdlFile {
    pub(crate) fn new(id: FileId, path: PathBuf, green: GreenNode) -> Self {
        Self {
            id,
            path,
            green,
            changed: false,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// A fresh root syntax node over the current tree
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn source_file(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    /// The current text; identical to the source text until an edit is applied
    pub fn text(&self) -> String {
        self.syntax().to_string()
    }

    /// Whether any edit has been applied since parsing
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Replace the tree with the root produced by an edit
    pub fn apply(&mut self, root: GreenNode) {
        if root != self.green {
            self.green = root;
            self.changed = true;
        }
    }

    /// All interface-like definitions in source order
    pub fn interfaces(&self) -> Vec<Interface> {
        self.source_file()
            .map(|file| file.interfaces().collect())
            .unwrap_or_default()
    }

    /// The non-partial interface called `name`, if this file defines it
    pub fn interface(&self, name: &str) -> Option<Interface> {
        self.interfaces()
            .into_iter()
            .find(|iface| !iface.is_partial() && iface.name().as_deref() == Some(name))
    }
}
