//! Run results and diagnostics.

use crate::project::SkippedFile;
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

/// Something a run skipped or could not do. Never fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: Option<PathBuf>,
    pub interface: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: None,
            interface: None,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            ..Self::warning(message)
        }
    }

    pub fn in_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn on_interface(mut self, name: impl Into<String>) -> Self {
        self.interface = Some(name.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Warning => f.write_str("warning: ")?,
            Severity::Info => f.write_str("note: ")?,
        }
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        if let Some(interface) = &self.interface {
            write!(f, "{interface}: ")?;
        }
        f.write_str(&self.message)
    }
}

/// Outcome of an `add` or `remove` run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Values inserted, per interface
    pub added: IndexMap<String, Vec<String>>,
    /// Values removed, per interface
    pub removed: IndexMap<String, Vec<String>>,
    /// Source files whose text changed (written unless `dry_run`)
    pub changed_files: Vec<PathBuf>,
    /// Whether the conf file content changed
    pub conf_changed: bool,
    pub dry_run: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyncReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn note_skipped(&mut self, skipped: &[SkippedFile]) {
        for file in skipped {
            self.push(
                Diagnostic::warning(format!("skipped, does not parse: {}", file.error))
                    .in_file(&file.path),
            );
        }
    }

    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    pub fn added_count(&self) -> usize {
        self.added.values().map(Vec::len).sum()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (interface, values) in &self.added {
            writeln!(f, "{interface}: added {}", values.join(", "))?;
        }
        for (interface, values) in &self.removed {
            writeln!(f, "{interface}: removed {}", values.join(", "))?;
        }
        let verb = if self.dry_run { "would rewrite" } else { "rewrote" };
        write!(f, "{verb} {} file(s)", self.changed_files.len())?;
        if self.conf_changed {
            f.write_str(" and the conf file")?;
        }
        Ok(())
    }
}

/// Outcome of a `check` run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    pub files: usize,
    pub skipped: Vec<SkippedFile>,
    /// Files whose printed tree differs from their text
    pub mismatched: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.mismatched.is_empty()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.skipped {
            writeln!(f, "{}: {}", file.path.display(), file.error)?;
        }
        for path in &self.mismatched {
            writeln!(f, "{}: printed text differs from source", path.display())?;
        }
        write!(
            f,
            "checked {} file(s): {} failed to parse, {} did not round-trip",
            self.files,
            self.skipped.len(),
            self.mismatched.len()
        )
    }
}
