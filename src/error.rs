//! Crate-level error type.

use crate::compat::CompatError;
use crate::config::ConfigError;
use crate::edit::EditError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that abort a run. Per-file parse failures and per-node shape
/// problems are reported as diagnostics instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("interface `{name}` is not defined in the corpus")]
    MissingInterface { name: String },
    #[error(transparent)]
    Compat(#[from] CompatError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
