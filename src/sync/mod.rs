//! Run modes: synchronize the annotation with compat data, or check the
//! corpus.
//!
//! Every run loads the whole corpus first, then edits trees in memory, then
//! writes changed source files one after another, and touches the conf file
//! last in a single read-modify-write.

mod add;
mod check;
mod remove;
mod report;

pub use add::{add_unsupported, missing_interfaces};
pub use check::check_corpus;
pub use remove::remove_supported;
pub use report::{CheckReport, Diagnostic, Severity, SyncReport};

use crate::base::FileId;
use crate::config::SyncConfig;
use crate::edit::Edit;
use crate::error::Result;
use crate::project::{ConfFile, Corpus};
use std::path::PathBuf;
use tracing::info;

/// Where to read and write, and whether to write at all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    pub corpus: PathBuf,
    pub conf: Option<PathBuf>,
    pub dry_run: bool,
}

fn apply(corpus: &mut Corpus, id: FileId, edit: Edit) {
    if let Some(file) = corpus.file_mut(id) {
        file.apply(edit.root);
    }
}

/// Write phase shared by `add` and `remove`
fn finish(
    corpus: &Corpus,
    report: &mut SyncReport,
    options: &SyncOptions,
    config: &SyncConfig,
) -> Result<()> {
    report.changed_files = if options.dry_run {
        corpus
            .changed_files()
            .map(|f| f.path().to_path_buf())
            .collect()
    } else {
        corpus.write_changed()?
    };

    let Some(conf_path) = &options.conf else {
        return Ok(());
    };
    let mut conf = ConfFile::load(conf_path)?;
    for (interface, values) in &report.added {
        conf.update(&config.conf_directive, interface, values, &[]);
    }
    for (interface, values) in &report.removed {
        conf.update(&config.conf_directive, interface, &[], values);
    }
    report.conf_changed = conf.is_changed();
    if report.conf_changed && !options.dry_run {
        conf.save()?;
        info!(path = %conf.path().display(), "rewrote conf file");
    }
    Ok(())
}
