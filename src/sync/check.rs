//! Parse and round-trip every file without editing anything.

use super::CheckReport;
use crate::base::FileId;
use crate::error::Result;
use crate::project::{SkippedFile, collect_file_paths, load_file};
use crate::syntax::parse_content;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

enum Outcome {
    Ok,
    Mismatch,
    Failed(SkippedFile),
}

pub fn check_corpus(root: &Path) -> Result<CheckReport> {
    let paths = collect_file_paths(root)?;
    let outcomes: Vec<(PathBuf, Outcome)> = paths
        .par_iter()
        .enumerate()
        .map(|(i, path)| -> Result<(PathBuf, Outcome)> {
            let text = load_file(path)?;
            let outcome = match parse_content(FileId::new(i as u32), path, &text) {
                Ok(file) if file.text() == text => Outcome::Ok,
                Ok(_) => Outcome::Mismatch,
                Err(error) => Outcome::Failed(SkippedFile {
                    path: path.clone(),
                    error,
                }),
            };
            Ok((path.clone(), outcome))
        })
        .collect::<Result<_>>()?;

    let mut report = CheckReport {
        files: outcomes.len(),
        ..CheckReport::default()
    };
    for (path, outcome) in outcomes {
        match outcome {
            Outcome::Ok => {}
            Outcome::Mismatch => {
                warn!(path = %path.display(), "printed tree differs from source");
                report.mismatched.push(path);
            }
            Outcome::Failed(skipped) => {
                warn!(path = %path.display(), error = %skipped.error, "does not parse");
                report.skipped.push(skipped);
            }
        }
    }
    info!(files = report.files, clean = report.is_clean(), "checked corpus");
    Ok(report)
}
