//! The use-counter conf file (`UseCounters.conf`).
//!
//! Lines for interface `I` look like `method I.name`. They form one region:
//! from the first such line to the next blank line or the end of the file.
//! Updating a region rewrites it as a sorted set of lines and leaves the
//! rest of the file alone.

use super::file_loader::{load_file, write_file};
use crate::error::Result;
use std::collections::BTreeSet;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfFile {
    path: PathBuf,
    text: String,
    original: String,
}

impl ConfFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            path: path.into(),
            original: text.clone(),
            text,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(path, load_file(path)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_changed(&self) -> bool {
        self.text != self.original
    }

    /// The lines of `interface`'s region, or `None` if it has none
    pub fn lines(&self, directive: &str, interface: &str) -> Option<BTreeSet<String>> {
        let range = self.region(directive, interface)?;
        Some(region_lines(&self.text[range]))
    }

    /// Add lines for `added` and drop lines for `removed` in `interface`'s
    /// region. A missing region is appended at the end of the file.
    pub fn update(
        &mut self,
        directive: &str,
        interface: &str,
        added: &[String],
        removed: &[String],
    ) {
        let line = |value: &str| format!("{directive} {interface}.{value}");
        let region = self.region(directive, interface);
        let mut lines = region
            .clone()
            .map(|range| region_lines(&self.text[range]))
            .unwrap_or_default();
        let before = lines.clone();
        for value in removed {
            lines.remove(&line(value.as_str()));
        }
        lines.extend(added.iter().map(|value| line(value.as_str())));
        if lines == before {
            return;
        }
        debug!(interface, lines = lines.len(), "updating conf region");

        let joined = lines.into_iter().collect::<Vec<_>>().join("\n");
        match region {
            Some(range) if joined.is_empty() => self.delete_region(range),
            Some(range) => self.text.replace_range(range, &joined),
            None => {
                let kept = self.text.trim_end_matches('\n').len();
                self.text.truncate(kept);
                if !self.text.is_empty() {
                    self.text.push_str("\n\n");
                }
                self.text.push_str(&joined);
                self.text.push('\n');
            }
        }
    }

    /// Write the file back if it changed; returns whether it was written
    pub fn save(&self) -> Result<bool> {
        if !self.is_changed() {
            return Ok(false);
        }
        write_file(&self.path, &self.text)?;
        Ok(true)
    }

    fn region(&self, directive: &str, interface: &str) -> Option<Range<usize>> {
        let prefix = format!("{directive} {interface}.");
        let start = line_starts(&self.text).find(|&i| self.text[i..].starts_with(&prefix))?;
        let end = match self.text[start..].find("\n\n") {
            Some(i) => start + i,
            None => start.max(self.text.trim_end_matches('\n').len()),
        };
        Some(start..end)
    }

    /// Remove a region together with the blank line that separated it
    fn delete_region(&mut self, range: Range<usize>) {
        if self.text[range.end..].starts_with("\n\n") {
            self.text.replace_range(range.start..range.end + 2, "");
        } else {
            let kept = self.text[..range.start].trim_end_matches('\n').len();
            self.text.truncate(kept);
            if kept > 0 {
                self.text.push('\n');
            }
        }
    }
}

fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0).chain(text.match_indices('\n').map(|(i, _)| i + 1))
}

fn region_lines(region: &str) -> BTreeSet<String> {
    region
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
