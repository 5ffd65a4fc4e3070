//! Syntax-level parsing interface.
//!
//! Wraps the rowan parser for whole files: a file either parses cleanly into
//! an [`IdlFile`] or is rejected with the first [`ParseError`].

use crate::base::constants::WEBIDL_EXT;
use crate::base::{FileId, LineIndex, Position, TextSize};
use crate::parser::{SyntaxError, parse_webidl};
use crate::syntax::file::IdlFile;
use std::path::{Path, PathBuf};

/// Parse error type for syntax-level errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub reason: String,
    pub position: Position,
    pub offset: TextSize,
}

impl ParseError {
    pub fn from_syntax_error(error: &SyntaxError, line_index: &LineIndex) -> Self {
        let offset = error.range.start();
        Self {
            reason: error.message.clone(),
            position: line_index.position(offset),
            offset,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.reason)
    }
}

impl std::error::Error for ParseError {}

/// Check that `path` names a WebIDL source file
pub fn validate_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(WEBIDL_EXT)
}

/// Parses WebIDL content into a document.
///
/// Any syntax error rejects the whole file; the first one is reported.
pub fn parse_content(id: FileId, path: &Path, content: &str) -> Result<IdlFile, ParseError> {
    let parse = parse_webidl(content);
    if let Some(first) = parse.errors.first() {
        let line_index = LineIndex::new(content);
        return Err(ParseError::from_syntax_error(first, &line_index));
    }
    Ok(IdlFile::new(id, path.to_path_buf(), parse.green))
}

/// Outcome of reading and parsing one file
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(ParseError),
}

/// Loads and parses a WebIDL file.
pub fn load_and_parse(id: FileId, path: &PathBuf) -> Result<IdlFile, LoadError> {
    let content = std::fs::read_to_string(path).map_err(LoadError::Io)?;
    parse_content(id, path, &content).map_err(LoadError::Parse)
}
