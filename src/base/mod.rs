//! Foundation types for the idl-counters toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`FileSet`] - Interned file identifiers
//! - [`LineIndex`], [`Position`] - Byte offset to line/column conversion
//! - Domain constants (file extension, annotation names)
//!
//! This module has NO dependencies on other crate modules.

pub mod constants;
mod file_id;
mod position;

pub use file_id::{FileId, FileSet};
pub use position::{LineIndex, Position};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
