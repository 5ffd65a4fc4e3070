// Parsed source documents
pub mod file;
pub mod parser;

pub use file::IdlFile;
pub use parser::{LoadError, ParseError, load_and_parse, parse_content, validate_extension};

// Re-export Position from base for convenience
pub use crate::base::Position;
