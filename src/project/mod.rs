//! Corpus loading and the companion conf file.

pub mod conf_file;
pub mod corpus;
pub mod file_loader;

pub use conf_file::ConfFile;
pub use corpus::{Corpus, DeclarationIndex, MemberIndex, SkippedFile};
pub use file_loader::{collect_file_paths, load_file, write_file};
