//! # idl-counters
//!
//! Lossless WebIDL editing plus the tooling that keeps an `InstrumentedProps`
//! annotation in sync with MDN browser-compat-data.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! sync      → add / remove / check runs, reports, diagnostics
//!   ↓
//! project   → Corpus loading, declaration index, conf file
//!   ↓
//! edit      → Annotation list editor (insert, remove, create)
//!   ↓
//! compat    → Compat data model and engine support predicates
//!   ↓
//! syntax    → IdlFile, ParseError with positions, file loading
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (FileId, LineIndex, TextRange, constants)
//! ```
//!
//! `config` and `error` sit beside the stack and are used by every layer
//! above `syntax`.

// ============================================================================
// MODULES (dependency order: base → parser → syntax → compat → edit → project → sync)
// ============================================================================

/// Foundation types: FileId, LineIndex, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax: parsed files and positioned parse errors
pub mod syntax;

/// Browser compatibility data
pub mod compat;

/// Annotation list editing over the lossless tree
pub mod edit;

/// Corpus and conf file management
pub mod project;

/// Add, remove, and check runs
pub mod sync;

pub mod config;
pub mod error;

// Re-export foundation types
pub use base::{FileId, LineIndex, Position, TextRange, TextSize};
pub use config::SyncConfig;
pub use error::{Error, Result};
pub use sync::{SyncOptions, SyncReport};

/// Initialize the tracing subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_tracing(verbosity: u8) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("idl_counters={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
