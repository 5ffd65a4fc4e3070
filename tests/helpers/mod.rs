#![allow(dead_code)]

pub mod source_fixtures;

use idl_counters::parser::{AstNode, Interface, SourceFile, SyntaxNode, parse_webidl};

/// Parse `source`, asserting it has no syntax errors
pub fn source_file(source: &str) -> SourceFile {
    let parsed = parse_webidl(source);
    assert!(parsed.ok(), "errors: {:?}", parsed.errors);
    SourceFile::cast(parsed.syntax()).expect("root is a source file")
}

/// The first non-partial interface called `name`
pub fn interface(source: &str, name: &str) -> Interface {
    source_file(source)
        .interfaces()
        .find(|i| !i.is_partial() && i.name().as_deref() == Some(name))
        .unwrap_or_else(|| panic!("no interface {name}"))
}

pub fn print(root: rowan::GreenNode) -> String {
    SyntaxNode::new_root(root).to_string()
}
