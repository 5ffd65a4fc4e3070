//! Green tree constructors for synthesized syntax

use crate::parser::{SyntaxKind, single_identifier, tokenize};
use rowan::{GreenNode, GreenToken, NodeOrToken};

pub(crate) type GreenElement = NodeOrToken<GreenNode, GreenToken>;

pub(crate) fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

pub(crate) fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

/// Trivia text as whitespace/comment tokens
pub(crate) fn trivia(text: &str) -> Vec<GreenElement> {
    tokenize(text)
        .into_iter()
        .map(|t| token(t.kind, t.text))
        .collect()
}

/// An identifier token, keyword kinds kept so the tree matches a fresh parse
pub(crate) fn ident(text: &str) -> GreenElement {
    let kind = single_identifier(text).unwrap_or(SyntaxKind::IDENT);
    token(kind, text)
}

/// `Name=(...)` around an already built identifier list
pub(crate) fn ext_attr(name: &str, list: GreenNode) -> GreenNode {
    node(
        SyntaxKind::EXT_ATTR,
        vec![
            NodeOrToken::Node(node(SyntaxKind::NAME, vec![ident(name)])),
            token(SyntaxKind::EQ, "="),
            NodeOrToken::Node(list),
        ],
    )
}

/// `[attr]`
pub(crate) fn ext_attr_list(attr: GreenNode) -> GreenNode {
    node(
        SyntaxKind::EXT_ATTR_LIST,
        vec![
            token(SyntaxKind::L_BRACKET, "["),
            NodeOrToken::Node(attr),
            token(SyntaxKind::R_BRACKET, "]"),
        ],
    )
}
