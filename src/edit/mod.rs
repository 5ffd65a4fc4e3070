//! Annotation list editor.
//!
//! Operates on one interface declaration and one extended attribute whose
//! value is an identifier list, e.g. `InstrumentedProps=(a, b, c)`.
//!
//! Every operation leaves the tree untouched and returns an [`Edit`] holding
//! the new root green node. Only the identifier list (or, for
//! [`create_annotation`], the bracket) differs from the input tree, so
//! printing the new root changes nothing outside that span.
//!
//! Lists are kept sorted by byte-wise string order and free of duplicates.
//! Removing every value leaves an empty `Name=()` in place.

mod make;
mod value_list;

pub use value_list::ValueToken;

use crate::parser::{
    AstNode, ExtAttr, ExtAttrList, IdentList, Interface, SyntaxKind, single_identifier,
};
use rowan::{GreenNode, NodeOrToken};
use thiserror::Error;
use tracing::debug;
use value_list::ValueList;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("extended attribute `{name}` does not hold an identifier list: {reason}")]
    Shape { name: String, reason: &'static str },
    #[error("`{value}` is not a single identifier")]
    InvalidValue { value: String },
    #[error("`{name}` is already present on this declaration")]
    AlreadyPresent { name: String },
}

/// Result of a successful edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Root of the rewritten tree
    pub root: GreenNode,
    /// Values actually inserted or removed, sorted
    pub values: Vec<String>,
}

/// Exact-name lookup of an extended attribute on `decl`
pub fn find_annotation(decl: &Interface, name: &str) -> Option<ExtAttr> {
    decl.ext_attr(name)
}

/// The annotation's values in source order
pub fn list_values(annotation: &ExtAttr) -> Result<Vec<String>, EditError> {
    Ok(lift(annotation)?.1.texts())
}

/// The annotation's values with their trivia
pub fn value_tokens(annotation: &ExtAttr) -> Result<Vec<ValueToken>, EditError> {
    Ok(lift(annotation)?.1.entries().to_vec())
}

/// Insert `values` into the annotation's list.
///
/// Returns `None` when every value is already present.
pub fn insert_values<S: AsRef<str>>(
    annotation: &ExtAttr,
    values: &[S],
) -> Result<Option<Edit>, EditError> {
    validate(values)?;
    let (node, mut list) = lift(annotation)?;
    let added = list.insert(values);
    if added.is_empty() {
        return Ok(None);
    }
    debug!(?added, "inserting into identifier list");
    Ok(Some(Edit {
        root: node.syntax().replace_with(list.lower()),
        values: added,
    }))
}

/// Remove `values` from the annotation's list.
///
/// Returns `None` when none of them is present.
pub fn remove_values<S: AsRef<str>>(
    annotation: &ExtAttr,
    values: &[S],
) -> Result<Option<Edit>, EditError> {
    let (node, mut list) = lift(annotation)?;
    let removed = list.remove(values);
    if removed.is_empty() {
        return Ok(None);
    }
    debug!(?removed, "removing from identifier list");
    Ok(Some(Edit {
        root: node.syntax().replace_with(list.lower()),
        values: removed,
    }))
}

/// Add a new `name=(values)` attribute to `decl`.
///
/// Appends to the existing bracket, or creates `[name=(values)]` on its own
/// line in front of the declaration.
pub fn create_annotation<S: AsRef<str>>(
    decl: &Interface,
    name: &str,
    values: &[S],
) -> Result<Edit, EditError> {
    validate(&[name])?;
    validate(values)?;
    if find_annotation(decl, name).is_some() {
        return Err(EditError::AlreadyPresent {
            name: name.to_string(),
        });
    }

    let list = ValueList::from_values(values);
    let attr = make::ext_attr(name, list.lower());
    let root = match decl.ext_attr_list() {
        Some(bracket) => append_to_bracket(&bracket, attr),
        None => {
            let bracket = make::ext_attr_list(attr);
            let mut elements = vec![NodeOrToken::Node(bracket)];
            elements.extend(make::trivia("\n"));
            let green = decl.syntax().green().splice_children(0..0, elements);
            decl.syntax().replace_with(green)
        }
    };
    debug!(name, values = ?list.texts(), "created annotation");
    Ok(Edit {
        root,
        values: list.texts(),
    })
}

fn lift(annotation: &ExtAttr) -> Result<(IdentList, ValueList), EditError> {
    let shape = |reason| EditError::Shape {
        name: annotation.name().unwrap_or_default(),
        reason,
    };
    let node = annotation
        .ident_list()
        .ok_or_else(|| shape("value is not a parenthesized list"))?;
    let list = ValueList::lift(&node).map_err(shape)?;
    Ok((node, list))
}

fn validate<S: AsRef<str>>(values: &[S]) -> Result<(), EditError> {
    match values
        .iter()
        .find(|v| single_identifier(v.as_ref()).is_none())
    {
        Some(bad) => Err(EditError::InvalidValue {
            value: bad.as_ref().to_string(),
        }),
        None => Ok(()),
    }
}

/// Insert `attr` after the last attribute of `bracket`, before any trivia
/// preceding `]`. A trailing comma already in the bracket is reused.
fn append_to_bracket(bracket: &ExtAttrList, attr: GreenNode) -> GreenNode {
    let children: Vec<_> = bracket.syntax().children_with_tokens().collect();
    let close = children
        .iter()
        .rposition(|c| c.kind() == SyntaxKind::R_BRACKET)
        .unwrap_or(children.len());
    let mut at = close;
    while at > 1 && children[at - 1].kind().is_trivia() {
        at -= 1;
    }

    let separator = separator_trivia(bracket);
    let mut elements = Vec::new();
    match at.checked_sub(1).and_then(|i| children.get(i)).map(|c| c.kind()) {
        Some(SyntaxKind::L_BRACKET) => {}
        Some(SyntaxKind::COMMA) => elements.extend(make::trivia(&separator)),
        _ => {
            elements.push(make::token(SyntaxKind::COMMA, ","));
            elements.extend(make::trivia(&separator));
        }
    }
    elements.push(NodeOrToken::Node(attr));

    let green = bracket.syntax().green().splice_children(at..at, elements);
    bracket.syntax().replace_with(green)
}

/// Whitespace the bracket uses after its first comma, or a single space
fn separator_trivia(bracket: &ExtAttrList) -> String {
    let after_comma: Vec<_> = bracket
        .syntax()
        .children_with_tokens()
        .skip_while(|c| c.kind() != SyntaxKind::COMMA)
        .skip(1)
        .take_while(|c| c.kind().is_trivia())
        .collect();
    if after_comma.is_empty() && bracket.attrs().count() < 2 {
        return " ".to_string();
    }
    if after_comma.iter().all(|c| c.kind() == SyntaxKind::WHITESPACE) {
        after_comma
            .iter()
            .filter_map(|c| c.as_token().map(|t| t.text().to_string()))
            .collect()
    } else {
        " ".to_string()
    }
}

#[cfg(test)]
mod tests;
