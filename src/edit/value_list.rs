//! Owned, editable view of an identifier list.
//!
//! Lifting turns the tokens between `(` and `)` into [`ValueToken`]s that
//! carry their own trivia; lowering rebuilds the list with a comma after
//! every entry but the last.

use super::make::{self, GreenElement};
use crate::parser::{AstNode, IdentList, SyntaxKind};
use rowan::{GreenNode, NodeOrToken};
use smol_str::SmolStr;

/// One entry of an identifier list.
///
/// `leading` is the trivia before the identifier, `trailing` the trivia
/// between the identifier and its comma. Tokens are never mutated; the
/// `with_*` constructors return new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueToken {
    leading: String,
    text: SmolStr,
    trailing: String,
}

impl ValueToken {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            leading: String::new(),
            text: text.into(),
            trailing: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn leading(&self) -> &str {
        &self.leading
    }

    pub fn trailing(&self) -> &str {
        &self.trailing
    }

    pub fn with_text(&self, text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_trivia(&self, leading: impl Into<String>) -> Self {
        Self {
            leading: leading.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ValueList {
    entries: Vec<ValueToken>,
    /// Trivia before `)`
    closing: String,
}

impl ValueList {
    /// A fresh list in canonical `(a, b)` layout
    pub(crate) fn from_values<S: AsRef<str>>(values: &[S]) -> Self {
        let mut list = Self::default();
        list.insert(values);
        list
    }

    pub(crate) fn lift(list: &IdentList) -> Result<Self, &'static str> {
        let mut entries: Vec<ValueToken> = Vec::new();
        let mut pending = String::new();
        let mut awaiting_comma = false;
        let mut closed = false;

        let mut children = list.syntax().children_with_tokens();
        match children.next() {
            Some(NodeOrToken::Token(t)) if t.kind() == SyntaxKind::L_PAREN => {}
            _ => return Err("missing '('"),
        }

        for child in children {
            let token = match child {
                NodeOrToken::Token(token) => token,
                NodeOrToken::Node(_) => return Err("unexpected syntax inside the list"),
            };
            if closed {
                return Err("tokens after ')'");
            }
            let kind = token.kind();
            if kind.is_trivia() {
                pending.push_str(token.text());
            } else if kind.is_identifier_like() {
                if awaiting_comma {
                    return Err("missing ',' between values");
                }
                entries.push(ValueToken {
                    leading: std::mem::take(&mut pending),
                    text: token.text().into(),
                    trailing: String::new(),
                });
                awaiting_comma = true;
            } else if kind == SyntaxKind::COMMA {
                let Some(last) = entries.last_mut().filter(|_| awaiting_comma) else {
                    return Err("stray ','");
                };
                last.trailing = std::mem::take(&mut pending);
                awaiting_comma = false;
            } else if kind == SyntaxKind::R_PAREN {
                if !awaiting_comma && !entries.is_empty() {
                    return Err("trailing ','");
                }
                closed = true;
            } else {
                return Err("list holds a non-identifier value");
            }
        }

        if !closed {
            return Err("missing ')'");
        }
        Ok(Self {
            entries,
            closing: pending,
        })
    }

    pub(crate) fn entries(&self) -> &[ValueToken] {
        &self.entries
    }

    pub(crate) fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text().to_string()).collect()
    }

    pub(crate) fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.text() == text)
    }

    /// Adds the values not yet present; returns them sorted
    pub(crate) fn insert<S: AsRef<str>>(&mut self, values: &[S]) -> Vec<String> {
        let mut added: Vec<String> = values
            .iter()
            .map(|v| v.as_ref().to_string())
            .filter(|v| !self.contains(v))
            .collect();
        added.sort();
        added.dedup();
        if added.is_empty() {
            return added;
        }
        self.rearrange(|entries, body| {
            entries.extend(added.iter().map(|v| ValueToken::new(v.as_str()).with_trivia(body)));
        });
        added
    }

    /// Drops the listed values; returns the ones that were present
    pub(crate) fn remove<S: AsRef<str>>(&mut self, values: &[S]) -> Vec<String> {
        let doomed = |text: &str| values.iter().any(|v| v.as_ref() == text);
        let mut removed: Vec<String> = self
            .entries
            .iter()
            .filter(|e| doomed(e.text()))
            .map(|e| e.text().to_string())
            .collect();
        removed.sort();
        removed.dedup();
        if removed.is_empty() {
            return removed;
        }
        self.rearrange(|entries, _| entries.retain(|e| !doomed(e.text())));
        removed
    }

    /// Apply `edit`, then sort and dedupe. The trivia in front of the first
    /// slot belongs to the position, not to whichever value sat there.
    fn rearrange(&mut self, edit: impl FnOnce(&mut Vec<ValueToken>, &str)) {
        let head = self
            .entries
            .first()
            .map(|e| e.leading.clone())
            .unwrap_or_default();
        let body = self.body_trivia(&head);

        if let Some(first) = self.entries.first_mut() {
            *first = first.with_trivia(body.as_str());
        }
        edit(&mut self.entries, &body);

        self.entries.sort_by(|a, b| a.text.cmp(&b.text));
        self.entries.dedup_by(|a, b| a.text == b.text);
        if let Some(first) = self.entries.first_mut() {
            *first = first.with_trivia(head);
        }
    }

    /// Leading trivia for entries after the first
    fn body_trivia(&self, head: &str) -> String {
        match self.entries.get(1) {
            Some(second) => second.leading.clone(),
            None if head.contains('\n') => head.to_string(),
            None => " ".to_string(),
        }
    }

    pub(crate) fn lower(&self) -> GreenNode {
        let mut children: Vec<GreenElement> = vec![make::token(SyntaxKind::L_PAREN, "(")];
        let last = self.entries.len().saturating_sub(1);
        for (i, entry) in self.entries.iter().enumerate() {
            children.extend(make::trivia(&entry.leading));
            children.push(make::ident(&entry.text));
            if i < last {
                children.extend(make::trivia(&entry.trailing));
                children.push(make::token(SyntaxKind::COMMA, ","));
            }
        }
        children.extend(make::trivia(&self.closing));
        children.push(make::token(SyntaxKind::R_PAREN, ")"));
        make::node(SyntaxKind::IDENT_LIST, children)
    }
}
