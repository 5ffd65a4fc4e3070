//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for WebIDL syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! The wrappers are views: they never own text and never re-derive it, the
//! CST stays the single source of truth.

use crate::base::constants::EXPOSED;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn child_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    child_tokens(node).any(|t| t.kind() == kind)
}

fn name_of(node: &SyntaxNode) -> Option<String> {
    node.children().find_map(Name::cast).and_then(|n| n.text())
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn definitions(&self) -> impl Iterator<Item = Definition> + '_ {
        self.0.children().filter_map(Definition::cast)
    }

    pub fn interfaces(&self) -> impl Iterator<Item = Interface> + '_ {
        self.0.children().filter_map(Interface::cast)
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Any top-level WebIDL definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Definition {
    Interface(Interface),
    Dictionary(Dictionary),
    Enum(Enum),
    Typedef(Typedef),
    Callback(Callback),
    Includes(Includes),
}

impl AstNode for Definition {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::INTERFACE
                | SyntaxKind::DICTIONARY
                | SyntaxKind::ENUM
                | SyntaxKind::TYPEDEF
                | SyntaxKind::CALLBACK
                | SyntaxKind::INCLUDES
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::INTERFACE => Some(Self::Interface(Interface(node))),
            SyntaxKind::DICTIONARY => Some(Self::Dictionary(Dictionary(node))),
            SyntaxKind::ENUM => Some(Self::Enum(Enum(node))),
            SyntaxKind::TYPEDEF => Some(Self::Typedef(Typedef(node))),
            SyntaxKind::CALLBACK => Some(Self::Callback(Callback(node))),
            SyntaxKind::INCLUDES => Some(Self::Includes(Includes(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Interface(n) => n.syntax(),
            Self::Dictionary(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
            Self::Typedef(n) => n.syntax(),
            Self::Callback(n) => n.syntax(),
            Self::Includes(n) => n.syntax(),
        }
    }
}

impl Definition {
    /// The leading extended attribute list, if the definition has one
    pub fn ext_attr_list(&self) -> Option<ExtAttrList> {
        self.syntax().children().find_map(ExtAttrList::cast)
    }
}

// ============================================================================
// Interface (also mixins, callback interfaces and namespaces)
// ============================================================================

ast_node!(Interface, INTERFACE);

impl Interface {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    pub fn is_partial(&self) -> bool {
        has_token(&self.0, SyntaxKind::PARTIAL_KW)
    }

    pub fn is_mixin(&self) -> bool {
        has_token(&self.0, SyntaxKind::MIXIN_KW)
    }

    pub fn inherits(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::INHERITANCE)
            .and_then(|n| name_of(&n))
    }

    pub fn ext_attr_list(&self) -> Option<ExtAttrList> {
        self.0.children().find_map(ExtAttrList::cast)
    }

    /// Find an extended attribute on this interface by exact name
    pub fn ext_attr(&self, name: &str) -> Option<ExtAttr> {
        self.ext_attr_list()?.get(name)
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
    }

    /// The globals listed in `[Exposed=...]`; `None` when the attribute is absent
    pub fn exposed_globals(&self) -> Option<Vec<String>> {
        match self.ext_attr(EXPOSED)?.value()? {
            ExtAttrValue::Scalar(token) => Some(vec![token.text().to_string()]),
            ExtAttrValue::IdentList(list) => Some(list.texts()),
            _ => None,
        }
    }

    /// Whether any member is an indexed (`unsigned long`) or named (string) getter
    pub fn has_indexed_or_named_getter(&self) -> bool {
        self.members().any(|m| m.is_indexed_or_named_getter())
    }
}

ast_node!(Dictionary, DICTIONARY);

impl Dictionary {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    pub fn is_partial(&self) -> bool {
        has_token(&self.0, SyntaxKind::PARTIAL_KW)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0
            .children()
            .find_map(Body::cast)
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
    }
}

ast_node!(Enum, ENUM);

impl Enum {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    /// The string values, without quotes
    pub fn values(&self) -> Vec<String> {
        self.0
            .children()
            .find_map(Body::cast)
            .map(|body| {
                child_tokens(body.syntax())
                    .filter(|t| t.kind() == SyntaxKind::STRING)
                    .map(|t| t.text().trim_matches('"').to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

ast_node!(Typedef, TYPEDEF);
ast_node!(Callback, CALLBACK);

impl Callback {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }
}

ast_node!(Includes, INCLUDES);

impl Includes {
    /// The interface receiving the mixin
    pub fn target(&self) -> Option<String> {
        self.0.children().find_map(Name::cast).and_then(|n| n.text())
    }

    pub fn mixin(&self) -> Option<String> {
        self.0
            .children()
            .filter_map(Name::cast)
            .nth(1)
            .and_then(|n| n.text())
    }
}

// ============================================================================
// Names and bodies
// ============================================================================

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> Option<String> {
        self.token().map(|t| t.text().to_string())
    }

    pub fn token(&self) -> Option<SyntaxToken> {
        child_tokens(&self.0).find(|t| t.kind().is_identifier_like())
    }
}

ast_node!(Body, BODY);

impl Body {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(Member, MEMBER);

impl Member {
    /// Member name; `None` for constructors, unnamed special operations and
    /// iterable/maplike declarations
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    pub fn ext_attr_list(&self) -> Option<ExtAttrList> {
        self.0.children().find_map(ExtAttrList::cast)
    }

    pub fn is_getter(&self) -> bool {
        has_token(&self.0, SyntaxKind::GETTER_KW)
    }

    pub fn is_attribute(&self) -> bool {
        has_token(&self.0, SyntaxKind::ATTRIBUTE_KW)
    }

    pub fn is_constructor(&self) -> bool {
        has_token(&self.0, SyntaxKind::CONSTRUCTOR_KW)
    }

    /// Declared type (return type for operations)
    pub fn ty(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    /// A getter whose first parameter is an unsigned integer or a string
    pub fn is_indexed_or_named_getter(&self) -> bool {
        self.is_getter()
            && self
                .arg_list()
                .and_then(|args| args.args().next())
                .and_then(|arg| arg.ty())
                .is_some_and(|ty| ty.is_index_or_string())
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Argument> + '_ {
        self.0.children().filter_map(Argument::cast)
    }
}

ast_node!(Argument, ARG);

impl Argument {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn is_optional(&self) -> bool {
        has_token(&self.0, SyntaxKind::OPTIONAL_KW)
    }

    pub fn is_variadic(&self) -> bool {
        has_token(&self.0, SyntaxKind::ELLIPSIS)
    }
}

ast_node!(TypeRef, TYPE);

const INDEX_AND_STRING_TYPES: &[&str] = &[
    "unsigned short",
    "unsigned long",
    "unsigned long long",
    "DOMString",
    "ByteString",
    "USVString",
    "UTF8String",
];

impl TypeRef {
    /// The type spelled without trivia or type annotations: `unsigned long`,
    /// `sequence<DOMString>?`
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut prev_word = false;
        for token in child_tokens(&self.0).filter(|t| !t.kind().is_trivia()) {
            let word = token.kind().is_identifier_like();
            if word && prev_word {
                out.push(' ');
            }
            out.push_str(token.text());
            prev_word = word;
        }
        out
    }

    pub fn is_nullable(&self) -> bool {
        has_token(&self.0, SyntaxKind::QUESTION)
    }

    pub fn is_index_or_string(&self) -> bool {
        INDEX_AND_STRING_TYPES.contains(&self.text().as_str())
    }
}

// ============================================================================
// Extended attributes
// ============================================================================

ast_node!(ExtAttrList, EXT_ATTR_LIST);

impl ExtAttrList {
    pub fn attrs(&self) -> impl Iterator<Item = ExtAttr> + '_ {
        self.0.children().filter_map(ExtAttr::cast)
    }

    /// Exact name match
    pub fn get(&self, name: &str) -> Option<ExtAttr> {
        self.attrs().find(|a| a.name().as_deref() == Some(name))
    }
}

/// The value shape of an extended attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExtAttrValue {
    /// `Name=Value` where the value is an identifier, string, number or `*`
    Scalar(SyntaxToken),
    /// `Name=(a, b, c)`
    IdentList(IdentList),
    /// `Name(args)`
    ArgList(ArgList),
    /// `Name=Ident(args)`
    NamedArgList(SyntaxToken, ArgList),
}

ast_node!(ExtAttr, EXT_ATTR);

impl ExtAttr {
    pub fn name(&self) -> Option<String> {
        name_of(&self.0)
    }

    /// `None` for bare attributes such as `[SecureContext]`
    pub fn value(&self) -> Option<ExtAttrValue> {
        if let Some(list) = self.0.children().find_map(IdentList::cast) {
            return Some(ExtAttrValue::IdentList(list));
        }
        let args = self.0.children().find_map(ArgList::cast);
        let scalar = child_tokens(&self.0)
            .skip_while(|t| t.kind() != SyntaxKind::EQ)
            .skip(1)
            .find(|t| !t.kind().is_trivia());
        match (scalar, args) {
            (Some(token), Some(args)) => Some(ExtAttrValue::NamedArgList(token, args)),
            (Some(token), None) => Some(ExtAttrValue::Scalar(token)),
            (None, Some(args)) => Some(ExtAttrValue::ArgList(args)),
            (None, None) => None,
        }
    }

    pub fn ident_list(&self) -> Option<IdentList> {
        match self.value()? {
            ExtAttrValue::IdentList(list) => Some(list),
            _ => None,
        }
    }

    /// The comma following this attribute inside its bracket, if any
    pub fn separator(&self) -> Option<SyntaxToken> {
        let mut next = self.0.next_sibling_or_token();
        while let Some(element) = next {
            match element {
                rowan::NodeOrToken::Token(token) if token.kind().is_trivia() => {
                    next = token.next_sibling_or_token();
                }
                rowan::NodeOrToken::Token(token) if token.kind() == SyntaxKind::COMMA => {
                    return Some(token);
                }
                _ => return None,
            }
        }
        None
    }
}

ast_node!(IdentList, IDENT_LIST);

impl IdentList {
    /// The value tokens in source order
    pub fn values(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        child_tokens(&self.0).filter(|t| t.kind().is_identifier_like())
    }

    pub fn texts(&self) -> Vec<String> {
        self.values().map(|t| t.text().to_string()).collect()
    }
}
