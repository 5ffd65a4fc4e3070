//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the WebIDL syntax tree.

/// All syntax kinds (tokens and nodes) in WebIDL
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (interfaces, members, extended attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42, 0x2A, -1
    DECIMAL, // 3.14
    STRING,  // "hello"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    EQ,        // =
    LT,        // <
    GT,        // >
    QUESTION,  // ?
    DOT,       // .
    ELLIPSIS,  // ...
    STAR,      // *
    MINUS,     // -

    // =========================================================================
    // KEYWORDS - WebIDL
    // =========================================================================
    // Definition keywords
    INTERFACE_KW,
    PARTIAL_KW,
    MIXIN_KW,
    CALLBACK_KW,
    DICTIONARY_KW,
    NAMESPACE_KW,
    ENUM_KW,
    TYPEDEF_KW,
    INCLUDES_KW,

    // Member qualifiers
    GETTER_KW,
    SETTER_KW,
    DELETER_KW,
    STATIC_KW,
    STRINGIFIER_KW,
    READONLY_KW,
    INHERIT_KW,
    REQUIRED_KW,

    // Member kinds
    ATTRIBUTE_KW,
    CONST_KW,
    CONSTRUCTOR_KW,
    OPTIONAL_KW,

    // Type prefixes
    UNSIGNED_KW,
    UNRESTRICTED_KW,
    LONG_KW,
    SHORT_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,

    // Definitions
    INTERFACE,
    DICTIONARY,
    ENUM,
    TYPEDEF,
    CALLBACK,
    INCLUDES,

    // Definition parts
    NAME,
    INHERITANCE,
    BODY,
    MEMBER,

    // Extended attributes: [A, B=c, D=(e, f), G(h), I=J(k)]
    EXT_ATTR_LIST,
    EXT_ATTR,
    IDENT_LIST,

    // Operations
    ARG_LIST,
    ARG,
    TYPE,

    // Error recovery
    ERROR,

    // Must be last - used for bounds checking
    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::INTERFACE_KW as u16) && (self as u16) <= (Self::SHORT_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::MINUS as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::IDENT | Self::INTEGER | Self::DECIMAL | Self::STRING)
    }

    /// Identifiers and keywords. WebIDL lets keywords appear as argument
    /// names and extended attribute values, so name positions accept both.
    pub fn is_identifier_like(self) -> bool {
        self == Self::IDENT || self.is_keyword()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WebIdlLanguage {}

impl rowan::Language for WebIdlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<WebIdlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<WebIdlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<WebIdlLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<WebIdlLanguage>;
