//! Logos-based lexer for WebIDL
//!
//! Fast tokenization using the logos crate. Lexing is total: bytes that do not
//! form a known token come back as `ERROR` tokens, so the concatenated token
//! texts always reproduce the input.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Returns the kind of `text` if it lexes as exactly one identifier or keyword.
pub fn single_identifier(text: &str) -> Option<SyntaxKind> {
    let mut lexer = Lexer::new(text);
    let token = lexer.next()?;
    if lexer.next().is_some() || !token.kind.is_identifier_like() {
        return None;
    }
    Some(token.kind)
}

/// Extends a `/*` match through the closing `*/`. An unterminated comment
/// swallows the rest of the input as a single `ERROR` token.
fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[_-]?[A-Za-z][0-9A-Z_a-z-]*")]
    Ident,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"-?0[xX][0-9A-Fa-f]+")]
    HexInteger,

    #[regex(r"-?([0-9]+\.[0-9]*|[0-9]*\.[0-9]+)([Ee][+-]?[0-9]+)?")]
    Decimal,

    #[regex(r#""[^"]*""#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("...")]
    Ellipsis,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("-")]
    Minus,

    // =========================================================================
    // KEYWORDS (alphabetical, longest match wins in logos)
    // =========================================================================
    #[token("attribute")]
    AttributeKw,
    #[token("callback")]
    CallbackKw,
    #[token("const")]
    ConstKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("deleter")]
    DeleterKw,
    #[token("dictionary")]
    DictionaryKw,
    #[token("enum")]
    EnumKw,
    #[token("getter")]
    GetterKw,
    #[token("includes")]
    IncludesKw,
    #[token("inherit")]
    InheritKw,
    #[token("interface")]
    InterfaceKw,
    #[token("long")]
    LongKw,
    #[token("mixin")]
    MixinKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("optional")]
    OptionalKw,
    #[token("partial")]
    PartialKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("required")]
    RequiredKw,
    #[token("setter")]
    SetterKw,
    #[token("short")]
    ShortKw,
    #[token("static")]
    StaticKw,
    #[token("stringifier")]
    StringifierKw,
    #[token("typedef")]
    TypedefKw,
    #[token("unrestricted")]
    UnrestrictedKw,
    #[token("unsigned")]
    UnsignedKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Integer | HexInteger => SyntaxKind::INTEGER,
            Decimal => SyntaxKind::DECIMAL,
            String => SyntaxKind::STRING,

            // Punctuation
            Ellipsis => SyntaxKind::ELLIPSIS,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Question => SyntaxKind::QUESTION,
            Dot => SyntaxKind::DOT,
            Star => SyntaxKind::STAR,
            Minus => SyntaxKind::MINUS,

            // Keywords
            AttributeKw => SyntaxKind::ATTRIBUTE_KW,
            CallbackKw => SyntaxKind::CALLBACK_KW,
            ConstKw => SyntaxKind::CONST_KW,
            ConstructorKw => SyntaxKind::CONSTRUCTOR_KW,
            DeleterKw => SyntaxKind::DELETER_KW,
            DictionaryKw => SyntaxKind::DICTIONARY_KW,
            EnumKw => SyntaxKind::ENUM_KW,
            GetterKw => SyntaxKind::GETTER_KW,
            IncludesKw => SyntaxKind::INCLUDES_KW,
            InheritKw => SyntaxKind::INHERIT_KW,
            InterfaceKw => SyntaxKind::INTERFACE_KW,
            LongKw => SyntaxKind::LONG_KW,
            MixinKw => SyntaxKind::MIXIN_KW,
            NamespaceKw => SyntaxKind::NAMESPACE_KW,
            OptionalKw => SyntaxKind::OPTIONAL_KW,
            PartialKw => SyntaxKind::PARTIAL_KW,
            ReadonlyKw => SyntaxKind::READONLY_KW,
            RequiredKw => SyntaxKind::REQUIRED_KW,
            SetterKw => SyntaxKind::SETTER_KW,
            ShortKw => SyntaxKind::SHORT_KW,
            StaticKw => SyntaxKind::STATIC_KW,
            StringifierKw => SyntaxKind::STRINGIFIER_KW,
            TypedefKw => SyntaxKind::TYPEDEF_KW,
            UnrestrictedKw => SyntaxKind::UNRESTRICTED_KW,
            UnsignedKw => SyntaxKind::UNSIGNED_KW,
        }
    }
}
