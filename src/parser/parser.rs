//! Recursive descent parser for WebIDL
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: every token the lexer
//! produced, trivia and error tokens included, ends up in the tree.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse WebIDL source code into a CST
pub fn parse_webidl(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    parse_tokens(&tokens)
}

/// Parse an already tokenized source into a CST
pub fn parse_tokens(tokens: &[Token<'_>]) -> Parse {
    let mut parser = Parser::new(tokens);
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at_identifier(&self) -> bool {
        !self.at_eof() && self.current_kind().is_identifier_like()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    /// Skip trivia only when the next significant token is `kind`, so trailing
    /// trivia stays outside the node being built.
    fn at_next(&mut self, kind: SyntaxKind) -> bool {
        if self.nth(0) == kind {
            self.skip_trivia();
            true
        } else {
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                TextRange::empty(end)
            });
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// Bump tokens until one of `stops` at bracket depth zero.
    fn bump_balanced_until(&mut self, stops: &[SyntaxKind]) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            if depth == 0 && stops.contains(&kind) {
                break;
            }
            match kind {
                SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
                SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                    if depth == 0 {
                        // Unbalanced closer belongs to an enclosing rule
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn parse_name(&mut self) {
        if self.at_identifier() {
            self.start_node(SyntaxKind::NAME);
            self.bump();
            self.finish_node();
        } else {
            self.error("expected name");
        }
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// SourceFile = Definition*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);

        while !self.at_eof() {
            let pos_before = self.pos;
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            self.parse_definition();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    /// Definition = ExtAttrList? (Interface | Dictionary | Enum | Typedef | Callback | Includes)
    fn parse_definition(&mut self) {
        let checkpoint = self.builder.checkpoint();

        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_ext_attr_list();
            self.skip_trivia();
        }

        let kind = match (self.nth(0), self.nth(1)) {
            (SyntaxKind::PARTIAL_KW, SyntaxKind::INTERFACE_KW | SyntaxKind::NAMESPACE_KW)
            | (SyntaxKind::INTERFACE_KW | SyntaxKind::NAMESPACE_KW, _)
            | (SyntaxKind::CALLBACK_KW, SyntaxKind::INTERFACE_KW) => SyntaxKind::INTERFACE,
            (SyntaxKind::PARTIAL_KW, SyntaxKind::DICTIONARY_KW)
            | (SyntaxKind::DICTIONARY_KW, _) => SyntaxKind::DICTIONARY,
            (SyntaxKind::ENUM_KW, _) => SyntaxKind::ENUM,
            (SyntaxKind::TYPEDEF_KW, _) => SyntaxKind::TYPEDEF,
            (SyntaxKind::CALLBACK_KW, _) => SyntaxKind::CALLBACK,
            (first, SyntaxKind::INCLUDES_KW) if first.is_identifier_like() => SyntaxKind::INCLUDES,
            _ => {
                self.builder.start_node_at(checkpoint, SyntaxKind::ERROR.into());
                self.error(format!(
                    "unexpected token at top level: {:?}",
                    self.current_kind()
                ));
                self.bump_balanced_until(&[SyntaxKind::SEMICOLON]);
                if !self.eat(SyntaxKind::SEMICOLON) && !self.at_eof() {
                    // Stray closer; consume it so the caller makes progress
                    self.bump();
                }
                self.finish_node();
                return;
            }
        };

        self.builder.start_node_at(checkpoint, kind.into());
        match kind {
            SyntaxKind::INTERFACE | SyntaxKind::DICTIONARY => self.parse_interface_like(),
            SyntaxKind::ENUM => self.parse_enum(),
            SyntaxKind::CALLBACK => self.parse_callback(),
            SyntaxKind::INCLUDES => self.parse_includes(),
            _ => self.parse_typedef(),
        }
        self.finish_node();
    }

    /// InterfaceLike = 'partial'? 'callback'? ('interface' 'mixin'? | 'namespace' | 'dictionary')
    ///                 Name Inheritance? Body ';'
    fn parse_interface_like(&mut self) {
        while self.at_any(&[
            SyntaxKind::PARTIAL_KW,
            SyntaxKind::CALLBACK_KW,
            SyntaxKind::INTERFACE_KW,
            SyntaxKind::MIXIN_KW,
            SyntaxKind::NAMESPACE_KW,
            SyntaxKind::DICTIONARY_KW,
        ]) {
            self.bump();
            self.skip_trivia();
        }

        self.parse_name();

        if self.at_next(SyntaxKind::COLON) {
            self.start_node(SyntaxKind::INHERITANCE);
            self.bump();
            self.skip_trivia();
            self.parse_name();
            self.finish_node();
        }

        self.skip_trivia();
        self.parse_body();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
    }

    /// Body = '{' Member* '}'
    fn parse_body(&mut self) {
        if !self.at(SyntaxKind::L_BRACE) {
            self.error_recover("expected '{'", &[SyntaxKind::SEMICOLON]);
            return;
        }

        self.start_node(SyntaxKind::BODY);
        self.bump();

        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACE) {
                break;
            }
            let pos_before = self.pos;
            self.parse_member();
            if self.pos == pos_before {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Member = ExtAttrList? Qualifier* (Const | Attribute | Constructor | Operation) ';'
    fn parse_member(&mut self) {
        self.start_node(SyntaxKind::MEMBER);

        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_ext_attr_list();
            self.skip_trivia();
        }

        while self.at_any(&[
            SyntaxKind::STATIC_KW,
            SyntaxKind::STRINGIFIER_KW,
            SyntaxKind::READONLY_KW,
            SyntaxKind::INHERIT_KW,
            SyntaxKind::REQUIRED_KW,
            SyntaxKind::GETTER_KW,
            SyntaxKind::SETTER_KW,
            SyntaxKind::DELETER_KW,
        ]) {
            self.bump();
            self.skip_trivia();
        }

        match self.current_kind() {
            SyntaxKind::SEMICOLON => {}
            SyntaxKind::CONST_KW | SyntaxKind::ATTRIBUTE_KW => {
                self.bump();
                self.skip_trivia();
                self.parse_type();
                self.skip_trivia();
                self.parse_name();
            }
            SyntaxKind::CONSTRUCTOR_KW => {
                self.bump();
                if self.at_next(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
            }
            _ => {
                self.parse_type();
                if self.nth(0).is_identifier_like() {
                    self.skip_trivia();
                    self.parse_name();
                }
                if self.at_next(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
            }
        }

        // Default values and anything the member grammar does not model
        self.bump_balanced_until(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]);
        if !self.eat(SyntaxKind::SEMICOLON) {
            self.error("expected ';' after member");
        }

        self.finish_node();
    }

    /// Type = ExtAttrList? ( '(' ... ')' | ('unsigned' | 'unrestricted')* Ident 'long'? ('<' ... '>')? ) '?'?
    fn parse_type(&mut self) {
        self.start_node(SyntaxKind::TYPE);

        // Type annotations such as [LegacyNullToEmptyString] or [Clamp]
        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_ext_attr_list();
            self.skip_trivia();
        }

        if self.at(SyntaxKind::L_PAREN) {
            // Union type
            self.bump();
            self.bump_balanced_until(&[SyntaxKind::R_PAREN]);
            self.expect(SyntaxKind::R_PAREN);
        } else {
            while self.at_any(&[SyntaxKind::UNSIGNED_KW, SyntaxKind::UNRESTRICTED_KW]) {
                self.bump();
                self.skip_trivia();
            }

            if self.at_identifier() {
                let base = self.current_kind();
                self.bump();
                if base == SyntaxKind::LONG_KW && self.at_next(SyntaxKind::LONG_KW) {
                    self.bump();
                }
            } else {
                self.error("expected type");
            }

            if self.at_next(SyntaxKind::LT) {
                self.bump();
                let mut depth = 1usize;
                while !self.at_eof() && depth > 0 {
                    match self.current_kind() {
                        SyntaxKind::LT => depth += 1,
                        SyntaxKind::GT => depth -= 1,
                        SyntaxKind::SEMICOLON | SyntaxKind::R_BRACE => break,
                        _ => {}
                    }
                    self.bump();
                }
            }
        }

        if self.at_next(SyntaxKind::QUESTION) {
            self.bump();
        }

        self.finish_node();
    }

    /// ArgList = '(' (Arg (',' Arg)*)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.bump(); // (

        loop {
            self.skip_trivia();
            if self.at_eof()
                || self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE])
            {
                break;
            }
            let pos_before = self.pos;
            self.parse_arg();
            self.skip_trivia();
            if !self.eat(SyntaxKind::COMMA) && self.pos == pos_before {
                self.error_recover(
                    "expected argument",
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON],
                );
            }
        }

        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Arg = ExtAttrList? 'optional'? Type '...'? Name ('=' Default)?
    fn parse_arg(&mut self) {
        self.start_node(SyntaxKind::ARG);

        if self.at(SyntaxKind::L_BRACKET) {
            self.parse_ext_attr_list();
            self.skip_trivia();
        }
        if self.eat(SyntaxKind::OPTIONAL_KW) {
            self.skip_trivia();
        }

        self.parse_type();
        if self.at_next(SyntaxKind::ELLIPSIS) {
            self.bump();
        }
        if self.nth(0).is_identifier_like() {
            self.skip_trivia();
            self.parse_name();
        }

        self.bump_balanced_until(&[
            SyntaxKind::COMMA,
            SyntaxKind::R_PAREN,
            SyntaxKind::SEMICOLON,
        ]);
        self.finish_node();
    }

    /// ExtAttrList = '[' (ExtAttr (',' ExtAttr)*)? ']'
    fn parse_ext_attr_list(&mut self) {
        self.start_node(SyntaxKind::EXT_ATTR_LIST);
        self.bump(); // [

        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_BRACKET) {
                break;
            }
            if self.eat(SyntaxKind::COMMA) {
                // Stray separator; tolerated so edited files re-parse
                continue;
            }
            if self.at_identifier() {
                self.parse_ext_attr();
            } else {
                self.error_recover(
                    "expected extended attribute",
                    &[SyntaxKind::COMMA, SyntaxKind::R_BRACKET, SyntaxKind::SEMICOLON],
                );
                if self.at(SyntaxKind::SEMICOLON) {
                    break;
                }
            }
        }

        self.expect(SyntaxKind::R_BRACKET);
        self.finish_node();
    }

    /// ExtAttr = Name ( '(' Args ')' | '=' ( IdentList | Scalar ( '(' Args ')' )? ) )?
    fn parse_ext_attr(&mut self) {
        self.start_node(SyntaxKind::EXT_ATTR);
        self.parse_name();

        if self.at_next(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        } else if self.at_next(SyntaxKind::EQ) {
            self.bump();
            self.skip_trivia();
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_ident_list();
            } else if self.at_identifier()
                || self.at_any(&[
                    SyntaxKind::STRING,
                    SyntaxKind::INTEGER,
                    SyntaxKind::DECIMAL,
                    SyntaxKind::STAR,
                ])
            {
                self.bump();
                if self.at_next(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
            } else {
                self.error("expected extended attribute value");
            }
        }

        self.finish_node();
    }

    /// IdentList = '(' (Ident (',' Ident)*)? ')'
    fn parse_ident_list(&mut self) {
        self.start_node(SyntaxKind::IDENT_LIST);
        self.bump(); // (

        loop {
            self.skip_trivia();
            if self.at_eof() || self.at(SyntaxKind::R_PAREN) {
                break;
            }
            if self.at_identifier() || self.at_any(&[SyntaxKind::STRING, SyntaxKind::COMMA]) {
                self.bump();
            } else {
                self.error_recover(
                    "expected identifier",
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::R_BRACKET],
                );
                if self.at(SyntaxKind::R_BRACKET) {
                    break;
                }
            }
        }

        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Enum = 'enum' Name '{' Values '}' ';'
    fn parse_enum(&mut self) {
        self.bump(); // enum
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        if self.at(SyntaxKind::L_BRACE) {
            self.start_node(SyntaxKind::BODY);
            self.bump();
            self.bump_balanced_until(&[SyntaxKind::R_BRACE]);
            self.expect(SyntaxKind::R_BRACE);
            self.finish_node();
        } else {
            self.error("expected '{'");
        }
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
    }

    /// Callback = 'callback' Name '=' Type '(' Args ')' ';'
    fn parse_callback(&mut self) {
        self.bump(); // callback
        self.skip_trivia();
        self.parse_name();
        self.bump_balanced_until(&[SyntaxKind::SEMICOLON]);
        self.expect(SyntaxKind::SEMICOLON);
    }

    /// Includes = Name 'includes' Name ';'
    fn parse_includes(&mut self) {
        self.parse_name();
        self.skip_trivia();
        self.expect(SyntaxKind::INCLUDES_KW);
        self.skip_trivia();
        self.parse_name();
        self.skip_trivia();
        self.expect(SyntaxKind::SEMICOLON);
    }

    /// Typedef = 'typedef' ... ';'
    fn parse_typedef(&mut self) {
        self.bump(); // typedef
        self.bump_balanced_until(&[SyntaxKind::SEMICOLON]);
        self.expect(SyntaxKind::SEMICOLON);
    }
}
