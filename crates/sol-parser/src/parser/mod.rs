//! Event-based parser for contract and struct declarations.
//!
//! The parser consumes a token stream and produces events (Open/Close/Advance)
//! that are later converted into a rowan green tree, following the approach
//! used by rust-analyzer:
//!
//! 1. Parse functions call `open()` to start a node, `advance()` to consume
//!    tokens, and `close()` to finish a node with its actual kind.
//! 2. Events are collected into a flat `Vec<Event>`.
//! 3. `build_tree()` converts events into a rowan `GreenNode`.
//!
//! Whitespace and comments are skipped by lookahead. `advance()` emits
//! Advance events for the skipped trivia so they still appear in the CST.

pub(crate) mod items;

use sol_common::span::Span;
use sol_common::token::Token;

use crate::error::ParseError;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
enum Event {
    /// Start a new CST node. The kind is TOMBSTONE until `close()` patches it.
    Open { kind: SyntaxKind },
    Close,
    /// Consume the next token.
    Advance,
}

/// Marker for a started but not-yet-closed CST node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MarkOpened {
    index: usize,
}

pub(crate) struct Parser<'src> {
    /// All tokens from the lexer, trivia included, ending with Eof.
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    source: &'src str,
    errors: Vec<ParseError>,
    /// First-error-only: parse functions bail once this is set.
    has_error: bool,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            source,
            errors: Vec::new(),
            has_error: false,
        }
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    pub(crate) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Kind of the Nth significant token ahead, or EOF past the end.
    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|tok| !tok.kind.is_trivia())
            .nth(n)
            .map_or(SyntaxKind::EOF, |tok| SyntaxKind::from(tok.kind))
    }

    pub(crate) fn current_span(&self) -> Span {
        let pos = self.skip_to_significant(self.pos);
        match self.tokens.get(pos) {
            Some(tok) => tok.span,
            None => Span::empty_at(self.source.len() as u32),
        }
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    // ── Node management ────────────────────────────────────────────────

    /// Start a node. Pending trivia goes to the enclosing node so that nodes
    /// begin at their first significant token.
    pub(crate) fn open(&mut self) -> MarkOpened {
        if !self.events.is_empty() {
            self.eat_trivia();
        }
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
        });
        mark
    }

    pub(crate) fn close(&mut self, m: MarkOpened, kind: SyntaxKind) {
        if let Event::Open { kind: slot } = &mut self.events[m.index] {
            *slot = kind;
        }
        self.events.push(Event::Close);
    }

    // ── Token consumption ──────────────────────────────────────────────

    /// Consume the current significant token along with any trivia before it.
    pub(crate) fn advance(&mut self) {
        self.eat_trivia();
        if self.pos < self.tokens.len() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    fn eat_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            self.events.push(Event::Advance);
            self.pos += 1;
        }
    }

    /// Consume the current token wrapped in an ERROR_NODE.
    pub(crate) fn advance_with_error(&mut self, message: &str) {
        let m = self.open();
        self.error(message);
        self.advance();
        self.close(m, SyntaxKind::ERROR_NODE);
    }

    /// Consume `kind` or record `expected <what>`.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(&format!("expected {what}"));
            false
        }
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── Error reporting ────────────────────────────────────────────────

    pub(crate) fn error(&mut self, message: &str) {
        let span = self.current_span();
        self.push_error(ParseError::new(message, span));
    }

    pub(crate) fn error_with_related(&mut self, message: &str, related_span: Span, related_msg: &str) {
        let span = self.current_span();
        self.push_error(ParseError::with_related(message, span, related_msg, related_span));
    }

    fn push_error(&mut self, err: ParseError) {
        if !self.has_error {
            self.errors.push(err);
        }
        self.has_error = true;
    }

    pub(crate) fn has_error(&self) -> bool {
        self.has_error
    }

    fn skip_to_significant(&self, mut pos: usize) -> usize {
        while pos < self.tokens.len() && self.tokens[pos].kind.is_trivia() {
            pos += 1;
        }
        pos
    }

    // ── Tree building ──────────────────────────────────────────────────

    /// Convert collected events into a rowan `GreenNode` and errors.
    pub(crate) fn build_tree(self) -> (rowan::GreenNode, Vec<ParseError>) {
        let mut builder = rowan::GreenNodeBuilder::new();
        let mut tokens = self.tokens.iter();

        for event in &self.events {
            match *event {
                Event::Open { kind } => {
                    if kind != SyntaxKind::TOMBSTONE {
                        builder.start_node(rowan::SyntaxKind(kind as u16));
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    if let Some(token) = tokens.next() {
                        let kind = SyntaxKind::from(token.kind);
                        let text = &self.source[token.span.to_range()];
                        builder.token(rowan::SyntaxKind(kind as u16), text);
                    }
                }
            }
        }

        (builder.finish(), self.errors)
    }
}

// ── Top-level parsing ──────────────────────────────────────────────────

/// Parse a complete source file: a sequence of struct and contract
/// definitions. After the first error the rest of the input is wrapped in
/// an ERROR_NODE so the tree stays lossless.
pub(crate) fn parse_source_file(p: &mut Parser) {
    let root = p.open();

    while !p.at(SyntaxKind::EOF) && !p.has_error() {
        match p.current() {
            SyntaxKind::STRUCT_KW => items::parse_struct_def(p),
            SyntaxKind::CONTRACT_KW => items::parse_contract_def(p),
            SyntaxKind::SEMICOLON => p.advance(),
            _ => p.error("expected `struct` or `contract`"),
        }
    }

    if !p.at(SyntaxKind::EOF) {
        let rest = p.open();
        while !p.at(SyntaxKind::EOF) {
            p.advance();
        }
        p.close(rest, SyntaxKind::ERROR_NODE);
    }
    p.advance(); // EOF

    p.close(root, SyntaxKind::SOURCE_FILE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use sol_lexer::Lexer;

    #[test]
    fn lookahead_skips_trivia() {
        let source = "  // lead\n struct /* mid */ S";
        let p = Parser::new(Lexer::tokenize(source), source);
        assert_eq!(p.current(), SyntaxKind::STRUCT_KW);
        assert_eq!(p.nth(1), SyntaxKind::IDENT);
        assert_eq!(p.nth(2), SyntaxKind::EOF);
        assert_eq!(p.nth(7), SyntaxKind::EOF);
        assert_eq!(p.current_span(), Span::new(11, 17));
    }

    #[test]
    fn only_the_first_error_is_kept() {
        let source = "x";
        let mut p = Parser::new(Lexer::tokenize(source), source);
        p.error("first");
        p.error("second");
        assert!(p.has_error());
        let (_, errors) = p.build_tree();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "first");
    }

    #[test]
    fn tree_is_lossless_after_error() {
        let source = "uint x; struct S {}";
        let mut p = Parser::new(Lexer::tokenize(source), source);
        parse_source_file(&mut p);
        let (green, errors) = p.build_tree();
        assert_eq!(errors.len(), 1);
        assert_eq!(crate::SyntaxNode::new_root(green).to_string(), source);
    }
}
