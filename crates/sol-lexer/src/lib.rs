// Solidity lexer -- tokenizer for contract declarations.

mod cursor;

use cursor::Cursor;
use sol_common::error::{LexError, LexErrorKind};
use sol_common::names::RESERVED_MARKER;
use sol_common::span::Span;
use sol_common::token::{keyword_from_str, Token, TokenKind};

/// Which identifiers the lexer accepts.
///
/// `Builtin` is only used for internally authored declarations; it admits
/// the reserved `@Name` identifiers that user source can never produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexMode {
    #[default]
    User,
    Builtin,
}

/// Converts source text into a stream of tokens.
///
/// The stream is lossless: whitespace and comments are emitted as trivia
/// tokens, so concatenating token texts reproduces the input.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    mode: LexMode,
    emitted_eof: bool,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, mode: LexMode) -> Self {
        Self {
            cursor: Cursor::new(source),
            mode,
            emitted_eof: false,
            errors: Vec::new(),
        }
    }

    /// Tokenize user source. The result ends with an `Eof` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source, LexMode::User).collect()
    }

    /// Tokenize in the given mode, returning the errors found along the way.
    pub fn tokenize_with_errors(source: &str, mode: LexMode) -> (Vec<Token>, Vec<LexError>) {
        let mut lexer = Lexer::new(source, mode);
        let tokens = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    fn next_token(&mut self) -> Token {
        let start = self.cursor.pos();

        let Some(c) = self.cursor.peek() else {
            return Token::new(TokenKind::Eof, start, start);
        };

        match c {
            c if c.is_whitespace() => {
                self.cursor.eat_while(char::is_whitespace);
                self.token(TokenKind::Whitespace, start)
            }

            '(' => self.single_char_token(TokenKind::LParen, start),
            ')' => self.single_char_token(TokenKind::RParen, start),
            '[' => self.single_char_token(TokenKind::LBracket, start),
            ']' => self.single_char_token(TokenKind::RBracket, start),
            '{' => self.single_char_token(TokenKind::LBrace, start),
            '}' => self.single_char_token(TokenKind::RBrace, start),
            ',' => self.single_char_token(TokenKind::Comma, start),
            '.' => self.single_char_token(TokenKind::Dot, start),
            ';' => self.single_char_token(TokenKind::Semicolon, start),

            '/' if self.cursor.peek_next() == Some('/') => self.lex_line_comment(start),
            '/' if self.cursor.peek_next() == Some('*') => self.lex_block_comment(start),

            // `=` on its own is an initializer; `==`, `=>` etc. only occur
            // inside bodies and are lexed as operator runs.
            '=' if !matches!(self.cursor.peek_next(), Some('=' | '>')) => {
                self.single_char_token(TokenKind::Eq, start)
            }
            '+' | '-' | '*' | '/' | '%' | '!' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
            | ':' | '=' => {
                self.cursor.eat_while(is_operator_char);
                self.token(TokenKind::Punct, start)
            }

            '0'..='9' => self.lex_number(start),

            '"' | '\'' => self.lex_string(c, start),

            RESERVED_MARKER => self.lex_reserved_ident(start),

            c if is_ident_start(c) => self.lex_ident(start),

            _ => {
                self.cursor.advance();
                let end = self.cursor.pos();
                self.errors.push(LexError::new(
                    LexErrorKind::UnexpectedCharacter(c),
                    Span::new(start, end),
                ));
                Token::new(TokenKind::Error, start, end)
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn token(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, start, self.cursor.pos())
    }

    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// `// ...` or `/// ...` up to (not including) the newline.
    fn lex_line_comment(&mut self, start: u32) -> Token {
        let kind = if self.cursor.starts_with("///") {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.cursor.eat_while(|c| c != '\n');
        self.token(kind, start)
    }

    /// `/* ... */` or `/** ... */`. Block comments do not nest.
    fn lex_block_comment(&mut self, start: u32) -> Token {
        let kind = if self.cursor.starts_with("/**") && !self.cursor.starts_with("/**/") {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.cursor.advance_by(2); // `/*`

        loop {
            if self.cursor.starts_with("*/") {
                self.cursor.advance_by(2);
                return self.token(kind, start);
            }
            if self.cursor.advance().is_none() {
                let span = Span::new(start, self.cursor.pos());
                self.errors
                    .push(LexError::new(LexErrorKind::UnterminatedBlockComment, span));
                return self.token(TokenKind::Error, start);
            }
        }
    }

    // ── Literals ─────────────────────────────────────────────────────────

    /// Decimal (with `_` separators) or `0x` hex integer literal.
    fn lex_number(&mut self, start: u32) -> Token {
        if self.cursor.starts_with("0x") || self.cursor.starts_with("0X") {
            self.cursor.advance_by(2);
            self.cursor.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
        } else {
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        self.token(TokenKind::IntLiteral, start)
    }

    /// A complete quoted string, including both quotes.
    fn lex_string(&mut self, quote: char, start: u32) -> Token {
        self.cursor.advance(); // opening quote
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    let span = Span::new(start, self.cursor.pos());
                    self.errors
                        .push(LexError::new(LexErrorKind::UnterminatedString, span));
                    return self.token(TokenKind::Error, start);
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return self.token(TokenKind::StringLiteral, start);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Identifiers and keywords ─────────────────────────────────────────

    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.token(kind, start)
    }

    /// `@Name`: an identifier in builtin mode, an error in user mode.
    fn lex_reserved_ident(&mut self, start: u32) -> Token {
        self.cursor.advance(); // marker
        if !self.cursor.peek().is_some_and(is_ident_start) {
            let span = Span::new(start, self.cursor.pos());
            self.errors.push(LexError::new(
                LexErrorKind::UnexpectedCharacter(RESERVED_MARKER),
                span,
            ));
            return self.token(TokenKind::Error, start);
        }
        self.cursor.eat_while(is_ident_continue);

        match self.mode {
            LexMode::Builtin => self.token(TokenKind::Ident, start),
            LexMode::User => {
                let span = Span::new(start, self.cursor.pos());
                self.errors
                    .push(LexError::new(LexErrorKind::ReservedIdentifier, span));
                self.token(TokenKind::Error, start)
            }
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '!' | '<' | '>' | '&' | '|' | '^' | '~' | '?' | ':' | '='
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str, mode: LexMode) -> Vec<TokenKind> {
        Lexer::tokenize_with_errors(source, mode)
            .0
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn lex_struct_header() {
        assert_eq!(
            kinds("struct Point { uint x; }", LexMode::User),
            vec![
                TokenKind::Struct,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokens_cover_the_whole_source() {
        let source = "contract C { // note\n  uint x; }";
        let tokens = Lexer::tokenize(source);
        let rebuilt: String = tokens
            .iter()
            .map(|t| &source[t.span.start as usize..t.span.end as usize])
            .collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn reserved_identifier_depends_on_mode() {
        let (tokens, errors) = Lexer::tokenize_with_errors("@Msg", LexMode::Builtin);
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert!(errors.is_empty());

        let (tokens, errors) = Lexer::tokenize_with_errors("@Msg", LexMode::User);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, LexErrorKind::ReservedIdentifier);
        assert_eq!(errors[0].span, Span::new(0, 4));
    }

    #[test]
    fn dollar_is_an_ordinary_identifier_character() {
        assert_eq!(
            kinds("$Msg _x", LexMode::User),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn doc_comments_are_distinguished() {
        assert_eq!(
            Lexer::tokenize("/// doc")[0].kind,
            TokenKind::DocComment
        );
        assert_eq!(Lexer::tokenize("/** doc */")[0].kind, TokenKind::DocComment);
        assert_eq!(Lexer::tokenize("/**/")[0].kind, TokenKind::Comment);
        assert_eq!(Lexer::tokenize("// plain")[0].kind, TokenKind::Comment);
    }

    #[test]
    fn unterminated_block_comment_is_reported() {
        let (tokens, errors) = Lexer::tokenize_with_errors("/* open", LexMode::User);
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(errors[0].kind, LexErrorKind::UnterminatedBlockComment);
    }

    #[test]
    fn operators_inside_bodies() {
        assert_eq!(
            kinds("x == 1 && !y", LexMode::User),
            vec![
                TokenKind::Ident,
                TokenKind::Punct,
                TokenKind::IntLiteral,
                TokenKind::Punct,
                TokenKind::Punct,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("x = 1", LexMode::User)[1], TokenKind::Eq);
    }
}
