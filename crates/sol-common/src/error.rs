use std::fmt;

use crate::span::Span;

/// A lexer error with location information.
///
/// The lexer itself never stops on bad input; it emits `Error` tokens. These
/// errors are produced alongside so the parser can report a precise reason.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    /// A character outside the language's alphabet.
    UnexpectedCharacter(char),
    /// The reserved marker used outside internally authored text.
    ReservedIdentifier,
    /// A string literal was not closed before end of input.
    UnterminatedString,
    /// A `/* ... */` comment was not closed before end of input.
    UnterminatedBlockComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            Self::ReservedIdentifier => write!(f, "identifiers may not start with `@`"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedBlockComment => write!(f, "unterminated block comment"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}
