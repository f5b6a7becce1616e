//! Parse error types.

use std::fmt;

use sol_common::error::LexError;
use sol_common::span::Span;

/// A parse error with location information and an optional related span.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// Where the problem was detected.
    pub span: Span,
    /// Context location, e.g. "body opened here".
    pub related: Option<(String, Span)>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            related: None,
        }
    }

    pub fn with_related(
        message: impl Into<String>,
        span: Span,
        related_message: impl Into<String>,
        related_span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            related: Some((related_message.into(), related_span)),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use sol_common::error::LexErrorKind;

    #[test]
    fn parse_error_with_related() {
        let err = ParseError::with_related(
            "expected `}` to close contract body",
            Span::new(50, 50),
            "body opened here",
            Span::new(10, 11),
        );
        assert_eq!(err.to_string(), "expected `}` to close contract body");
        let (msg, span) = err.related.unwrap();
        assert_eq!(msg, "body opened here");
        assert_eq!(span, Span::new(10, 11));
    }

    #[test]
    fn lex_errors_convert() {
        let err: ParseError =
            LexError::new(LexErrorKind::UnterminatedString, Span::new(3, 9)).into();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.span, Span::new(3, 9));
        assert!(err.related.is_none());
    }
}
