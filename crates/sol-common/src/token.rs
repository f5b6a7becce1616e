use crate::span::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// The token vocabulary for Solidity declarations.
///
/// Elementary type names (`uint256`, `address`, `bytes32`, ...) are plain
/// identifiers here; they are classified by the type checker, not the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ── Keywords (17) ──────────────────────────────────────────────────
    Calldata,
    Constant,
    Contract,
    External,
    False,
    Function,
    Internal,
    Memory,
    Payable,
    Private,
    Public,
    Pure,
    Returns,
    Storage,
    Struct,
    True,
    View,

    // ── Delimiters (6) ─────────────────────────────────────────────────
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,

    // ── Punctuation (4) ────────────────────────────────────────────────
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `=`
    Eq,

    // ── Literals (2) ───────────────────────────────────────────────────
    /// Integer literal, e.g. `42`, `0xff`.
    IntLiteral,
    /// Complete string literal including its quotes.
    StringLiteral,

    // ── Identifiers and trivia (5) ─────────────────────────────────────
    /// Identifier. In builtin mode this includes reserved `@Name` identifiers.
    Ident,
    /// Any other operator character inside a function body (`+`, `!`, ...).
    Punct,
    /// `// ...` or `/* ... */`.
    Comment,
    /// `/// ...` or `/** ... */` (NatSpec).
    DocComment,
    /// Spaces, tabs and newlines.
    Whitespace,

    // ── Special (2) ────────────────────────────────────────────────────
    Eof,
    /// Input the lexer could not classify. Used for error recovery.
    Error,
}

impl TokenKind {
    /// Tokens that never affect parsing.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::DocComment
        )
    }
}

/// Look up a keyword from its text. Keywords are case-sensitive.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "calldata" => Some(TokenKind::Calldata),
        "constant" => Some(TokenKind::Constant),
        "contract" => Some(TokenKind::Contract),
        "external" => Some(TokenKind::External),
        "false" => Some(TokenKind::False),
        "function" => Some(TokenKind::Function),
        "internal" => Some(TokenKind::Internal),
        "memory" => Some(TokenKind::Memory),
        "payable" => Some(TokenKind::Payable),
        "private" => Some(TokenKind::Private),
        "public" => Some(TokenKind::Public),
        "pure" => Some(TokenKind::Pure),
        "returns" => Some(TokenKind::Returns),
        "storage" => Some(TokenKind::Storage),
        "struct" => Some(TokenKind::Struct),
        "true" => Some(TokenKind::True),
        "view" => Some(TokenKind::View),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_from_str_recognizes_all_keywords() {
        let keywords = [
            ("calldata", TokenKind::Calldata),
            ("constant", TokenKind::Constant),
            ("contract", TokenKind::Contract),
            ("external", TokenKind::External),
            ("false", TokenKind::False),
            ("function", TokenKind::Function),
            ("internal", TokenKind::Internal),
            ("memory", TokenKind::Memory),
            ("payable", TokenKind::Payable),
            ("private", TokenKind::Private),
            ("public", TokenKind::Public),
            ("pure", TokenKind::Pure),
            ("returns", TokenKind::Returns),
            ("storage", TokenKind::Storage),
            ("struct", TokenKind::Struct),
            ("true", TokenKind::True),
            ("view", TokenKind::View),
        ];

        for (s, expected) in keywords {
            assert_eq!(
                keyword_from_str(s),
                Some(expected),
                "keyword_from_str({s:?}) should return Some({expected:?})"
            );
        }
    }

    #[test]
    fn keyword_from_str_rejects_non_keywords() {
        assert_eq!(keyword_from_str("uint256"), None);
        assert_eq!(keyword_from_str("address"), None);
        assert_eq!(keyword_from_str("Contract"), None); // case-sensitive
        assert_eq!(keyword_from_str(""), None);
    }

    #[test]
    fn trivia_kinds() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(TokenKind::DocComment.is_trivia());
        assert!(!TokenKind::Ident.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
    }
}
