//! SyntaxKind enum for the Solidity CST.
//!
//! Token kinds are mapped 1:1 from [`TokenKind`] (SCREAMING_SNAKE_CASE),
//! followed by the composite node kinds the parser produces.

use sol_common::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // ── Sentinels ──────────────────────────────────────────────────────
    /// Placeholder kind of an opened-but-not-closed node.
    TOMBSTONE = 0,
    /// Wrapper for tokens that couldn't be parsed.
    ERROR_NODE = 1,

    // ── Keywords (17) ──────────────────────────────────────────────────
    CALLDATA_KW,
    CONSTANT_KW,
    CONTRACT_KW,
    EXTERNAL_KW,
    FALSE_KW,
    FUNCTION_KW,
    INTERNAL_KW,
    MEMORY_KW,
    PAYABLE_KW,
    PRIVATE_KW,
    PUBLIC_KW,
    PURE_KW,
    RETURNS_KW,
    STORAGE_KW,
    STRUCT_KW,
    TRUE_KW,
    VIEW_KW,

    // ── Delimiters and punctuation ─────────────────────────────────────
    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,
    COMMA,
    DOT,
    SEMICOLON,
    EQ,

    // ── Literals, identifiers, trivia ──────────────────────────────────
    INT_LITERAL,
    STRING_LITERAL,
    IDENT,
    PUNCT,
    COMMENT,
    DOC_COMMENT,
    WHITESPACE,
    EOF,
    /// Lexer error token.
    ERROR,

    // ── Composite node kinds ───────────────────────────────────────────
    /// Root node of a parsed source.
    SOURCE_FILE,
    /// `struct Name { fields }`
    STRUCT_DEF,
    /// `Type name;` inside a struct.
    STRUCT_FIELD,
    /// `contract Name { items }`
    CONTRACT_DEF,
    /// `Type [modifiers] name [= initializer];` inside a contract.
    STATE_VAR_DECL,
    /// Tokens of a state variable initializer after `=`.
    INITIALIZER,
    /// `function name(params) [modifiers] [returns (params)] (; | { ... })`
    FN_DEF,
    /// `(a, b, c)`
    PARAM_LIST,
    /// `Type [location] [name]`
    PARAM,
    /// `returns (params)`
    RETURNS_CLAUSE,
    /// A (possibly dotted) type name.
    TYPE_REF,
    /// Name in a definition position.
    NAME,
    /// A visibility or mutability keyword.
    MODIFIER,
    /// Function body. Statements are kept as opaque tokens.
    BLOCK,
}

impl SyntaxKind {
    /// The last declared kind; raw values above it are invalid.
    pub const LAST: SyntaxKind = SyntaxKind::BLOCK;

    /// Tokens that don't affect parsing.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE | SyntaxKind::COMMENT | SyntaxKind::DOC_COMMENT
        )
    }

    /// Visibility keywords.
    pub fn is_visibility(self) -> bool {
        matches!(
            self,
            SyntaxKind::PUBLIC_KW
                | SyntaxKind::PRIVATE_KW
                | SyntaxKind::INTERNAL_KW
                | SyntaxKind::EXTERNAL_KW
        )
    }

    /// Keywords allowed in the modifier position of a declaration header.
    pub fn is_modifier(self) -> bool {
        self.is_visibility()
            || matches!(
                self,
                SyntaxKind::PURE_KW
                    | SyntaxKind::VIEW_KW
                    | SyntaxKind::PAYABLE_KW
                    | SyntaxKind::CONSTANT_KW
            )
    }

    /// Parameter data locations.
    pub fn is_data_location(self) -> bool {
        matches!(
            self,
            SyntaxKind::MEMORY_KW | SyntaxKind::STORAGE_KW | SyntaxKind::CALLDATA_KW
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Calldata => SyntaxKind::CALLDATA_KW,
            TokenKind::Constant => SyntaxKind::CONSTANT_KW,
            TokenKind::Contract => SyntaxKind::CONTRACT_KW,
            TokenKind::External => SyntaxKind::EXTERNAL_KW,
            TokenKind::False => SyntaxKind::FALSE_KW,
            TokenKind::Function => SyntaxKind::FUNCTION_KW,
            TokenKind::Internal => SyntaxKind::INTERNAL_KW,
            TokenKind::Memory => SyntaxKind::MEMORY_KW,
            TokenKind::Payable => SyntaxKind::PAYABLE_KW,
            TokenKind::Private => SyntaxKind::PRIVATE_KW,
            TokenKind::Public => SyntaxKind::PUBLIC_KW,
            TokenKind::Pure => SyntaxKind::PURE_KW,
            TokenKind::Returns => SyntaxKind::RETURNS_KW,
            TokenKind::Storage => SyntaxKind::STORAGE_KW,
            TokenKind::Struct => SyntaxKind::STRUCT_KW,
            TokenKind::True => SyntaxKind::TRUE_KW,
            TokenKind::View => SyntaxKind::VIEW_KW,
            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::IntLiteral => SyntaxKind::INT_LITERAL,
            TokenKind::StringLiteral => SyntaxKind::STRING_LITERAL,
            TokenKind::Ident => SyntaxKind::IDENT,
            TokenKind::Punct => SyntaxKind::PUNCT,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::DocComment => SyntaxKind::DOC_COMMENT,
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Error => SyntaxKind::ERROR,
        }
    }
}
