//! Solidity declaration parser producing a rowan-based CST.
//!
//! The CST is lossless: whitespace and comments are kept, so the text of
//! the root node equals the parsed source. Function bodies are preserved as
//! opaque brace-balanced blocks.

pub mod ast;
pub mod cst;
pub mod error;
mod parser;
pub mod syntax_kind;

pub use cst::{SolLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use error::ParseError;
pub use syntax_kind::SyntaxKind;

use ast::item::SourceFile;
use ast::AstNode;
use sol_lexer::{LexMode, Lexer};

/// Result of parsing a source file.
///
/// `errors` holds every lexer error if there were any, otherwise at most one
/// parser error (the parser stops reporting after the first).
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    errors: Vec<ParseError>,
}

impl Parse {
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// The immutable tree; unlike [`SyntaxNode`] it can cross threads.
    pub fn green(&self) -> &rowan::GreenNode {
        &self.green
    }

    pub fn tree(&self) -> Option<SourceFile> {
        SourceFile::cast(self.syntax())
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse user source. Reserved `@` identifiers are rejected.
pub fn parse(source: &str) -> Parse {
    parse_with_mode(source, LexMode::User)
}

/// Parse an internally authored declaration, where `@Name` identifiers are
/// accepted.
pub fn parse_builtin(source: &str) -> Parse {
    parse_with_mode(source, LexMode::Builtin)
}

fn parse_with_mode(source: &str, mode: LexMode) -> Parse {
    let (tokens, lex_errors) = Lexer::tokenize_with_errors(source, mode);
    let mut p = parser::Parser::new(tokens, source);
    parser::parse_source_file(&mut p);
    let (green, parse_errors) = p.build_tree();

    // A lexer error token always triggers a parser error too; the lexer's
    // message is the useful one.
    let errors = if lex_errors.is_empty() {
        parse_errors
    } else {
        lex_errors.into_iter().map(ParseError::from).collect()
    };

    Parse { green, errors }
}

/// Render a CST as an indented tree, one node or token per line.
/// Whitespace tokens are omitted.
pub fn debug_tree(node: &SyntaxNode) -> String {
    let mut out = String::new();
    write_tree(&mut out, node, 0);
    out
}

fn write_tree(out: &mut String, node: &SyntaxNode, depth: usize) {
    use std::fmt::Write;

    let range = node.text_range();
    let _ = writeln!(
        out,
        "{:indent$}{:?}@{}..{}",
        "",
        node.kind(),
        u32::from(range.start()),
        u32::from(range.end()),
        indent = depth * 2
    );
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => write_tree(out, &n, depth + 1),
            rowan::NodeOrToken::Token(t) => {
                if t.kind() == SyntaxKind::WHITESPACE {
                    continue;
                }
                let range = t.text_range();
                let _ = writeln!(
                    out,
                    "{:indent$}{:?}@{}..{} {:?}",
                    "",
                    t.kind(),
                    u32::from(range.start()),
                    u32::from(range.end()),
                    t.text(),
                    indent = (depth + 1) * 2
                );
            }
        }
    }
}
