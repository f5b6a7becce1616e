//! Declaration parsers: structs, contracts, state variables and functions.

use super::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse `struct Name { Type field; ... }`.
pub(crate) fn parse_struct_def(p: &mut Parser) {
    let m = p.open();
    p.advance(); // STRUCT_KW

    if !parse_name(p, "struct name") {
        p.close(m, SyntaxKind::STRUCT_DEF);
        return;
    }

    let brace_span = p.current_span();
    if p.expect(SyntaxKind::L_BRACE, "`{` after struct name") {
        while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
            parse_struct_field(p);
            if p.has_error() {
                break;
            }
        }
        close_body(p, brace_span, "struct");
    }

    p.close(m, SyntaxKind::STRUCT_DEF);
}

/// `Type name;`
fn parse_struct_field(p: &mut Parser) {
    let m = p.open();
    if parse_type_ref(p) && parse_name(p, "field name") {
        p.expect(SyntaxKind::SEMICOLON, "`;` after struct field");
    }
    p.close(m, SyntaxKind::STRUCT_FIELD);
}

/// Parse `contract Name { items }`. Stray `;` between items is accepted.
pub(crate) fn parse_contract_def(p: &mut Parser) {
    let m = p.open();
    p.advance(); // CONTRACT_KW

    if !parse_name(p, "contract name") {
        p.close(m, SyntaxKind::CONTRACT_DEF);
        return;
    }

    let brace_span = p.current_span();
    if p.expect(SyntaxKind::L_BRACE, "`{` after contract name") {
        while !p.at(SyntaxKind::R_BRACE) && !p.at(SyntaxKind::EOF) {
            match p.current() {
                SyntaxKind::SEMICOLON => p.advance(),
                SyntaxKind::FUNCTION_KW => parse_fn_def(p),
                SyntaxKind::IDENT => parse_state_var_decl(p),
                _ => p.advance_with_error("expected a function or state variable declaration"),
            }
            if p.has_error() {
                break;
            }
        }
        close_body(p, brace_span, "contract");
    }

    p.close(m, SyntaxKind::CONTRACT_DEF);
}

/// `Type [modifiers] name [= initializer];`
fn parse_state_var_decl(p: &mut Parser) {
    let m = p.open();

    if parse_type_ref(p) {
        parse_modifiers(p);
        if parse_name(p, "variable name") {
            if p.eat(SyntaxKind::EQ) {
                let init = p.open();
                while !p.at(SyntaxKind::SEMICOLON) && !p.at(SyntaxKind::EOF) {
                    p.advance();
                }
                p.close(init, SyntaxKind::INITIALIZER);
            }
            p.expect(SyntaxKind::SEMICOLON, "`;` after state variable");
        }
    }

    p.close(m, SyntaxKind::STATE_VAR_DECL);
}

/// `function name(params) [modifiers] [returns (params)] [modifiers] (; | { ... })`
///
/// Modifiers may appear on either side of the `returns` clause; a second
/// `returns` clause is an error.
fn parse_fn_def(p: &mut Parser) {
    let m = p.open();
    p.advance(); // FUNCTION_KW

    if !parse_name(p, "function name") {
        p.close(m, SyntaxKind::FN_DEF);
        return;
    }

    parse_param_list(p);

    let mut first_returns = None;
    while !p.has_error() {
        let kind = p.current();
        if kind.is_modifier() {
            parse_modifiers(p);
        } else if kind == SyntaxKind::RETURNS_KW {
            if let Some(first) = first_returns {
                p.error_with_related(
                    "duplicate `returns` clause",
                    first,
                    "first `returns` clause here",
                );
                break;
            }
            first_returns = Some(p.current_span());
            parse_returns_clause(p);
        } else {
            break;
        }
    }

    if !p.has_error() {
        match p.current() {
            SyntaxKind::SEMICOLON => p.advance(),
            SyntaxKind::L_BRACE => parse_block(p),
            _ => p.error("expected `;` or a function body"),
        }
    }

    p.close(m, SyntaxKind::FN_DEF);
}

fn parse_returns_clause(p: &mut Parser) {
    let m = p.open();
    p.advance(); // RETURNS_KW
    parse_param_list(p);
    p.close(m, SyntaxKind::RETURNS_CLAUSE);
}

/// `(Type [location] [name], ...)`
fn parse_param_list(p: &mut Parser) {
    let m = p.open();

    if p.expect(SyntaxKind::L_PAREN, "`(`") {
        if !p.at(SyntaxKind::R_PAREN) {
            loop {
                parse_param(p);
                if p.has_error() || !p.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
        }
        if !p.has_error() {
            p.expect(SyntaxKind::R_PAREN, "`)` to close parameter list");
        }
    }

    p.close(m, SyntaxKind::PARAM_LIST);
}

fn parse_param(p: &mut Parser) {
    let m = p.open();
    if parse_type_ref(p) {
        if p.current().is_data_location() {
            p.advance();
        }
        if p.at(SyntaxKind::IDENT) {
            parse_name(p, "parameter name");
        }
    }
    p.close(m, SyntaxKind::PARAM);
}

/// A type name, optionally qualified: `uint256`, `@Block`, `Lib.Point`.
fn parse_type_ref(p: &mut Parser) -> bool {
    if !p.at(SyntaxKind::IDENT) {
        p.error("expected a type name");
        return false;
    }
    let m = p.open();
    p.advance();
    while p.at(SyntaxKind::DOT) && p.nth(1) == SyntaxKind::IDENT {
        p.advance(); // DOT
        p.advance(); // IDENT
    }
    p.close(m, SyntaxKind::TYPE_REF);
    true
}

fn parse_modifiers(p: &mut Parser) {
    while p.current().is_modifier() {
        let m = p.open();
        p.advance();
        p.close(m, SyntaxKind::MODIFIER);
    }
}

fn parse_name(p: &mut Parser, what: &str) -> bool {
    if !p.at(SyntaxKind::IDENT) {
        p.error(&format!("expected {what}"));
        return false;
    }
    let m = p.open();
    p.advance();
    p.close(m, SyntaxKind::NAME);
    true
}

/// `{ ... }` with balanced braces. The contents are not interpreted.
fn parse_block(p: &mut Parser) {
    let m = p.open();
    let open_span = p.current_span();
    p.advance(); // L_BRACE

    let mut depth = 1u32;
    loop {
        match p.current() {
            SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_BRACE => {
                depth -= 1;
                if depth == 0 {
                    p.advance();
                    break;
                }
            }
            SyntaxKind::EOF => {
                p.error_with_related(
                    "expected `}` to close function body",
                    open_span,
                    "function body opened here",
                );
                break;
            }
            _ => {}
        }
        p.advance();
    }

    p.close(m, SyntaxKind::BLOCK);
}

fn close_body(p: &mut Parser, brace_span: sol_common::span::Span, what: &str) {
    if p.has_error() {
        return;
    }
    if p.at(SyntaxKind::R_BRACE) {
        p.advance();
    } else {
        p.error_with_related(
            &format!("expected `}}` to close {what} body"),
            brace_span,
            &format!("{what} body opened here"),
        );
    }
}
