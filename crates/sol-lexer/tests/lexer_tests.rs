use insta::assert_snapshot;
use sol_lexer::{LexMode, Lexer};

/// One line per significant token: kind, text and span.
fn tokenize_snapshot(source: &str, mode: LexMode) -> String {
    let (tokens, errors) = Lexer::tokenize_with_errors(source, mode);
    let mut lines: Vec<String> = tokens
        .iter()
        .filter(|tok| !tok.kind.is_trivia())
        .map(|tok| {
            let text = &source[tok.span.start as usize..tok.span.end as usize];
            format!("{:?} {:?} {}..{}", tok.kind, text, tok.span.start, tok.span.end)
        })
        .collect();
    for err in errors {
        lines.push(format!("error: {} @{}..{}", err, err.span.start, err.span.end));
    }
    lines.join("\n")
}

#[test]
fn test_builtin_struct() {
    let source = "struct @Msg {\n    bytes data;\n}";
    assert_snapshot!(tokenize_snapshot(source, LexMode::Builtin), @r#"
    Struct "struct" 0..6
    Ident "@Msg" 7..11
    LBrace "{" 12..13
    Ident "bytes" 18..23
    Ident "data" 24..28
    Semicolon ";" 28..29
    RBrace "}" 30..31
    Eof "" 31..31
    "#);
}

#[test]
fn test_reserved_name_in_user_source() {
    let source = "struct @Msg {}";
    assert_snapshot!(tokenize_snapshot(source, LexMode::User), @r#"
    Struct "struct" 0..6
    Error "@Msg" 7..11
    LBrace "{" 12..13
    RBrace "}" 13..14
    Eof "" 14..14
    error: identifiers may not start with `@` @7..11
    "#);
}

#[test]
fn test_function_header() {
    let source = "function send(uint value) returns (bool);";
    assert_snapshot!(tokenize_snapshot(source, LexMode::User), @r#"
    Function "function" 0..8
    Ident "send" 9..13
    LParen "(" 13..14
    Ident "uint" 14..18
    Ident "value" 19..24
    RParen ")" 24..25
    Returns "returns" 26..33
    LParen "(" 34..35
    Ident "bool" 35..39
    RParen ")" 39..40
    Semicolon ";" 40..41
    Eof "" 41..41
    "#);
}

#[test]
fn test_literals() {
    let source = r#"0xff 1_000 "a\"b" 'c'"#;
    assert_snapshot!(tokenize_snapshot(source, LexMode::User), @r#"
    IntLiteral "0xff" 0..4
    IntLiteral "1_000" 5..10
    StringLiteral "\"a\\\"b\"" 11..17
    StringLiteral "'c'" 18..21
    Eof "" 21..21
    "#);
}
