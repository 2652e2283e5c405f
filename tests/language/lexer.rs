//! Integration tests for the formula lexer

use garm_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn rate_product_tokens() {
    assert_eq!(
        kinds("Kd_LR * kf_L_bind_R"),
        vec![
            TokenKind::Ident("Kd_LR".into()),
            TokenKind::Star,
            TokenKind::Ident("kf_L_bind_R".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn both_power_spellings() {
    assert_eq!(kinds("a ^ 2")[1], TokenKind::Power);
    assert_eq!(kinds("a ** 2")[1], TokenKind::Power);
}

#[test]
fn scientific_numbers() {
    assert_eq!(kinds("1e-3")[0], TokenKind::Number(1e-3));
    assert_eq!(kinds("2.5E4")[0], TokenKind::Number(2.5e4));
    assert_eq!(kinds(".5")[0], TokenKind::Number(0.5));
}

#[test]
fn spans_track_lines_and_columns() {
    let source = "kf\n  * 2";
    let tokens = Lexer::tokenize_all(source);
    assert_eq!(tokens[0].text(source), "kf");
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
    assert_eq!(tokens[2].text(source), "2");
}

#[test]
fn stray_character_is_an_error_token() {
    assert!(matches!(kinds("kf $ 2")[1], TokenKind::Error(_)));
}
