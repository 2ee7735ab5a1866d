//! Integration tests for [`ParserBase`] over both token sources it's
//! generic over: the bare lexer (C3) and the preprocessor-wrapped lexer (C4).

use lexkit_lex::{reserved, Lexer, LexerKernel};
use lexkit_parse::ParserBase;
use lexkit_pp::CommonLexer;

const LET: i32 = 100;
const PLUS: i32 = 1;
const SEMI: i32 = 2;

fn lex_kernel() -> LexerKernel {
    LexerKernel::builder()
        .delimiter("+", PLUS)
        .delimiter(";", SEMI)
        .keyword("let", LET)
        .build()
}

#[test]
fn drives_a_bare_lexer() {
    let lexer = Lexer::new(std::sync::Arc::new(lex_kernel()), "p", "let x + y;");
    let mut parser = ParserBase::new(lexer).unwrap();

    assert_eq!(parser.current_token().unwrap().ty, LET);
    parser.next_token().unwrap();
    assert_eq!(parser.current_token().unwrap().ty, reserved::IDENTIFIER);
    assert!(parser.match_type(LET).unwrap().is_none(), "current token is an identifier, not `let`");
    assert!(parser.match_type(reserved::IDENTIFIER).unwrap().is_some());
    assert_eq!(parser.current_token().unwrap().ty, PLUS);
}

#[test]
fn drives_a_preprocessor_wrapped_lexer() {
    let kernel_builder = LexerKernel::builder().delimiter("+", PLUS).keyword("let", LET);
    let common = CommonLexer::builder(kernel_builder).build("p", "#define X 1\nlet y + X;");
    let mut parser = ParserBase::new(common).unwrap();

    assert_eq!(parser.current_token().unwrap().ty, LET);
    parser.next_token().unwrap();
    assert_eq!(parser.current_token().unwrap().ty, reserved::IDENTIFIER);
    parser.next_token().unwrap();
    assert_eq!(parser.current_token().unwrap().ty, PLUS);
    parser.next_token().unwrap();
    // the macro `X` expanded to the NUMBER token `1`
    assert_eq!(parser.current_token().unwrap().ty, reserved::NUMBER);
    assert_eq!(parser.current_token().unwrap().lexeme, "1");
}

#[test]
fn accumulates_errors_across_productions_without_stopping() {
    let lexer = Lexer::new(std::sync::Arc::new(lex_kernel()), "p", "+ let +");
    let mut parser = ParserBase::new(lexer).unwrap();

    parser.expect_one_of(&[LET], "a let statement");
    parser.next_token().unwrap();
    assert!(parser.match_type(LET).unwrap().is_some());
    parser.expect_one_of(&[LET], "a let statement");

    assert_eq!(parser.errors().len(), 2);
    for err in parser.errors() {
        assert_eq!(err.stream, "p");
    }
}

#[test]
fn is_eof_reports_true_once_stream_is_exhausted() {
    let lexer = Lexer::new(std::sync::Arc::new(lex_kernel()), "p", "+");
    let mut parser = ParserBase::new(lexer).unwrap();
    assert!(!parser.is_eof());
    parser.next_token().unwrap();
    assert!(parser.is_eof());
}
