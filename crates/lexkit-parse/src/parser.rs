//! ParserBase (C6): token-lookahead and error-accumulation utilities over
//! a [`TokenSource`]. Carries no grammar of its own - callers build
//! recursive-descent productions on top of `current_token`/`match_type`/
//! `current_type`/`next_token`.

use lexkit_lex::token::reserved;
use lexkit_lex::Token;

use crate::error::{FatalParseError, ParseError};
use crate::token_source::TokenSource;

pub struct ParserBase<S: TokenSource> {
    source: S,
    current: Option<Token>,
    errors: Vec<ParseError>,
}

impl<S: TokenSource> ParserBase<S> {
    /// Construct a parser base, pulling the first token eagerly so
    /// `current_token` is valid immediately.
    pub fn new(mut source: S) -> Result<Self, FatalParseError> {
        let current = source.next_token().map_err(Into::into)?;
        Ok(Self { source, current, errors: Vec::new() })
    }

    /// The token under the cursor, or `None` once the stream has ended.
    pub fn current_token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// True if the current token's type is among `types` (an empty current
    /// token, i.e. end of stream, never matches).
    pub fn current_type(&self, types: &[i32]) -> bool {
        self.current.as_ref().is_some_and(|t| types.contains(&t.ty))
    }

    /// If the current token's type equals `ty`, consume and return it,
    /// advancing the cursor. Otherwise leaves the cursor untouched.
    pub fn match_type(&mut self, ty: i32) -> Result<Option<Token>, FatalParseError> {
        if !self.current_type(&[ty]) {
            return Ok(None);
        }
        let tok = self.current.take();
        self.next_token()?;
        Ok(tok)
    }

    /// Advance the cursor by one token, turning any underlying I/O or
    /// preprocessor failure into a [`FatalParseError`].
    pub fn next_token(&mut self) -> Result<Option<Token>, FatalParseError> {
        self.current = self.source.next_token().map_err(Into::into)?;
        Ok(self.current.clone())
    }

    /// True once the cursor has run past the last token.
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    /// Record a non-fatal parse error against the current token (or
    /// `<eof>` if the stream has ended) and continue parsing.
    pub fn error(&mut self, message: impl Into<String>) {
        let (stream, line, lexeme) = match &self.current {
            Some(t) => (t.stream_name.to_string(), t.line_number, t.lexeme.clone()),
            None => (
                self.source.current_stream_name().unwrap_or_else(|| "<eof>".to_string()),
                self.source.current_line_number().unwrap_or(0),
                String::new(),
            ),
        };
        self.errors.push(ParseError { stream, line, lexeme, message: message.into() });
    }

    /// Convenience: record an "unexpected token, expected one of `types`" error.
    pub fn expect_one_of(&mut self, types: &[i32], what: &str) -> bool {
        if self.current_type(types) {
            return true;
        }
        let found = self.current.as_ref().map(|t| t.lexeme.as_str()).unwrap_or("<eof>");
        self.error(format!("expected {what}, found `{found}`"));
        false
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// True if the current token is the reserved end-of-lexer marker or
    /// the stream has already ended.
    pub fn is_eof(&self) -> bool {
        self.at_end() || self.current_type(&[reserved::END_OF_LEXER])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexkit_lex::{Lexer, LexerKernel};
    use std::sync::Arc;

    fn kernel() -> Arc<LexerKernel> {
        Arc::new(
            LexerKernel::builder()
                .delimiter("+", 1)
                .delimiter("(", 2)
                .delimiter(")", 3)
                .keyword("let", 100)
                .build(),
        )
    }

    #[test]
    fn current_token_is_the_first_token_on_construction() {
        let lexer = Lexer::new(kernel(), "p", "let x".to_string());
        let parser = ParserBase::new(lexer).unwrap();
        assert_eq!(parser.current_token().unwrap().ty, 100);
    }

    #[test]
    fn match_type_advances_on_success_only() {
        let lexer = Lexer::new(kernel(), "p", "let x".to_string());
        let mut parser = ParserBase::new(lexer).unwrap();
        assert!(parser.match_type(999).unwrap().is_none());
        let tok = parser.match_type(100).unwrap().unwrap();
        assert_eq!(tok.ty, 100);
        assert_eq!(parser.current_token().unwrap().ty, reserved::IDENTIFIER);
    }

    #[test]
    fn current_type_checks_a_set() {
        let lexer = Lexer::new(kernel(), "p", "+".to_string());
        let parser = ParserBase::new(lexer).unwrap();
        assert!(parser.current_type(&[1, 2, 3]));
        assert!(!parser.current_type(&[2, 3]));
    }

    #[test]
    fn errors_accumulate_without_stopping() {
        let lexer = Lexer::new(kernel(), "p", "+ +".to_string());
        let mut parser = ParserBase::new(lexer).unwrap();
        parser.expect_one_of(&[100], "a keyword");
        parser.next_token().unwrap();
        parser.expect_one_of(&[100], "a keyword");
        assert_eq!(parser.errors().len(), 2);
        assert!(parser.has_errors());
    }

    #[test]
    fn reaches_eof() {
        let lexer = Lexer::new(kernel(), "p", "+".to_string());
        let mut parser = ParserBase::new(lexer).unwrap();
        parser.next_token().unwrap();
        assert!(parser.is_eof());
    }
}
