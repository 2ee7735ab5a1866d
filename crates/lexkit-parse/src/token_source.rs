//! Abstracts [`ParserBase`](crate::parser::ParserBase) over the raw lexer
//! (C3) and the preprocessor-wrapped lexer (C4), so one parser base works
//! on either token stream.

use lexkit_lex::Token;

use crate::error::FatalParseError;

/// Anything that can be pulled for tokens one at a time, fatally failing
/// with an error convertible to [`FatalParseError`].
pub trait TokenSource {
    type Error: Into<FatalParseError>;

    fn next_token(&mut self) -> Result<Option<Token>, Self::Error>;

    fn current_stream_name(&self) -> Option<String> {
        None
    }

    fn current_line_number(&self) -> Option<u32> {
        None
    }
}

impl TokenSource for lexkit_lex::Lexer {
    type Error = lexkit_lex::LexError;

    fn next_token(&mut self) -> Result<Option<Token>, Self::Error> {
        lexkit_lex::Lexer::next_token(self)
    }

    fn current_stream_name(&self) -> Option<String> {
        lexkit_lex::Lexer::current_stream_name(self)
    }

    fn current_line_number(&self) -> Option<u32> {
        lexkit_lex::Lexer::current_line_number(self)
    }
}

impl TokenSource for lexkit_pp::CommonLexer {
    type Error = lexkit_pp::PpError;

    fn next_token(&mut self) -> Result<Option<Token>, Self::Error> {
        lexkit_pp::CommonLexer::next_token(self)
    }

    fn current_stream_name(&self) -> Option<String> {
        lexkit_pp::CommonLexer::current_stream_name(self)
    }

    fn current_line_number(&self) -> Option<u32> {
        lexkit_pp::CommonLexer::current_line_number(self)
    }
}
