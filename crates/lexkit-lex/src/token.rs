//! Token type: the record emitted by the lexer state machine, and the
//! reserved negative type codes that are part of its external API.

use std::sync::Arc;

/// A lexical token.
///
/// Immutable once constructed. `lexeme` has string escapes already decoded
/// and quotes stripped for string tokens. `line_text` is the containing
/// physical line (with its trailing newline), kept for diagnostic display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Name of the stream this token was read from.
    pub stream_name: Arc<str>,
    /// The token's decoded text.
    pub lexeme: String,
    /// The physical source line containing this token.
    pub line_text: Arc<str>,
    /// 1-based line number within `stream_name`.
    pub line_number: u32,
    /// Token type: a reserved negative constant (see [`reserved`]) or a
    /// non-negative user type assigned by the [`crate::kernel::LexerKernel`].
    pub ty: i32,
}

impl Token {
    pub fn new(
        stream_name: impl Into<Arc<str>>,
        lexeme: impl Into<String>,
        line_text: impl Into<Arc<str>>,
        line_number: u32,
        ty: i32,
    ) -> Self {
        Self {
            stream_name: stream_name.into(),
            lexeme: lexeme.into(),
            line_text: line_text.into(),
            line_number,
            ty,
        }
    }

    /// True if `ty` is one of the reserved (negative) type codes.
    pub fn is_reserved(&self) -> bool {
        self.ty < 0
    }
}

/// Reserved token-type codes. Callers must treat these integer values as
/// part of the API: user-assigned delimiter/comment/keyword/special types
/// always occupy the non-negative space.
pub mod reserved {
    /// Signals the token stream has ended. Never itself emitted to a caller
    /// of [`crate::lexer::Lexer::next_token`] — it is the `None` case.
    pub const END_OF_LEXER: i32 = -1;
    /// Emitted when a stream is popped, if the kernel's `include_stream_break` is set.
    pub const END_OF_STREAM: i32 = -2;
    /// Any integer, float, hex, or scientific-notation numeric literal.
    pub const NUMBER: i32 = -3;
    /// A single space character, emitted if `include_spaces` is set.
    pub const DELIM_SPACE: i32 = -4;
    /// A single tab character, emitted if `include_tabs` is set.
    pub const DELIM_TAB: i32 = -5;
    /// A newline, emitted if `include_newlines` is set.
    pub const DELIM_NEWLINE: i32 = -6;
    /// An identifier that matched no keyword table entry.
    pub const IDENTIFIER: i32 = -10;
    /// An unrecognized lexeme. Not an error by itself - a token type.
    pub const ILLEGAL: i32 = -12;
    /// A quoted string literal, with escapes decoded and quotes stripped.
    pub const STRING: i32 = -15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_token_fields() {
        let tok = Token::new("main.src", "hello", "hello world\n", 3, reserved::IDENTIFIER);
        assert_eq!(&*tok.stream_name, "main.src");
        assert_eq!(tok.lexeme, "hello");
        assert_eq!(tok.line_number, 3);
        assert_eq!(tok.ty, reserved::IDENTIFIER);
    }

    #[test]
    fn is_reserved() {
        let tok = Token::new("s", "x", "x\n", 1, reserved::NUMBER);
        assert!(tok.is_reserved());
        let tok = Token::new("s", "+", "+\n", 1, 42);
        assert!(!tok.is_reserved());
    }
}
