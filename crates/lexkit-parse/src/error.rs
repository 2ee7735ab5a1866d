//! Error types for the parser base: a fatal error surfacing from the
//! underlying token source, and the non-fatal, accumulating parse error
//! list described by spec §4.5.

use lexkit_util::diagnostic::{Diagnostic, DiagnosticCode, Span};
use thiserror::Error;

/// A fatal failure advancing the token stream - an I/O or preprocessor
/// error from the underlying [`crate::token_source::TokenSource`].
#[derive(Debug, Error)]
pub enum FatalParseError {
    #[error(transparent)]
    Lex(#[from] lexkit_lex::LexError),
    #[error(transparent)]
    Pp(#[from] lexkit_pp::PpError),
}

impl FatalParseError {
    /// The predefined [`DiagnosticCode`] a host application should attach
    /// when surfacing this failure through `lexkit_util::diagnostic`.
    /// Delegates to whichever underlying layer actually failed, matching
    /// `PpError`'s own delegation for its wrapped `LexError`.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        match self {
            FatalParseError::Lex(e) => e.diagnostic_code(),
            FatalParseError::Pp(e) => e.diagnostic_code(),
        }
    }

    /// Render this failure as a [`Diagnostic`], delegating to the
    /// underlying layer for the span and message.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FatalParseError::Lex(e) => e.to_diagnostic(),
            FatalParseError::Pp(e) => Diagnostic::error(e.to_string(), Span::DUMMY).with_code(e.diagnostic_code()),
        }
    }
}

/// One accumulated, non-fatal parse error: a production rejected the
/// current token but parsing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub stream: String,
    pub line: u32,
    pub lexeme: String,
    pub message: String,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {} (found `{}`)", self.stream, self.line, self.message, self.lexeme)
    }
}

impl std::error::Error for ParseError {}

impl ParseError {
    /// Every accumulated parse error is a rejected-token failure; callers
    /// that need a more specific code (expected-token, unexpected-eof)
    /// should attach one themselves when constructing the `Diagnostic`.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        DiagnosticCode::E_PARSER_UNEXPECTED_TOKEN
    }

    /// Render this accumulated error as a [`Diagnostic`]. Only `stream`/
    /// `line` are tracked at this layer, so the span carries no byte
    /// offset or column.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string(), Span::point(self.line, 0)).with_code(self.diagnostic_code())
    }
}
