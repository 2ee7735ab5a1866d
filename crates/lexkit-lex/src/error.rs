//! Fatal error type for the lexer core (C3).
//!
//! Lexical illegality is *not* modeled here - per spec §7, an unrecognized
//! lexeme becomes a token of type [`crate::token::reserved::ILLEGAL`], not a
//! raised error. The only fatal failure this crate produces is an I/O error
//! surfacing from the underlying [`crate::reader::ReaderStack`].

use lexkit_util::diagnostic::{Diagnostic, DiagnosticCode, Span};
use thiserror::Error;

/// Fatal failure from [`crate::lexer::Lexer::next_token`].
#[derive(Debug, Error)]
pub enum LexError {
    /// The underlying character source failed to read.
    #[error("{stream}:{line}: I/O error reading source: {source}")]
    Io {
        stream: String,
        line: u32,
        #[source]
        source: std::io::Error,
    },
}

impl LexError {
    /// The predefined [`DiagnosticCode`] a host application should attach
    /// when surfacing this failure through `lexkit_util::diagnostic`.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        match self {
            LexError::Io { .. } => DiagnosticCode::E_LEXER_IO_ERROR,
        }
    }

    /// Render this failure as a [`Diagnostic`]. Only `stream`/`line` are
    /// tracked at this layer, so the span carries no byte offset or column.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LexError::Io { line, .. } => {
                Diagnostic::error(self.to_string(), Span::point(*line, 0)).with_code(self.diagnostic_code())
            }
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
