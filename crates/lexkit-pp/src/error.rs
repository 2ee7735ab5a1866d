//! Fatal error type for the preprocessor layer (C4).

use lexkit_util::DiagnosticCode;
use thiserror::Error;

/// Fatal failure from [`crate::common_lexer::CommonLexer::next_token`].
#[derive(Debug, Error)]
pub enum PpError {
    #[error("{stream}:{line}: unknown preprocessor directive `{directive}`")]
    UnknownDirective { stream: String, line: u32, directive: String },

    #[error("{stream}:{line}: expected identifier after `{directive}`")]
    MissingIdentifier { stream: String, line: u32, directive: String },

    #[error("{stream}:{line}: recursive definition of `{name}`")]
    RecursiveDefine { stream: String, line: u32, name: String },

    #[error("{stream}:{line}: expected a string literal after #include")]
    MissingIncludeTarget { stream: String, line: u32 },

    #[error("{stream}:{line}: include target `{path}` not found: {source}")]
    IncludeNotFound {
        stream: String,
        line: u32,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stream}:{line}: #endif without matching #ifdef/#ifndef")]
    EndifWithoutIf { stream: String, line: u32 },

    #[error("{stream}:{line}: truncated #define")]
    TruncatedDefine { stream: String, line: u32 },

    #[error(transparent)]
    Lex(#[from] lexkit_lex::LexError),
}

impl PpError {
    /// The predefined [`DiagnosticCode`] a host application should attach
    /// when surfacing this failure through `lexkit_util::diagnostic`.
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        match self {
            PpError::UnknownDirective { .. } => DiagnosticCode::E_PREPROCESSOR_UNKNOWN_DIRECTIVE,
            PpError::MissingIdentifier { .. } => DiagnosticCode::E_PREPROCESSOR_MISSING_IDENT,
            PpError::RecursiveDefine { .. } => DiagnosticCode::E_PREPROCESSOR_RECURSIVE_DEFINE,
            PpError::MissingIncludeTarget { .. } => DiagnosticCode::E_PREPROCESSOR_MISSING_INCLUDE_STRING,
            PpError::IncludeNotFound { .. } => DiagnosticCode::E_PREPROCESSOR_INCLUDE_NOT_FOUND,
            PpError::EndifWithoutIf { .. } => DiagnosticCode::E_PREPROCESSOR_UNMATCHED_ENDIF,
            PpError::TruncatedDefine { .. } => DiagnosticCode::E_PREPROCESSOR_UNTERMINATED_IF,
            PpError::Lex(_) => DiagnosticCode::E_LEXER_UNEXPECTED_CHAR,
        }
    }
}

pub type PpResult<T> = Result<T, PpError>;
