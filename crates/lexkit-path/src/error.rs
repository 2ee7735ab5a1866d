//! Fatal error type for pattern compilation (C5).

use lexkit_util::DiagnosticCode;
use thiserror::Error;

/// Fatal failure from [`crate::pattern::PathPattern::compile`] or
/// [`crate::pattern::PathPattern::matches`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("pattern segment `{segment}` mixes `**` with other characters")]
    MixedAnyDirectory { segment: String },

    #[error("pattern `{pattern}` contains an empty segment")]
    EmptySegment { pattern: String },

    #[error("pattern `{pattern}` has a trailing path separator")]
    TrailingSeparator { pattern: String },

    #[error("target path `{path}` contains a wildcard character")]
    WildcardInTarget { path: String },

    #[error("target path `{path}` contains an empty segment")]
    EmptyTargetSegment { path: String },
}

impl PathError {
    /// All path-pattern failures share one predefined [`DiagnosticCode`].
    pub fn diagnostic_code(&self) -> DiagnosticCode {
        DiagnosticCode::E_PATTERN_COMPILE
    }
}

pub type PathResult<T> = Result<T, PathError>;
