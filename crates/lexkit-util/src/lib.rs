//! lexkit-util - Shared foundation types for the lexkit toolkit
//!
//! This crate provides the infrastructure shared by every other lexkit crate:
//! string interning ([`symbol`]), source location tracking ([`span`]), and
//! diagnostic reporting ([`diagnostic`]). None of these types know anything
//! about a particular grammar or token set - they are the plumbing that the
//! lexer kernel, the preprocessor, and the parser base are all built on top of.
//!
//! # Modules
//!
//! - [`symbol`] - interned strings (`Symbol`) backed by a global, thread-safe
//!   string table.
//! - [`span`] - byte-offset spans (`Span`), file identifiers (`FileId`), and
//!   a [`span::SourceMap`] for turning offsets back into line/column text.
//! - [`diagnostic`] - `Diagnostic`, `Handler`, and the predefined
//!   `DiagnosticCode` constants used to report lexer, parser, preprocessor,
//!   and pattern-matcher failures with consistent formatting.
//! - [`error`] - `thiserror`-derived error types for the operations exposed
//!   directly by this crate (interning, source-map lookups, diagnostics).

pub mod diagnostic;
pub mod error;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use error::{DiagnosticError, DiagnosticResult, SourceMapError, SourceMapResult, SymbolError, SymbolResult};
pub use span::{FileId, Span};
pub use symbol::Symbol;
