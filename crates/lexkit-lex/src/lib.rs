//! lexkit-lex: the lexer core of the toolkit.
//!
//! Three pieces compose into a working tokenizer:
//!
//! - [`kernel::LexerKernel`] (C1) - the delimiter/comment/string/special/
//!   keyword configuration, assembled with [`kernel::LexerKernelBuilder`]
//!   and frozen.
//! - [`reader::ReaderStack`] (C2) - a LIFO of named character sources with
//!   line/column bookkeeping and the two-tier end-of-input signal
//!   ([`reader::END_OF_STREAM`] / [`reader::END_OF_LEXER`]).
//! - [`lexer::Lexer`] (C3) - the state machine that drives a `ReaderStack`
//!   under a `LexerKernel`'s rules and emits [`token::Token`] records.
//!
//! ```
//! use std::sync::Arc;
//! use lexkit_lex::{Lexer, LexerKernel};
//!
//! let kernel = Arc::new(
//!     LexerKernel::builder()
//!         .delimiter("+", 1)
//!         .keyword("let", 100)
//!         .string_delim('"', '"')
//!         .build(),
//! );
//! let mut lexer = Lexer::new(kernel, "main", "let x = \"hi\" + 1");
//! while let Some(tok) = lexer.next_token().unwrap() {
//!     let _ = tok;
//! }
//! ```

pub mod error;
pub mod kernel;
pub mod lexer;
pub mod reader;
pub mod token;
pub mod unicode;

pub use error::{LexError, LexResult};
pub use kernel::{LexerKernel, LexerKernelBuilder};
pub use lexer::Lexer;
pub use reader::{BufReadSource, LineSource, OwnedStringSource, ReaderStack, StringSource, END_OF_LEXER, END_OF_STREAM};
pub use token::{reserved, Token};
