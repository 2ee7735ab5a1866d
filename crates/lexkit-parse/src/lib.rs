//! lexkit-parse: token-lookahead and error-accumulation utilities over
//! either the raw lexer (C3) or the preprocessor-wrapped lexer (C4).
//!
//! [`parser::ParserBase`] carries no grammar of its own. It is the
//! `current_token`/`match_type`/`current_type`/`next_token` plus an
//! accumulating, stream/line/lexeme-tagged error list described by spec
//! §4.5 - callers build recursive-descent productions on top of it.
//!
//! [`token_source::TokenSource`] is the seam that lets one `ParserBase`
//! drive either a bare [`lexkit_lex::Lexer`] or a macro/directive-aware
//! [`lexkit_pp::CommonLexer`] without caring which.
//!
//! ```
//! use std::sync::Arc;
//! use lexkit_lex::{Lexer, LexerKernel};
//! use lexkit_parse::ParserBase;
//!
//! let kernel = Arc::new(LexerKernel::builder().delimiter("+", 1).keyword("let", 100).build());
//! let lexer = Lexer::new(kernel, "main", "let x");
//! let mut parser = ParserBase::new(lexer).unwrap();
//! assert_eq!(parser.current_token().unwrap().ty, 100);
//! ```

pub mod error;
pub mod parser;
pub mod token_source;

pub use error::{FatalParseError, ParseError};
pub use parser::ParserBase;
pub use token_source::TokenSource;
