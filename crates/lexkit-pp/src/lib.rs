//! lexkit-pp: the C-style preprocessor layer (C4) that wraps a
//! [`lexkit_lex::Lexer`] with macro expansion and directive handling.
//!
//! [`CommonLexer`] never inherits from `Lexer` - it holds one, plus a
//! token pushback stack, and implements its own `next_token` contract by
//! pulling from the inner lexer and post-processing the result:
//!
//! - Newlines are always dropped (they only exist to terminate directive lines).
//! - Tokens inside a false `#ifdef`/`#ifndef` branch are dropped.
//! - Identifiers that name a macro are replaced by the macro's token list.
//! - `#include`/`#define`/`#undefine`/`#ifdef`/`#ifndef`/`#endif` are
//!   intercepted and never reach the caller.
//!
//! ```
//! use lexkit_lex::LexerKernel;
//! use lexkit_pp::CommonLexer;
//!
//! let kernel_builder = LexerKernel::builder().delimiter("+", 1);
//! let mut lexer = CommonLexer::builder(kernel_builder).build("main", "#define X 1\nX + X");
//! while let Some(tok) = lexer.next_token().unwrap() {
//!     let _ = tok;
//! }
//! ```

pub mod common_lexer;
pub mod error;
pub mod resolver;

pub use common_lexer::{CommonLexer, CommonLexerBuilder, PREPROCESSOR_DIRECTIVE};
pub use error::{PpError, PpResult};
pub use resolver::{DefaultResolver, IncludeResolver};
