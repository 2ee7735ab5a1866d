//! CommonLexer (C4): wraps a [`Lexer`] with macro expansion and a small
//! C-style preprocessor.
//!
//! Composition, not inheritance: `CommonLexer` holds a `Lexer` and a token
//! pushback stack, and implements its own `next_token` by pulling from the
//! inner lexer and post-processing - directives are intercepted, macro
//! references are substituted, and `#ifdef`/`#ifndef` branches that are not
//! active silently swallow their tokens.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use lexkit_lex::kernel::LexerKernelBuilder;
use lexkit_lex::reader::ReaderStack;
use lexkit_lex::token::reserved;
use lexkit_lex::{Lexer, LexerKernel, Token};
use rustc_hash::FxHashMap;

use crate::error::{PpError, PpResult};
use crate::resolver::{DefaultResolver, IncludeResolver};

/// The non-negative token type CommonLexer registers for `#` as a
/// special-prefix on the underlying [`LexerKernel`]. Directive lexemes
/// (`#include`, `#define`, ...) surface from the inner lexer tagged with
/// this type.
pub const PREPROCESSOR_DIRECTIVE: i32 = 0;

/// Builds a [`CommonLexer`] on top of a caller-supplied [`LexerKernelBuilder`].
///
/// Forces `include_newlines(true)` (directive lines are newline-terminated)
/// and registers `#` as a special prefix under [`PREPROCESSOR_DIRECTIVE`].
pub struct CommonLexerBuilder {
    kernel_builder: LexerKernelBuilder,
    resolver: Option<Box<dyn IncludeResolver>>,
    debug: bool,
}

impl CommonLexerBuilder {
    pub fn new(kernel_builder: LexerKernelBuilder) -> Self {
        Self { kernel_builder, resolver: None, debug: false }
    }

    /// Override the default parent-path-then-verbatim `#include` resolver.
    pub fn resolver(mut self, resolver: impl IncludeResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn debug(mut self, yes: bool) -> Self {
        self.debug = yes;
        self
    }

    pub fn build(self, stream_name: impl Into<String>, source: impl Into<String>) -> CommonLexer {
        let kernel = Arc::new(
            self.kernel_builder
                .special('#', PREPROCESSOR_DIRECTIVE)
                .include_newlines(true)
                .build(),
        );
        let mut lexer = Lexer::new(kernel, stream_name, source);
        lexer.set_debug(self.debug);
        CommonLexer::wrap(lexer, self.resolver.unwrap_or_else(|| Box::new(DefaultResolver)), self.debug)
    }
}

/// The preprocessor/macro-expansion layer (C4).
pub struct CommonLexer {
    inner: Lexer,
    reader: Rc<RefCell<ReaderStack>>,
    pushback: Vec<Token>,
    macros: FxHashMap<String, Vec<Token>>,
    if_stack: Vec<bool>,
    resolver: Box<dyn IncludeResolver>,
    debug: bool,
}

impl CommonLexer {
    /// Start building a `CommonLexer` from a kernel-in-progress builder.
    pub fn builder(kernel_builder: LexerKernelBuilder) -> CommonLexerBuilder {
        CommonLexerBuilder::new(kernel_builder)
    }

    /// Wrap an already-constructed [`Lexer`]. The caller is responsible for
    /// having configured its kernel with `include_newlines(true)` and a
    /// special-prefix entry for `#` under [`PREPROCESSOR_DIRECTIVE`].
    pub fn wrap(inner: Lexer, resolver: Box<dyn IncludeResolver>, debug: bool) -> Self {
        let reader = inner.reader_handle();
        Self {
            inner,
            reader,
            pushback: Vec::new(),
            macros: FxHashMap::default(),
            if_stack: Vec::new(),
            resolver,
            debug,
        }
    }

    pub fn kernel(&self) -> &Arc<LexerKernel> {
        self.inner.kernel()
    }

    pub fn current_stream_name(&self) -> Option<String> {
        self.reader.borrow().current_stream_name().map(str::to_owned)
    }

    pub fn current_line_number(&self) -> Option<u32> {
        self.reader.borrow().current_line_number()
    }

    fn if_active(&self) -> bool {
        self.if_stack.last().copied().unwrap_or(true)
    }

    /// Pull one token from the pushback stack, or the underlying lexer if
    /// it's empty, with no filtering applied.
    fn pull_raw(&mut self) -> PpResult<Option<Token>> {
        if let Some(tok) = self.pushback.pop() {
            return Ok(Some(tok));
        }
        Ok(self.inner.next_token()?)
    }

    fn expect_raw(&mut self, directive: &str, at: &Token) -> PpResult<Token> {
        self.pull_raw()?.ok_or_else(|| PpError::MissingIdentifier {
            stream: at.stream_name.to_string(),
            line: at.line_number,
            directive: directive.to_string(),
        })
    }

    /// Produce the next token, after macro expansion and directive
    /// processing. `Ok(None)` once the underlying source is exhausted.
    pub fn next_token(&mut self) -> PpResult<Option<Token>> {
        loop {
            let tok = match self.pull_raw()? {
                Some(t) => t,
                None => return Ok(None),
            };

            if tok.ty == reserved::DELIM_NEWLINE {
                continue;
            }

            let is_directive = tok.ty == PREPROCESSOR_DIRECTIVE;
            if !is_directive && !self.if_active() {
                continue;
            }

            if is_directive {
                self.handle_directive(tok)?;
                continue;
            }

            if tok.ty == reserved::IDENTIFIER {
                if let Some(expansion) = self.macros.get(&tok.lexeme) {
                    for t in expansion.iter().rev() {
                        self.pushback.push(t.clone());
                    }
                    continue;
                }
            }

            if self.debug {
                log::trace!(target: "lexkit_pp", "{}:{} -> {:?}", tok.stream_name, tok.line_number, tok.lexeme);
            }
            return Ok(Some(tok));
        }
    }

    fn handle_directive(&mut self, tok: Token) -> PpResult<()> {
        log::debug!(target: "lexkit_pp::directive", "{}:{} {}", tok.stream_name, tok.line_number, tok.lexeme);
        match tok.lexeme.as_str() {
            "#include" => self.handle_include(&tok),
            "#define" => self.handle_define(&tok),
            "#undefine" => self.handle_undefine(&tok),
            "#ifdef" => self.handle_if(&tok, false),
            "#ifndef" => self.handle_if(&tok, true),
            "#endif" => self.handle_endif(&tok),
            other => Err(PpError::UnknownDirective {
                stream: tok.stream_name.to_string(),
                line: tok.line_number,
                directive: other.to_string(),
            }),
        }
    }

    fn handle_include(&mut self, at: &Token) -> PpResult<()> {
        let target = self.expect_raw("#include", at)?;
        if target.ty != reserved::STRING {
            return Err(PpError::MissingIncludeTarget { stream: at.stream_name.to_string(), line: at.line_number });
        }
        let current_stream = self.reader.borrow().current_stream_name().unwrap_or_default().to_string();
        let (name, source) = self.resolver.resolve(&current_stream, &target.lexeme).map_err(|source| {
            PpError::IncludeNotFound {
                stream: at.stream_name.to_string(),
                line: at.line_number,
                path: target.lexeme.clone(),
                source,
            }
        })?;
        self.reader.borrow_mut().push(name, source);
        Ok(())
    }

    fn handle_define(&mut self, at: &Token) -> PpResult<()> {
        let name_tok = self.expect_raw("#define", at)?;
        if name_tok.ty != reserved::IDENTIFIER {
            return Err(PpError::MissingIdentifier {
                stream: at.stream_name.to_string(),
                line: at.line_number,
                directive: "#define".to_string(),
            });
        }
        let name = name_tok.lexeme.clone();
        let mut body = Vec::new();
        loop {
            match self.pull_raw()? {
                None => {
                    return Err(PpError::TruncatedDefine { stream: at.stream_name.to_string(), line: at.line_number })
                }
                Some(t) if t.ty == reserved::DELIM_NEWLINE => break,
                Some(t) => {
                    if t.lexeme == name {
                        return Err(PpError::RecursiveDefine {
                            stream: at.stream_name.to_string(),
                            line: at.line_number,
                            name,
                        });
                    }
                    body.push(t);
                }
            }
        }
        self.macros.insert(name, body);
        Ok(())
    }

    fn handle_undefine(&mut self, at: &Token) -> PpResult<()> {
        let name_tok = self.expect_raw("#undefine", at)?;
        if name_tok.ty != reserved::IDENTIFIER {
            return Err(PpError::MissingIdentifier {
                stream: at.stream_name.to_string(),
                line: at.line_number,
                directive: "#undefine".to_string(),
            });
        }
        self.macros.remove(&name_tok.lexeme);
        Ok(())
    }

    fn handle_if(&mut self, at: &Token, negate: bool) -> PpResult<()> {
        let directive = if negate { "#ifndef" } else { "#ifdef" };
        let name_tok = self.expect_raw(directive, at)?;
        if name_tok.ty != reserved::IDENTIFIER {
            return Err(PpError::MissingIdentifier {
                stream: at.stream_name.to_string(),
                line: at.line_number,
                directive: directive.to_string(),
            });
        }
        let defined = self.macros.contains_key(&name_tok.lexeme);
        self.if_stack.push(if negate { !defined } else { defined });
        Ok(())
    }

    fn handle_endif(&mut self, at: &Token) -> PpResult<()> {
        self.if_stack
            .pop()
            .map(|_| ())
            .ok_or_else(|| PpError::EndifWithoutIf { stream: at.stream_name.to_string(), line: at.line_number })
    }
}
