//! Lexer (C3): the deterministic state machine that consumes characters
//! from a [`ReaderStack`] under the rules of a [`LexerKernel`] and emits
//! [`Token`] records.
//!
//! The DFA's 25 reserved states (spec §4.2) don't need a field that
//! survives across `next_token()` calls: every state transition that
//! happens mid-token runs inside the single call that produces that token.
//! The only thing that crosses a call boundary is the "delimiter-break"
//! lookahead character - the one character read to decide a token had
//! ended, which belongs to the *next* token. That's `pending`.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{LexError, LexResult};
use crate::kernel::LexerKernel;
use crate::reader::{LineSource, OwnedStringSource, ReaderStack, END_OF_LEXER, END_OF_STREAM};
use crate::token::{reserved, Token};
use crate::unicode;

/// Snapshot of where the token currently being assembled started: which
/// stream, which physical line, and that line's number.
struct TokenLoc {
    stream: String,
    line_text: String,
    line_number: u32,
}

impl TokenLoc {
    fn token(&self, lexeme: impl Into<String>, ty: i32) -> Token {
        Token::new(self.stream.clone(), lexeme, self.line_text.clone(), self.line_number, ty)
    }
}

/// Outcome of decoding one `\`-escape inside a string literal.
enum Escape {
    Char(char),
    /// Malformed escape; carries the raw text (without the leading `\`)
    /// to fold into an ILLEGAL token's lexeme.
    Illegal(String),
}

/// The lexer core (C3). Construct with a [`LexerKernel`] and a character
/// source; call [`Lexer::next_token`] until it returns `Ok(None)`.
pub struct Lexer {
    kernel: Arc<LexerKernel>,
    reader: Rc<RefCell<ReaderStack>>,
    /// The single character of lookahead that belongs to the next token.
    pending: Option<char>,
    debug: bool,
}

impl Lexer {
    /// Build a lexer over an owned in-memory string.
    pub fn new(kernel: Arc<LexerKernel>, stream_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self::from_line_source(kernel, stream_name, Box::new(OwnedStringSource::new(source.into())))
    }

    /// Build a lexer over an arbitrary [`LineSource`] (e.g. a file).
    pub fn from_line_source(
        kernel: Arc<LexerKernel>,
        stream_name: impl Into<String>,
        source: Box<dyn LineSource>,
    ) -> Self {
        let mut stack = ReaderStack::new();
        stack.push(stream_name, source);
        Self::from_reader_stack(kernel, stack)
    }

    /// Build a lexer owning a fresh [`ReaderStack`].
    pub fn from_reader_stack(kernel: Arc<LexerKernel>, reader: ReaderStack) -> Self {
        Self::from_shared(kernel, Rc::new(RefCell::new(reader)))
    }

    /// Build a lexer over a [`ReaderStack`] shared with another lexer.
    ///
    /// Per spec §5, a `ReaderStack` may be shared across multiple `Lexer`s
    /// only in a strict sequential hand-off: this lexer and whichever other
    /// lexer(s) hold the same handle must never read concurrently.
    pub fn from_shared(kernel: Arc<LexerKernel>, reader: Rc<RefCell<ReaderStack>>) -> Self {
        Self { kernel, reader, pending: None, debug: false }
    }

    /// Toggle the per-token debug log sink (spec §6 Observability, §9).
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// A clone of this lexer's reader-stack handle, for composing a guest
    /// lexer (e.g. [`crate`]'s preprocessor layer pushing `#include`d
    /// sources) on top of the same stack.
    pub fn reader_handle(&self) -> Rc<RefCell<ReaderStack>> {
        Rc::clone(&self.reader)
    }

    pub fn kernel(&self) -> &Arc<LexerKernel> {
        &self.kernel
    }

    pub fn current_stream_name(&self) -> Option<String> {
        self.reader.borrow().current_stream_name().map(str::to_owned)
    }

    pub fn current_line_number(&self) -> Option<u32> {
        self.reader.borrow().current_line_number()
    }

    fn is_sentinel(c: char) -> bool {
        c == END_OF_STREAM || c == END_OF_LEXER
    }

    fn push_back(&mut self, c: char) {
        debug_assert!(self.pending.is_none(), "at most one pending lookahead character");
        self.pending = Some(c);
    }

    /// Read one character, preferring a pending lookahead, then the reader
    /// stack, synthesizing [`END_OF_LEXER`] when the stack itself is empty.
    fn raw_char(&mut self) -> LexResult<char> {
        if let Some(c) = self.pending.take() {
            return Ok(c);
        }
        if self.reader.borrow().is_empty() {
            return Ok(END_OF_LEXER);
        }
        let stream = self
            .reader
            .borrow()
            .current_stream_name()
            .unwrap_or_default()
            .to_string();
        let line = self.reader.borrow().current_line_number().unwrap_or(0);
        self.reader
            .borrow_mut()
            .read_char()
            .map_err(|source| LexError::Io { stream, line, source })
    }

    fn location(&self) -> TokenLoc {
        let r = self.reader.borrow();
        TokenLoc {
            stream: r.current_stream_name().unwrap_or_default().to_string(),
            line_text: r.current_line_text().unwrap_or_default().to_string(),
            line_number: r.current_line_number().unwrap_or(0),
        }
    }

    fn log_token(&self, tok: &Token) {
        if self.debug {
            log::debug!(
                target: "lexkit_lex::token",
                "{}:{} type={} lexeme={:?}",
                tok.stream_name,
                tok.line_number,
                tok.ty,
                tok.lexeme,
            );
        }
    }

    /// Produce the next token, or `Ok(None)` once every stream on the
    /// reader stack has ended (END_OF_LEXER).
    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if c == END_OF_LEXER {
                return Ok(None);
            }
            if c == END_OF_STREAM {
                let popped = self.reader.borrow_mut().pop();
                if let Some(stream) = popped {
                    let emit_break = self.kernel.include_stream_break();
                    let tok = emit_break.then(|| {
                        Token::new(
                            stream.name().to_string(),
                            "",
                            stream.line_text().to_string(),
                            stream.line_number(),
                            reserved::END_OF_STREAM,
                        )
                    });
                    drop(stream);
                    if let Some(t) = tok {
                        self.log_token(&t);
                        return Ok(Some(t));
                    }
                }
                continue;
            }
            if c == '\n' {
                if self.kernel.include_newlines() {
                    let loc = self.location();
                    let t = loc.token("", reserved::DELIM_NEWLINE);
                    self.log_token(&t);
                    return Ok(Some(t));
                }
                continue;
            }
            if c == ' ' {
                if self.kernel.include_spaces() {
                    let loc = self.location();
                    let t = loc.token(" ", reserved::DELIM_SPACE);
                    self.log_token(&t);
                    return Ok(Some(t));
                }
                continue;
            }
            if c == '\t' {
                if self.kernel.include_tabs() {
                    let loc = self.location();
                    let t = loc.token("\t", reserved::DELIM_TAB);
                    self.log_token(&t);
                    return Ok(Some(t));
                }
                continue;
            }
            if c.is_whitespace() {
                continue;
            }

            let loc = self.location();
            if let Some(tok) = self.dispatch(c, &loc)? {
                self.log_token(&tok);
                return Ok(Some(tok));
            }
            // A comment fully consumed without producing a token - loop
            // back to the top for the next real token.
        }
    }

    /// Dispatch on a fresh, non-whitespace, non-sentinel character. This is
    /// the total ordering from spec §4.2's "Dispatch precedence" table.
    fn dispatch(&mut self, c: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        if c == self.kernel.decimal_separator() {
            return if self.kernel.is_delim_start(c) {
                self.lex_point(c, loc)
            } else {
                self.lex_float_leading_point(c, loc)
            };
        }
        if let Some(ty) = self.kernel.special_type_for(c) {
            return self.lex_special(c, ty, loc);
        }
        if let Some(close) = self.kernel.string_close_for(c) {
            return self.lex_string(close, loc);
        }
        if self.kernel.is_delim_start(c) {
            return self.lex_delimiter(c, loc);
        }
        if c == '_' || unicode::is_ident_start(c) {
            return self.lex_identifier(c, loc);
        }
        if c == '0' {
            return self.lex_number_leading_zero(loc);
        }
        if c.is_ascii_digit() {
            return self.lex_number(c, loc);
        }
        self.lex_illegal(c, loc)
    }

    // ---- identifiers -------------------------------------------------

    fn lex_identifier(&mut self, first: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(first);
        loop {
            let c = self.raw_char()?;
            if !Self::is_sentinel(c) && unicode::is_ident_continue(c) {
                lexeme.push(c);
            } else {
                self.push_back(c);
                let ty = self.kernel.keyword_type(&lexeme).unwrap_or(reserved::IDENTIFIER);
                return Ok(Some(loc.token(lexeme, ty)));
            }
        }
    }

    // ---- special-prefix tokens ----------------------------------------

    fn lex_special(&mut self, first: char, ty: i32, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(first);
        loop {
            let c = self.raw_char()?;
            if Self::is_sentinel(c) || c.is_whitespace() {
                self.push_back(c);
                return Ok(Some(loc.token(lexeme, ty)));
            }
            lexeme.push(c);
        }
    }

    // ---- strings --------------------------------------------------------

    fn lex_string(&mut self, close: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        loop {
            let c = self.raw_char()?;
            if c == close {
                return Ok(Some(loc.token(lexeme, reserved::STRING)));
            }
            if c == '\n' || Self::is_sentinel(c) {
                self.push_back(c);
                return Ok(Some(loc.token(lexeme, reserved::ILLEGAL)));
            }
            if c == '\\' {
                match self.lex_string_escape(close)? {
                    Escape::Char(d) => lexeme.push(d),
                    Escape::Illegal(suffix) => {
                        lexeme.push('\\');
                        lexeme.push_str(&suffix);
                        return Ok(Some(loc.token(lexeme, reserved::ILLEGAL)));
                    }
                }
                continue;
            }
            lexeme.push(c);
        }
    }

    fn lex_string_escape(&mut self, close: char) -> LexResult<Escape> {
        let c = self.raw_char()?;
        let decoded = match c {
            '0' => '\0',
            'b' => '\u{0008}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{000C}',
            'r' => '\r',
            '/' => '/',
            '\\' => '\\',
            c if c == close => close,
            'u' => return self.lex_unicode_escape('u', 4),
            'x' => return self.lex_unicode_escape('x', 2),
            other if Self::is_sentinel(other) => {
                self.push_back(other);
                return Ok(Escape::Illegal(String::new()));
            }
            other => return Ok(Escape::Illegal(other.to_string())),
        };
        Ok(Escape::Char(decoded))
    }

    fn lex_unicode_escape(&mut self, prefix: char, digits: usize) -> LexResult<Escape> {
        let mut hex = String::new();
        for _ in 0..digits {
            let d = self.raw_char()?;
            if Self::is_sentinel(d) {
                self.push_back(d);
                return Ok(Escape::Illegal(format!("{prefix}{hex}")));
            }
            if !d.is_ascii_hexdigit() {
                hex.push(d);
                return Ok(Escape::Illegal(format!("{prefix}{hex}")));
            }
            hex.push(d);
        }
        let code = u32::from_str_radix(&hex, 16).expect("validated hex digits");
        match char::from_u32(code) {
            Some(ch) => Ok(Escape::Char(ch)),
            None => Ok(Escape::Illegal(format!("{prefix}{hex}"))),
        }
    }

    // ---- delimiters and comments ---------------------------------------

    fn lex_delimiter(&mut self, first: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(first);
        loop {
            let c = self.raw_char()?;
            if Self::is_sentinel(c) {
                self.push_back(c);
                let ty = self.kernel.delim_finalize_type(&lexeme).unwrap_or(reserved::ILLEGAL);
                return Ok(Some(loc.token(lexeme, ty)));
            }
            let extended = format!("{lexeme}{c}");
            if self.kernel.has_delim_prefix(&extended) {
                if self.kernel.is_comment_start(&extended) {
                    return self.lex_comment(loc);
                }
                if self.kernel.is_comment_line_start(&extended) {
                    return self.lex_line_comment();
                }
                lexeme = extended;
                continue;
            }
            self.push_back(c);
            let ty = self.kernel.delim_finalize_type(&lexeme).unwrap_or(reserved::ILLEGAL);
            return Ok(Some(loc.token(lexeme, ty)));
        }
    }

    /// Consumes a block comment. Returns `Ok(None)` once it closes (or the
    /// stream ends, per §9 silently) so the caller loops for a real token.
    fn lex_comment(&mut self, _loc: &TokenLoc) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if Self::is_sentinel(c) {
                self.push_back(c);
                return Ok(None);
            }
            if self.kernel.is_end_comment_delim_start(c) {
                if self.lex_delim_comment(c)? {
                    return Ok(None);
                }
            }
        }
    }

    /// Tentative block-comment-end candidate (DELIM_COMMENT). Returns
    /// `true` once the full closer is recognized.
    fn lex_delim_comment(&mut self, first: char) -> LexResult<bool> {
        let mut candidate = String::new();
        candidate.push(first);
        loop {
            if self.kernel.comment_end_exact(&candidate) {
                return Ok(true);
            }
            let c = self.raw_char()?;
            if Self::is_sentinel(c) {
                self.push_back(c);
                return Ok(false);
            }
            let extended = format!("{candidate}{c}");
            if self.kernel.has_comment_end_prefix(&extended) {
                candidate = extended;
                continue;
            }
            if c.is_whitespace() {
                return Ok(false);
            }
            if self.kernel.is_end_comment_delim_start(c) {
                candidate = c.to_string();
                continue;
            }
            return Ok(false);
        }
    }

    fn lex_line_comment(&mut self) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if c == '\n' {
                return Ok(None);
            }
            if Self::is_sentinel(c) {
                self.push_back(c);
                return Ok(None);
            }
        }
    }

    // ---- numbers --------------------------------------------------------

    fn lex_number(&mut self, first: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(first);
        self.lex_decimal_digits(lexeme, loc, false, false)
    }

    fn lex_number_leading_zero(&mut self, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let lexeme = String::from("0");
        let c = self.raw_char()?;
        match c {
            'x' | 'X' => {
                let mut lexeme = lexeme;
                lexeme.push(c);
                let d = self.raw_char()?;
                if !Self::is_sentinel(d) && d.is_ascii_hexdigit() {
                    lexeme.push(d);
                    self.lex_hex_digits(lexeme, loc)
                } else {
                    self.push_back(d);
                    Ok(Some(loc.token(lexeme, reserved::ILLEGAL)))
                }
            }
            c if c.is_ascii_digit() => {
                let mut lexeme = lexeme;
                lexeme.push(c);
                self.lex_decimal_digits(lexeme, loc, false, false)
            }
            c if c == self.kernel.decimal_separator() => self.lex_float_after_point(lexeme, loc),
            'e' | 'E' => self.lex_exponent(lexeme, c, loc),
            c if !Self::is_sentinel(c) && (c == '_' || unicode::is_ident_start(c)) => {
                let mut lexeme = lexeme;
                lexeme.push(c);
                self.lex_illegal_run(lexeme, loc)
            }
            c => {
                self.push_back(c);
                Ok(Some(loc.token(lexeme, reserved::NUMBER)))
            }
        }
    }

    fn lex_hex_digits(&mut self, mut lexeme: String, loc: &TokenLoc) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if !Self::is_sentinel(c) && c.is_ascii_hexdigit() {
                lexeme.push(c);
            } else {
                self.push_back(c);
                return Ok(Some(loc.token(lexeme, reserved::NUMBER)));
            }
        }
    }

    /// Accumulates a run of decimal digits, branching into a fraction or
    /// exponent as those markers appear. `floating` is true once a decimal
    /// point or exponent has been seen - at that point a trailing
    /// identifier-start character makes the whole thing ILLEGAL rather than
    /// splitting into NUMBER + IDENTIFIER (unlike a bare integer).
    fn lex_decimal_digits(
        &mut self,
        mut lexeme: String,
        loc: &TokenLoc,
        floating: bool,
        seen_exponent: bool,
    ) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if !Self::is_sentinel(c) && c.is_ascii_digit() {
                lexeme.push(c);
                continue;
            }
            if !floating && c == self.kernel.decimal_separator() {
                return self.lex_float_after_point(lexeme, loc);
            }
            if !seen_exponent && (c == 'e' || c == 'E') {
                return self.lex_exponent(lexeme, c, loc);
            }
            if floating && !Self::is_sentinel(c) && (c == '_' || unicode::is_ident_start(c)) {
                lexeme.push(c);
                return self.lex_illegal_run(lexeme, loc);
            }
            self.push_back(c);
            return Ok(Some(loc.token(lexeme, reserved::NUMBER)));
        }
    }

    fn lex_float_after_point(&mut self, mut lexeme: String, loc: &TokenLoc) -> LexResult<Option<Token>> {
        lexeme.push(self.kernel.decimal_separator());
        loop {
            let c = self.raw_char()?;
            if !Self::is_sentinel(c) && c.is_ascii_digit() {
                lexeme.push(c);
                continue;
            }
            if c == 'e' || c == 'E' {
                return self.lex_exponent(lexeme, c, loc);
            }
            if !Self::is_sentinel(c) && (c == '_' || unicode::is_ident_start(c)) {
                lexeme.push(c);
                return self.lex_illegal_run(lexeme, loc);
            }
            self.push_back(c);
            return Ok(Some(loc.token(lexeme, reserved::NUMBER)));
        }
    }

    fn lex_exponent(&mut self, mut lexeme: String, e_char: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        lexeme.push(e_char);
        let mut c = self.raw_char()?;
        if c == '+' || c == '-' {
            lexeme.push(c);
            c = self.raw_char()?;
        }
        if !Self::is_sentinel(c) && c.is_ascii_digit() {
            lexeme.push(c);
            return self.lex_decimal_digits(lexeme, loc, true, true);
        }
        self.push_back(c);
        Ok(Some(loc.token(lexeme, reserved::ILLEGAL)))
    }

    fn lex_float_leading_point(&mut self, sep: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(sep);
        let c = self.raw_char()?;
        if !Self::is_sentinel(c) && c.is_ascii_digit() {
            lexeme.push(c);
            return self.lex_decimal_digits(lexeme, loc, true, false);
        }
        self.push_back(c);
        Ok(Some(loc.token(lexeme, reserved::ILLEGAL)))
    }

    fn lex_point(&mut self, sep: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let c = self.raw_char()?;
        if !Self::is_sentinel(c) && c.is_ascii_digit() {
            let mut lexeme = String::new();
            lexeme.push(sep);
            lexeme.push(c);
            return self.lex_decimal_digits(lexeme, loc, true, false);
        }
        self.push_back(c);
        self.lex_delimiter(sep, loc)
    }

    // ---- illegal ----------------------------------------------------

    fn lex_illegal(&mut self, first: char, loc: &TokenLoc) -> LexResult<Option<Token>> {
        let mut lexeme = String::new();
        lexeme.push(first);
        self.lex_illegal_run(lexeme, loc)
    }

    /// Absorbs a run of identifier-continue characters into an already
    /// broken lexeme, so e.g. `0a1b` or `3.5e3x` surface as one ILLEGAL
    /// token rather than silently splitting at the first offending char.
    fn lex_illegal_run(&mut self, mut lexeme: String, loc: &TokenLoc) -> LexResult<Option<Token>> {
        loop {
            let c = self.raw_char()?;
            if !Self::is_sentinel(c) && unicode::is_ident_continue(c) {
                lexeme.push(c);
            } else {
                self.push_back(c);
                return Ok(Some(loc.token(lexeme, reserved::ILLEGAL)));
            }
        }
    }
}
