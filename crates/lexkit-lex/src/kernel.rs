//! LexerKernel (C1): the immutable-after-configuration table of delimiters,
//! comments, string pairs, special-prefix characters, and keywords that
//! drives the [`crate::lexer::Lexer`] state machine.
//!
//! A kernel is assembled with [`LexerKernelBuilder`] and then frozen. Once
//! built it is read-only and may be shared (by reference, or wrapped in
//! `Arc`) across multiple `Lexer` instances.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

/// Configuration for a [`crate::lexer::Lexer`].
///
/// All user-assigned types stored in this kernel's tables must be
/// non-negative; the reserved negative range is owned by
/// [`crate::token::reserved`].
#[derive(Clone, Debug)]
pub struct LexerKernel {
    pub(crate) delim_start: BTreeSet<char>,
    pub(crate) delim_table: FxHashMap<String, i32>,
    pub(crate) comment_start_table: FxHashMap<String, i32>,
    pub(crate) comment_end_table: FxHashMap<String, i32>,
    pub(crate) comment_line_table: FxHashMap<String, i32>,
    pub(crate) end_comment_delim_start: BTreeSet<char>,
    pub(crate) string_delim_table: FxHashMap<char, char>,
    pub(crate) special_delim_table: FxHashMap<char, i32>,
    pub(crate) keyword_table: FxHashMap<String, i32>,
    pub(crate) case_insensitive_keyword_table: FxHashMap<String, i32>,
    pub(crate) decimal_separator: char,
    pub(crate) include_spaces: bool,
    pub(crate) include_tabs: bool,
    pub(crate) include_newlines: bool,
    pub(crate) include_stream_break: bool,
}

impl LexerKernel {
    /// Start building a new kernel.
    pub fn builder() -> LexerKernelBuilder {
        LexerKernelBuilder::new()
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn include_spaces(&self) -> bool {
        self.include_spaces
    }

    pub fn include_tabs(&self) -> bool {
        self.include_tabs
    }

    pub fn include_newlines(&self) -> bool {
        self.include_newlines
    }

    pub fn include_stream_break(&self) -> bool {
        self.include_stream_break
    }

    pub(crate) fn is_delim_start(&self, c: char) -> bool {
        self.delim_start.contains(&c)
    }

    pub(crate) fn is_end_comment_delim_start(&self, c: char) -> bool {
        self.end_comment_delim_start.contains(&c)
    }

    pub(crate) fn string_close_for(&self, open: char) -> Option<char> {
        self.string_delim_table.get(&open).copied()
    }

    pub(crate) fn special_type_for(&self, c: char) -> Option<i32> {
        self.special_delim_table.get(&c).copied()
    }

    pub(crate) fn keyword_type(&self, lexeme: &str) -> Option<i32> {
        if let Some(&ty) = self.keyword_table.get(lexeme) {
            return Some(ty);
        }
        let lower = lexeme.to_lowercase();
        self.case_insensitive_keyword_table.get(&lower).copied()
    }

    /// True if `prefix` extended one more character could still match some
    /// delimiter, comment-start, or comment-line entry (maximal-munch probe).
    pub(crate) fn has_delim_prefix(&self, prefix: &str) -> bool {
        self.delim_table.keys().any(|k| k.starts_with(prefix))
            || self.comment_start_table.keys().any(|k| k.starts_with(prefix))
            || self.comment_line_table.keys().any(|k| k.starts_with(prefix))
    }

    /// True if `candidate` could still extend into some `comment_end_table` entry.
    pub(crate) fn has_comment_end_prefix(&self, candidate: &str) -> bool {
        self.comment_end_table.keys().any(|k| k.starts_with(candidate))
    }

    pub(crate) fn comment_end_exact(&self, candidate: &str) -> bool {
        self.comment_end_table.contains_key(candidate)
    }

    /// Resolve a finished DELIMITER lexeme's type: comment-start, then
    /// comment-end, then comment-line, then plain delimiter.
    pub(crate) fn delim_finalize_type(&self, lexeme: &str) -> Option<i32> {
        self.comment_start_table
            .get(lexeme)
            .or_else(|| self.comment_end_table.get(lexeme))
            .or_else(|| self.comment_line_table.get(lexeme))
            .or_else(|| self.delim_table.get(lexeme))
            .copied()
    }

    pub(crate) fn is_comment_start(&self, lexeme: &str) -> bool {
        self.comment_start_table.contains_key(lexeme)
    }

    pub(crate) fn is_comment_line_start(&self, lexeme: &str) -> bool {
        self.comment_line_table.contains_key(lexeme)
    }
}

/// Fluent builder for [`LexerKernel`].
///
/// # Example
///
/// ```
/// use lexkit_lex::kernel::LexerKernel;
///
/// let kernel = LexerKernel::builder()
///     .delimiter("+", 1)
///     .delimiter("+=", 2)
///     .string_delim('"', '"')
///     .keyword("let", 100)
///     .include_newlines(false)
///     .build();
/// ```
#[derive(Clone, Debug, Default)]
pub struct LexerKernelBuilder {
    delim_table: FxHashMap<String, i32>,
    comment_start_table: FxHashMap<String, i32>,
    comment_end_table: FxHashMap<String, i32>,
    comment_line_table: FxHashMap<String, i32>,
    string_delim_table: FxHashMap<char, char>,
    special_delim_table: FxHashMap<char, i32>,
    keyword_table: FxHashMap<String, i32>,
    case_insensitive_keyword_table: FxHashMap<String, i32>,
    decimal_separator: Option<char>,
    include_spaces: bool,
    include_tabs: bool,
    include_newlines: bool,
    include_stream_break: bool,
}

impl LexerKernelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a delimiter lexeme and its user type.
    pub fn delimiter(mut self, lexeme: impl Into<String>, ty: i32) -> Self {
        self.delim_table.insert(lexeme.into(), ty);
        self
    }

    /// Register a block-comment opener. Also registers it as a plain
    /// delimiter so the DELIMITER accumulator discovers it (spec invariant).
    pub fn comment_start(mut self, lexeme: impl Into<String>, ty: i32) -> Self {
        let lexeme = lexeme.into();
        self.comment_start_table.insert(lexeme.clone(), ty);
        self.delim_table.insert(lexeme, ty);
        self
    }

    /// Register a block-comment closer.
    pub fn comment_end(mut self, lexeme: impl Into<String>, ty: i32) -> Self {
        let lexeme = lexeme.into();
        self.comment_end_table.insert(lexeme.clone(), ty);
        self.delim_table.insert(lexeme, ty);
        self
    }

    /// Register a line-comment opener.
    pub fn comment_line(mut self, lexeme: impl Into<String>, ty: i32) -> Self {
        let lexeme = lexeme.into();
        self.comment_line_table.insert(lexeme.clone(), ty);
        self.delim_table.insert(lexeme, ty);
        self
    }

    /// Register a string-quote pair: opening character to closing character.
    pub fn string_delim(mut self, open: char, close: char) -> Self {
        self.string_delim_table.insert(open, close);
        self
    }

    /// Register a single-character special prefix and its user type.
    /// Special-prefix tokens take precedence over string and delimiter
    /// processing.
    pub fn special(mut self, c: char, ty: i32) -> Self {
        self.special_delim_table.insert(c, ty);
        self
    }

    /// Register a case-sensitive keyword.
    pub fn keyword(mut self, word: impl Into<String>, ty: i32) -> Self {
        self.keyword_table.insert(word.into(), ty);
        self
    }

    /// Register a case-insensitive keyword. Stored lower-cased; lookups
    /// lower-case the candidate lexeme before probing.
    pub fn case_insensitive_keyword(mut self, word: impl AsRef<str>, ty: i32) -> Self {
        self.case_insensitive_keyword_table
            .insert(word.as_ref().to_lowercase(), ty);
        self
    }

    pub fn decimal_separator(mut self, c: char) -> Self {
        self.decimal_separator = Some(c);
        self
    }

    pub fn include_spaces(mut self, yes: bool) -> Self {
        self.include_spaces = yes;
        self
    }

    pub fn include_tabs(mut self, yes: bool) -> Self {
        self.include_tabs = yes;
        self
    }

    pub fn include_newlines(mut self, yes: bool) -> Self {
        self.include_newlines = yes;
        self
    }

    pub fn include_stream_break(mut self, yes: bool) -> Self {
        self.include_stream_break = yes;
        self
    }

    /// Freeze the configuration into a [`LexerKernel`].
    pub fn build(self) -> LexerKernel {
        let delim_start = self.delim_table.keys().filter_map(|k| k.chars().next()).collect();
        let end_comment_delim_start = self
            .comment_end_table
            .keys()
            .filter_map(|k| k.chars().next())
            .collect();

        LexerKernel {
            delim_start,
            delim_table: self.delim_table,
            comment_start_table: self.comment_start_table,
            comment_end_table: self.comment_end_table,
            comment_line_table: self.comment_line_table,
            end_comment_delim_start,
            string_delim_table: self.string_delim_table,
            special_delim_table: self.special_delim_table,
            keyword_table: self.keyword_table,
            case_insensitive_keyword_table: self.case_insensitive_keyword_table,
            decimal_separator: self.decimal_separator.unwrap_or('.'),
            include_spaces: self.include_spaces,
            include_tabs: self.include_tabs,
            include_newlines: self.include_newlines,
            include_stream_break: self.include_stream_break,
        }
    }
}
