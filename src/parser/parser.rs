//! Recursive descent parser state for ADQL
//!
//! Holds the token stream of one query and the helpers shared by the
//! grammar functions in [`super::grammar`]: token inspection, consumption,
//! speculation (checkpoint/rewind) and error construction.

use std::cell::RefCell;

use text_size::TextRange;

use super::errors::{ErrorCode, ParseError};
use super::keywords::{is_reserved, reserved_word_hint};
use super::lexer::{Token, tokenize};
use super::syntax_kind::TokenKind;
use super::AdqlVersion;
use crate::base::{LineIndex, TextPosition};
use crate::syntax::{Identifier, Operand};

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Saved parser position, to rewind a failed speculative parse
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    pos: usize,
    expected: Vec<&'static str>,
}

/// The parser state
pub(crate) struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    version: AdqlVersion,
    index: LineIndex<'a>,
    /// Descriptions of the tokens tested at the current position
    expected: RefCell<Vec<&'static str>>,
}

impl<'a> Parser<'a> {
    /// Tokenize `input` for the grammar of `version`
    ///
    /// Keywords the grammar of `version` does not know are turned into
    /// plain identifier candidates.
    pub(crate) fn new(input: &'a str, version: AdqlVersion) -> PResult<Self> {
        let mut tokens = tokenize(input, false)?;
        for token in &mut tokens {
            if token.kind.is_keyword() && !token.kind.is_available_in(version) {
                token.kind = TokenKind::IDENT;
            }
        }
        Ok(Self {
            tokens,
            pos: 0,
            version,
            index: LineIndex::new(input),
            expected: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn version(&self) -> AdqlVersion {
        self.version
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    pub(crate) fn current(&self) -> &Token<'a> {
        self.nth_token(0)
    }

    fn nth_token(&self, n: usize) -> &Token<'a> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Kind of the current token, without recording it as expected
    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the nth token ahead
    pub(crate) fn nth(&self, n: usize) -> TokenKind {
        self.nth_token(n).kind
    }

    pub(crate) fn text(&self) -> &'a str {
        self.current().text
    }

    /// Whether the current token is of the given kind (recorded as expected)
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.expected.borrow_mut().push(kind.describe());
        self.kind() == kind
    }

    /// Whether the current token is the given word, as an identifier
    /// candidate (e.g. type names of `CAST`)
    pub(crate) fn at_word(&self, word: &'static str, description: &'static str) -> bool {
        self.expected.borrow_mut().push(description);
        self.kind() == TokenKind::IDENT && self.text().eq_ignore_ascii_case(word)
    }

    /// Record expected token descriptions without testing them
    pub(crate) fn record(&self, descriptions: &[&'static str]) {
        self.expected.borrow_mut().extend_from_slice(descriptions);
    }

    /// Whether the current token can be read as an identifier
    pub(crate) fn at_identifier(&self) -> bool {
        self.record(&[TokenKind::IDENT.describe(), TokenKind::DELIMITED_IDENT.describe()]);
        self.is_identifier(0)
    }

    /// Whether the nth token ahead can be read as an identifier
    pub(crate) fn is_identifier(&self, n: usize) -> bool {
        let token = self.nth_token(n);
        match token.kind {
            TokenKind::DELIMITED_IDENT => true,
            TokenKind::IDENT => !is_reserved(token.text, self.version),
            _ => false,
        }
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(crate) fn bump(&mut self) -> Token<'a> {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        self.expected.borrow_mut().clear();
        token
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Token<'a>> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected())
        }
    }

    pub(crate) fn identifier(&mut self) -> PResult<Identifier> {
        if self.at_identifier() {
            Ok(Identifier::from_token_text(self.bump().text))
        } else {
            Err(self.unexpected())
        }
    }

    /// `ident (. ident)*`, at most `max` parts
    pub(crate) fn identifier_chain(&mut self, max: usize) -> PResult<Vec<Identifier>> {
        let mut parts = vec![self.identifier()?];
        while parts.len() < max && self.kind() == TokenKind::DOT && self.is_identifier(1) {
            self.bump();
            parts.push(self.identifier()?);
        }
        Ok(parts)
    }

    // =========================================================================
    // Speculation
    // =========================================================================

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            expected: self.expected.borrow().clone(),
        }
    }

    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        *self.expected.borrow_mut() = checkpoint.expected;
    }

    // =========================================================================
    // Positions
    // =========================================================================

    pub(crate) fn token_index(&self) -> usize {
        self.pos
    }

    /// Position of the tokens consumed since `start`
    pub(crate) fn span_from(&self, start: usize) -> Option<TextPosition> {
        if self.pos <= start {
            return None;
        }
        let range = TextRange::new(
            self.tokens[start].range.start(),
            self.tokens[self.pos - 1].range.end(),
        );
        Some(self.index.position(range))
    }

    pub(crate) fn current_position(&self) -> TextPosition {
        self.index.position(self.current().range)
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Error for the current token, listing what was expected instead
    pub(crate) fn unexpected(&self) -> ParseError {
        let mut expected: Vec<&'static str> = Vec::new();
        for description in self.expected.borrow().iter() {
            if !expected.contains(description) {
                expected.push(description);
            }
        }
        let expecting = if expected.is_empty() {
            String::new()
        } else {
            format!(" Was expecting one of: {}", expected.join(", "))
        };

        let token = self.current();
        let position = self.current_position();
        if token.kind == TokenKind::EOF {
            return ParseError::at(
                format!("Unexpected end of query!{expecting}"),
                Some(position),
                ErrorCode::E0202,
            );
        }

        let error = ParseError::at(
            format!("Encountered \"{}\".{expecting}", token.text),
            Some(position),
            ErrorCode::E0201,
        );
        let hint = match token.kind {
            TokenKind::IDENT => reserved_word_hint(token.text, self.version, false),
            kind if kind.is_keyword() => reserved_word_hint(token.text, self.version, true),
            _ => None,
        };
        match hint {
            Some(hint) => error.with_hint(hint),
            None => error,
        }
    }

    /// Error at a given operand or construct
    pub(crate) fn error_at(
        &self,
        message: impl Into<String>,
        position: Option<TextPosition>,
        code: ErrorCode,
    ) -> ParseError {
        ParseError::at(message, position.or(Some(self.current_position())), code)
    }

    pub(crate) fn type_mismatch(&self, operand: &Operand, expected: &str, code: ErrorCode) -> ParseError {
        self.error_at(
            format!("Type mismatch! A {expected} value was expected instead of \"{operand}\"."),
            operand.position,
            code,
        )
    }
}
