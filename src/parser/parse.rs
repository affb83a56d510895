//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive recursive descent parser with exactly one token
//! of lookahead. Tokens are pulled from the [`Lexer`] only when the current
//! one has been consumed, so the parser never buffers more than one token.
//!
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: global and local declarations, parameters
//! - `statements`: compound, selection, iteration, return and expression statements
//! - `expressions`: assignment and the relational/additive/multiplicative cascade
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The first syntax error ends the parse: every production returns
//! `Result<_, ParseError>` and propagates failures with `?`, so no partial
//! tree is ever handed back to the caller.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;

/// Deepest nesting of statements and expressions the parser accepts
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// The lookahead token when the error was detected
    pub token: Token,
}

impl ParseError {
    pub fn new(message: impl Into<String>, token: Token) -> Self {
        ParseError {
            message: message.into(),
            token,
        }
    }

    pub fn location(&self) -> SourceLocation {
        self.token.location
    }

    pub fn line(&self) -> usize {
        self.location().line
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        write!(
            f,
            "Syntax error at line {}, column {}: {} (found {})",
            location.line, location.column, self.message, self.token
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser for C-
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Token,
    /// Statements and expressions currently being parsed, innermost included
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser and scan its first lookahead token
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
        }
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        // The declaration list only stops at end of file
        let declarations = self.parse_declaration_list()?;
        Ok(Program { declarations })
    }

    /// The current lookahead token
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    // ===== Helper methods =====

    /// Line of the lookahead token; nodes record this when they are created
    pub(crate) fn current_line(&self) -> usize {
        self.current.location.line
    }

    /// Check if the lookahead has the given kind
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Consume the lookahead unconditionally, returning it
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Consume the lookahead if it has the given kind
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the lookahead, which must have the expected kind
    pub(crate) fn expect_token(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("expected {}", expected)))
        }
    }

    /// Consume an identifier and return its name
    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        Ok(self.expect_token(TokenKind::Id)?.lexeme)
    }

    /// Enter one more level of nesting, failing past [`MAX_NESTING_DEPTH`]
    pub(crate) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(format!(
                "nesting too deep (more than {} levels)",
                MAX_NESTING_DEPTH
            )));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth -= 1;
    }

    /// Build an error pointing at the lookahead token
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.current.clone())
    }
}
