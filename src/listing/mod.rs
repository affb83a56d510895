//! Diagnostic listing output
//!
//! A [`Listing`] accumulates everything one run reports about a source file:
//!
//! - a header naming the file
//! - in scanner-only mode, one row per token with its line, kind and lexeme
//! - in parser mode, the printed syntax tree (see [`tree`])
//! - on a syntax error, the offending line and lookahead token
//!
//! The listing is plain text; the driver writes it to stdout.

pub mod tree;

use crate::parser::ast::Program;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::parse::ParseError;
use std::fmt;

pub use tree::{print_tree, tree_rows, TreeRow};

/// Column header of the scanner-only listing
pub const TOKEN_TABLE_HEADER: &str = "\tline number\t\ttoken\t\tlexeme";

/// Rule under [`TOKEN_TABLE_HEADER`]
pub const TOKEN_TABLE_RULE: &str =
    "==========================================================";

/// Text accumulated for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    text: String,
}

impl Listing {
    /// Start a listing with the compilation header for `source_name`
    pub fn new(source_name: &str) -> Self {
        Listing {
            text: format!("\nC- COMPILATION: {}\n", source_name),
        }
    }

    /// Scanner-only mode: one row per token through end of file
    pub fn tokens(&mut self, lexer: &mut Lexer) -> &mut Self {
        self.text.push_str(TOKEN_TABLE_HEADER);
        self.text.push('\n');
        self.text.push_str(TOKEN_TABLE_RULE);
        self.text.push('\n');

        for token in lexer.tokenize() {
            self.text.push_str(&token_row(&token));
            self.text.push('\n');
        }
        self
    }

    /// Parser mode: the printed syntax tree
    pub fn syntax_tree(&mut self, program: &Program) -> &mut Self {
        self.text.push_str("\nSyntax tree:\n");
        self.text.push_str(&print_tree(&program.declarations));
        self
    }

    /// The report for the syntax error that ended the parse
    pub fn syntax_error(&mut self, err: &ParseError) -> &mut Self {
        self.text.push_str(&format!(
            "\nSyntax error at line {}: {}\n",
            err.line(),
            err.message
        ));
        self.text
            .push_str(&format!("\nCurrent token: {}\n", trace_token(&err.token)));
        self
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Token table column: reserved words in capitals, operators as spelled
fn token_class(kind: TokenKind) -> String {
    match kind {
        TokenKind::Id => "ID".to_string(),
        TokenKind::Num => "NUM".to_string(),
        TokenKind::EndFile => "EOF".to_string(),
        TokenKind::Error => "ERROR:".to_string(),
        kind if kind.is_reserved_word() => {
            kind.symbol().unwrap_or_default().to_ascii_uppercase()
        }
        kind => kind.symbol().unwrap_or_default().to_string(),
    }
}

/// One row of the scanner-only listing
pub fn token_row(token: &Token) -> String {
    match token.kind {
        TokenKind::EndFile => format!("\t{}\t\tEOF", token.line()),
        kind => format!(
            "\t{}\t\t{}\t\t{}",
            token.line(),
            token_class(kind),
            token.lexeme
        ),
    }
}

/// A token as shown in parse traces and syntax error reports
pub fn trace_token(token: &Token) -> String {
    match token.kind {
        TokenKind::Id => format!("ID, name= {}", token.lexeme),
        TokenKind::Num => format!("NUM, val= {}", token.lexeme),
        TokenKind::Error => format!("ERROR: {}", token.lexeme),
        TokenKind::EndFile => "EOF".to_string(),
        kind => kind.symbol().unwrap_or_default().to_string(),
    }
}
