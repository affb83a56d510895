//! # Introduction
//!
//! cminus is a front end for C-, the small C-like teaching language: a
//! hand-written lexer and predictive recursive-descent parser that turn a
//! source file into a syntax tree, and a listing facility that prints the
//! tokens or the tree for inspection.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Syntax tree → Listing / TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source on demand and builds the tree. The
//!    first syntax error ends the parse with a [`parser::parse::ParseError`].
//! 2. [`listing`]: the text report (compilation header, token table,
//!    printed tree, syntax error block).
//! 3. [`ui`]: ratatui-based viewer showing the source next to the tree; not
//!    part of the stable library API.
//! 4. [`options`]: command-line handling for the `cminus` binary.
//!
//! ## Example
//!
//! ```
//! use cminus::listing::print_tree;
//! use cminus::parser::parse::Parser;
//!
//! let program = Parser::new("int main(void) { return 1 + 2 * 3; }")
//!     .parse_program()
//!     .unwrap();
//! let text = print_tree(&program.declarations);
//! assert!(text.starts_with("  Function Declare : main\n  Type : int\n"));
//! ```

pub mod listing;
pub mod options;
pub mod parser;
pub mod ui;
