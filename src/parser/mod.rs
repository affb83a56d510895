//! C- source code parser
//!
//! This module transforms C- source text into a syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens, one at a time)
//! - [`parse`]: Parsing (tokens → syntax tree)
//! - [`ast`]: Syntax tree node definitions
//!
//! # Supported Language
//!
//! C- is a small teaching subset of C:
//! - Types: `int` and `void`; scalar variables and one-dimensional arrays
//! - Declarations: global variables, functions, array parameters (`a[]`)
//! - Statements: compound, `if`/`else`, `while`, `return`, expression statements
//! - Expressions: `=`, relational operators, `+ - * /`, calls, indexing
//! - Comments: `/* ... */` only
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent with a single token of
//! lookahead. No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;
