//! Statement parsing implementation
//!
//! This module handles parsing of all C- statement types:
//!
//! - Compound statements: `{ local declarations; statements }`
//! - Control flow: `if`/`else`, `while`
//! - Jump statements: `return`
//! - Expression statements, including the empty statement `;`
//!
//! # Grammar
//!
//! ```text
//! compound_stmt  ::= "{" var_declaration* statement* "}"
//! statement      ::= selection_stmt | iteration_stmt | return_stmt
//!                  | compound_stmt | expression_stmt
//! selection_stmt ::= "if" "(" expression ")" statement [ "else" statement ]
//! iteration_stmt ::= "while" "(" expression ")" statement
//! return_stmt    ::= "return" [ expression ] ";"
//! expression_stmt ::= [ expression ] ";"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse compound statement: `{ locals statements }`
    pub(crate) fn parse_compound_statement(&mut self) -> Result<TreeNode, ParseError> {
        let line = self.current_line();
        self.expect_token(TokenKind::LBrace)?;

        let locals = self.parse_local_declarations()?;
        let statements = self.parse_statement_list()?;

        self.expect_token(TokenKind::RBrace)?;

        Ok(TreeNode::new(NodeKind::Compound { locals, statements }, line))
    }

    /// Parse the declarations at the top of a compound statement
    fn parse_local_declarations(&mut self) -> Result<Vec<TreeNode>, ParseError> {
        let mut locals = Vec::new();

        while self.check(TokenKind::Int) || self.check(TokenKind::Void) {
            locals.push(self.parse_var_declaration()?);
        }

        Ok(locals)
    }

    /// Parse statements up to the closing brace (not consumed)
    fn parse_statement_list(&mut self) -> Result<Vec<TreeNode>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RBrace) {
            if let Some(stmt) = self.parse_statement()? {
                statements.push(stmt);
            }
        }

        Ok(statements)
    }

    /// Parse a statement. The empty statement `;` yields no node.
    pub(crate) fn parse_statement(&mut self) -> Result<Option<TreeNode>, ParseError> {
        self.enter_nested()?;
        let stmt = match self.current.kind {
            TokenKind::If => self.parse_selection_statement().map(Some),
            TokenKind::While => self.parse_iteration_statement().map(Some),
            TokenKind::Return => self.parse_return_statement().map(Some),
            TokenKind::LBrace => self.parse_compound_statement().map(Some),
            TokenKind::Id | TokenKind::LParen | TokenKind::Num | TokenKind::Semi => {
                self.parse_expression_statement()
            }
            _ => Err(self.error("expected a statement")),
        };
        self.leave_nested();
        stmt
    }

    /// Parse expression statement: `expression ;` or `;`
    fn parse_expression_statement(&mut self) -> Result<Option<TreeNode>, ParseError> {
        if self.match_token(TokenKind::Semi) {
            return Ok(None);
        }

        let expr = self.parse_expression()?;
        self.expect_token(TokenKind::Semi)?;
        Ok(Some(expr))
    }

    /// Parse if statement
    fn parse_selection_statement(&mut self) -> Result<TreeNode, ParseError> {
        let line = self.current_line();

        self.expect_token(TokenKind::If)?;
        self.expect_token(TokenKind::LParen)?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_token(TokenKind::RParen)?;

        let then_branch = self.parse_statement()?.map(Box::new);

        // A trailing else binds to the innermost if
        let else_branch = if self.match_token(TokenKind::Else) {
            self.parse_statement()?.map(Box::new)
        } else {
            None
        };

        Ok(TreeNode::new(
            NodeKind::Selection {
                condition,
                then_branch,
                else_branch,
            },
            line,
        ))
    }

    /// Parse while statement
    fn parse_iteration_statement(&mut self) -> Result<TreeNode, ParseError> {
        let line = self.current_line();

        self.expect_token(TokenKind::While)?;
        self.expect_token(TokenKind::LParen)?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_token(TokenKind::RParen)?;

        let body = self.parse_statement()?.map(Box::new);

        Ok(TreeNode::new(NodeKind::Iteration { condition, body }, line))
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<TreeNode, ParseError> {
        let line = self.current_line();
        self.expect_token(TokenKind::Return)?;

        let value = if self.check(TokenKind::Semi) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect_token(TokenKind::Semi)?;

        Ok(TreeNode::new(NodeKind::Return { value }, line))
    }
}
