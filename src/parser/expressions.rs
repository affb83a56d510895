//! Expression parsing implementation
//!
//! This module handles parsing of C- expressions with a classic precedence
//! cascade, one procedure per level:
//!
//! | Level          | Operators               | Associativity  |
//! |----------------|-------------------------|----------------|
//! | assignment     | `=`                     | right          |
//! | simple         | `< <= > >= == !=`       | non-associative|
//! | additive       | `+ -`                   | left           |
//! | term           | `* /`                   | left           |
//! | factor         | `( )`, numbers, variables, calls |       |
//!
//! An expression that starts with an identifier is parsed as a variable or
//! call first; only then does the lookahead tell whether it is the target of
//! an assignment or the first operand of a simple expression. The already
//! parsed operand is threaded down the cascade as `prev` and returned by
//! `parse_factor` in place of a fresh factor.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

fn relational_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Lt => Some(Operator::Lt),
        TokenKind::Le => Some(Operator::Le),
        TokenKind::Gt => Some(Operator::Gt),
        TokenKind::Ge => Some(Operator::Ge),
        TokenKind::Eq => Some(Operator::Eq),
        TokenKind::Ne => Some(Operator::Ne),
        _ => None,
    }
}

fn additive_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Plus => Some(Operator::Plus),
        TokenKind::Minus => Some(Operator::Minus),
        _ => None,
    }
}

fn multiplicative_operator(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Times => Some(Operator::Times),
        TokenKind::Over => Some(Operator::Over),
        _ => None,
    }
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<TreeNode, ParseError> {
        self.enter_nested()?;
        let expr = self.parse_assignment_expression();
        self.leave_nested();
        expr
    }

    /// Parse assignment: var "=" expression | simple_expression
    fn parse_assignment_expression(&mut self) -> Result<TreeNode, ParseError> {
        if !self.check(TokenKind::Id) {
            return self.parse_simple_expression(None);
        }

        let var = self.parse_call_or_variable()?;
        if !self.check(TokenKind::Assign) {
            return self.parse_simple_expression(Some(var));
        }

        // Only a variable reference, indexed or not, can be assigned to
        if !matches!(var.kind, NodeKind::Id { .. }) {
            return Err(self.error(format!(
                "cannot assign to the result of calling '{}'",
                var.name().unwrap_or_default()
            )));
        }

        self.advance(); // consume '='
        let line = self.current_line();
        let value = self.parse_expression()?;

        Ok(TreeNode::new(
            NodeKind::Assign {
                target: Box::new(var),
                value: Box::new(value),
            },
            line,
        ))
    }

    /// Parse simple expression: additive [relop additive]
    fn parse_simple_expression(
        &mut self,
        prev: Option<TreeNode>,
    ) -> Result<TreeNode, ParseError> {
        let left = self.parse_additive_expression(prev)?;

        let Some(operator) = relational_operator(self.current.kind) else {
            return Ok(left);
        };

        self.advance();
        let line = self.current_line();
        let op = TreeNode::new(NodeKind::Op(operator), line);
        let right = self.parse_additive_expression(None)?;

        Ok(TreeNode::new(
            NodeKind::SimpleExpr {
                left: Box::new(left),
                op: Box::new(op),
                right: Box::new(right),
            },
            line,
        ))
    }

    /// Parse additive expression: term (("+" | "-") term)*
    fn parse_additive_expression(
        &mut self,
        prev: Option<TreeNode>,
    ) -> Result<TreeNode, ParseError> {
        let mut left = self.parse_term(prev)?;

        while let Some(operator) = additive_operator(self.current.kind) {
            let line = self.current_line();
            let op = TreeNode::new(NodeKind::Op(operator), line);
            self.advance();
            let right = self.parse_term(None)?;

            left = TreeNode::new(
                NodeKind::AdditiveExpr {
                    left: Box::new(left),
                    op: Box::new(op),
                    right: Box::new(right),
                },
                line,
            );
        }

        Ok(left)
    }

    /// Parse term: factor (("*" | "/") factor)*
    fn parse_term(&mut self, prev: Option<TreeNode>) -> Result<TreeNode, ParseError> {
        let mut left = self.parse_factor(prev)?;

        while let Some(operator) = multiplicative_operator(self.current.kind) {
            let line = self.current_line();
            let op = TreeNode::new(NodeKind::Op(operator), line);
            self.advance();
            let right = self.parse_factor(None)?;

            left = TreeNode::new(
                NodeKind::Term {
                    left: Box::new(left),
                    op: Box::new(op),
                    right: Box::new(right),
                },
                line,
            );
        }

        Ok(left)
    }

    /// Parse factor: "(" expression ")" | NUM | variable | call
    fn parse_factor(&mut self, prev: Option<TreeNode>) -> Result<TreeNode, ParseError> {
        if let Some(node) = prev {
            return Ok(node);
        }

        match self.current.kind {
            TokenKind::Id => self.parse_call_or_variable(),
            TokenKind::Num => {
                let line = self.current_line();
                let token = self.advance();
                let value = token.lexeme.parse::<i32>().map_err(|_| {
                    ParseError::new(
                        format!("integer constant {} is out of range", token.lexeme),
                        token.clone(),
                    )
                })?;
                Ok(TreeNode::new(NodeKind::Const(value), line))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error("expected an expression")),
        }
    }

    /// Parse an identifier reference: `name`, `name[index]` or `name(args)`
    fn parse_call_or_variable(&mut self) -> Result<TreeNode, ParseError> {
        let name = self.expect_identifier()?;

        match self.current.kind {
            TokenKind::LParen => {
                self.advance();
                let line = self.current_line();
                let args = self.parse_args()?;
                self.expect_token(TokenKind::RParen)?;
                Ok(TreeNode::new(NodeKind::Call { name, args }, line))
            }
            TokenKind::LBracket => {
                self.advance();
                let line = self.current_line();
                let index = self.parse_expression()?;
                self.expect_token(TokenKind::RBracket)?;
                Ok(TreeNode::new(
                    NodeKind::Id {
                        name,
                        index: Some(Box::new(index)),
                    },
                    line,
                ))
            }
            _ => Ok(TreeNode::new(
                NodeKind::Id { name, index: None },
                self.current_line(),
            )),
        }
    }

    /// Parse call arguments up to the closing parenthesis (not consumed)
    fn parse_args(&mut self) -> Result<Vec<TreeNode>, ParseError> {
        let mut args = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(args);
        }

        args.push(self.parse_expression()?);
        while self.match_token(TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }

        Ok(args)
    }
}
