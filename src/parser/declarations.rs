//! Declaration parsing implementation
//!
//! This module handles parsing of C- declarations:
//!
//! - Global declarations: functions, scalar variables, sized arrays
//! - Local declarations at the top of a compound statement
//! - Type specifiers and function parameters
//!
//! # Grammar
//!
//! ```text
//! declaration     ::= type_specifier ID ( "(" params ")" compound_stmt
//!                                       | ";" | "[" NUM "]" ";" )
//! var_declaration ::= type_specifier ID ( ";" | "[" NUM "]" ";" )
//! type_specifier  ::= "int" | "void"
//! params          ::= "void" | param ( "," param )*
//! param           ::= type_specifier ID [ "[" "]" ]
//! ```
//!
//! The token after the identifier decides what is being declared, so no
//! backtracking is needed.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one or more top-level declarations, up to end of file
    pub(crate) fn parse_declaration_list(&mut self) -> Result<Vec<TreeNode>, ParseError> {
        let mut declarations = vec![self.parse_declaration()?];

        while !self.check(TokenKind::EndFile) {
            declarations.push(self.parse_declaration()?);
        }

        Ok(declarations)
    }

    /// Parse a top-level declaration (function, variable or array)
    pub(crate) fn parse_declaration(&mut self) -> Result<TreeNode, ParseError> {
        let decl_type = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;

        match self.current.kind {
            TokenKind::LParen => {
                self.advance();
                let line = self.current_line();

                let params = self.parse_params()?;
                self.expect_token(TokenKind::RParen)?;
                let body = self.parse_compound_statement()?;

                Ok(TreeNode::new(
                    NodeKind::FuncDecl {
                        name,
                        return_type: decl_type,
                        params,
                        body: Box::new(body),
                    },
                    line,
                ))
            }
            TokenKind::Semi | TokenKind::LBracket => self.parse_variable_rest(name, decl_type),
            _ => Err(self.error(format!("expected '(', ';' or '[' after '{}'", name))),
        }
    }

    /// Parse a local variable or array declaration
    pub(crate) fn parse_var_declaration(&mut self) -> Result<TreeNode, ParseError> {
        let decl_type = self.parse_type_specifier()?;
        let name = self.expect_identifier()?;
        self.parse_variable_rest(name, decl_type)
    }

    /// Parse what follows the name of a variable: `;` or `[ NUM ] ;`
    fn parse_variable_rest(
        &mut self,
        name: String,
        decl_type: DeclType,
    ) -> Result<TreeNode, ParseError> {
        match self.current.kind {
            TokenKind::Semi => {
                self.advance();
                Ok(TreeNode::new(
                    NodeKind::VarDecl {
                        name,
                        decl_type,
                        is_param: false,
                    },
                    self.current_line(),
                ))
            }
            TokenKind::LBracket => {
                self.advance();
                let line = self.current_line();

                let size = self.parse_array_size()?;
                self.expect_token(TokenKind::RBracket)?;
                self.expect_token(TokenKind::Semi)?;

                Ok(TreeNode::new(
                    NodeKind::ArrayDecl {
                        name,
                        decl_type,
                        size: Some(size),
                        is_param: false,
                    },
                    line,
                ))
            }
            _ => Err(self.error(format!("expected ';' or '[' after '{}'", name))),
        }
    }

    /// Parse the element count of a sized array
    fn parse_array_size(&mut self) -> Result<usize, ParseError> {
        if !self.check(TokenKind::Num) {
            return Err(self.error("expected array size"));
        }

        let token = self.advance();
        token.lexeme.parse::<usize>().map_err(|_| {
            ParseError::new(format!("array size {} is out of range", token.lexeme), token.clone())
        })
    }

    /// Parse type specifier: `int` or `void`
    pub(crate) fn parse_type_specifier(&mut self) -> Result<DeclType, ParseError> {
        let decl_type = match self.current.kind {
            TokenKind::Int => DeclType::Integer,
            TokenKind::Void => DeclType::Void,
            _ => return Err(self.error("expected type specifier 'int' or 'void'")),
        };
        self.advance();
        Ok(decl_type)
    }

    /// Parse parameter list. `(void)` is the only way to declare no parameters.
    fn parse_params(&mut self) -> Result<Vec<TreeNode>, ParseError> {
        let first_type = self.parse_type_specifier()?;

        if first_type == DeclType::Void && self.check(TokenKind::RParen) {
            return Ok(Vec::new());
        }

        let mut params = vec![self.parse_param(first_type)?];
        while self.match_token(TokenKind::Comma) {
            let decl_type = self.parse_type_specifier()?;
            params.push(self.parse_param(decl_type)?);
        }

        Ok(params)
    }

    /// Parse one parameter after its type: `name` or `name[]`
    fn parse_param(&mut self, decl_type: DeclType) -> Result<TreeNode, ParseError> {
        let name = self.expect_identifier()?;

        let kind = if self.match_token(TokenKind::LBracket) {
            self.expect_token(TokenKind::RBracket)?;
            NodeKind::ArrayDecl {
                name,
                decl_type,
                size: None,
                is_param: true,
            }
        } else {
            NodeKind::VarDecl {
                name,
                decl_type,
                is_param: true,
            }
        };

        Ok(TreeNode::new(kind, self.current_line()))
    }
}
