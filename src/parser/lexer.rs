//! Lexer (tokenizer) for C- source code
//!
//! Produces [`Token`]s one at a time on demand; the parser pulls the next token
//! only after it has consumed the current one. Lexical problems never abort the
//! scan: an unterminated comment or a stray character becomes a
//! [`TokenKind::Error`] token and scanning resumes after it.

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Every kind of token the lexer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Reserved words
    If,
    Else,
    Int,
    Return,
    Void,
    While,

    // Operators
    Assign, // =
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Eq,     // ==
    Ne,     // !=
    Plus,   // +
    Minus,  // -
    Times,  // *
    Over,   // /

    // Punctuation
    Comma,    // ,
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    LBrace,   // {
    RBrace,   // }
    Semi,     // ;

    // Literals
    Id,
    Num,

    // Control
    EndFile,
    Error,
}

impl TokenKind {
    /// Source spelling of reserved words, operators and punctuation
    pub fn symbol(self) -> Option<&'static str> {
        let s = match self {
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Int => "int",
            TokenKind::Return => "return",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::Assign => "=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::Eq => "==",
            TokenKind::Ne => "!=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Times => "*",
            TokenKind::Over => "/",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Semi => ";",
            TokenKind::Id | TokenKind::Num | TokenKind::EndFile | TokenKind::Error => {
                return None;
            }
        };
        Some(s)
    }

    pub fn is_reserved_word(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::Int
                | TokenKind::Return
                | TokenKind::Void
                | TokenKind::While
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(s) => write!(f, "'{}'", s),
            None => match self {
                TokenKind::Id => write!(f, "identifier"),
                TokenKind::Num => write!(f, "number"),
                TokenKind::EndFile => write!(f, "end of file"),
                _ => write!(f, "invalid token"),
            },
        }
    }
}

/// A single token with the text it was scanned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Id => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Num => write!(f, "number {}", self.lexeme),
            TokenKind::Error => write!(f, "invalid input '{}'", self.lexeme),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexeme carried by the error token of an unterminated block comment
pub const COMMENT_ERROR: &str = "Comment Error";

fn reserved_words() -> &'static FxHashMap<&'static str, TokenKind> {
    static RESERVED: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    RESERVED.get_or_init(|| {
        [
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Int,
            TokenKind::Return,
            TokenKind::Void,
            TokenKind::While,
        ]
        .into_iter()
        .filter_map(|kind| kind.symbol().map(|word| (word, kind)))
        .collect()
    })
}

/// Lexer for C- source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    /// Location of the last character consumed
    last_location: Option<SourceLocation>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            last_location: None,
        }
    }

    /// Tokenize the entire input, up to and including the end-of-file token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::EndFile;
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan the next token. Once the input is exhausted every call returns
    /// an end-of-file token.
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_whitespace_and_comments() {
            return error;
        }

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::EndFile, "", self.end_location()),
        };

        match ch {
            '0'..='9' => self.number(ch, loc),
            'a'..='z' | 'A'..='Z' => self.identifier_or_keyword(ch, loc),

            '<' => self.with_optional_eq(TokenKind::Lt, TokenKind::Le, loc),
            '>' => self.with_optional_eq(TokenKind::Gt, TokenKind::Ge, loc),
            '=' => self.with_optional_eq(TokenKind::Assign, TokenKind::Eq, loc),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Ne, "!=", loc)
                } else {
                    Token::new(TokenKind::Error, "!", loc)
                }
            }

            '+' => Token::new(TokenKind::Plus, "+", loc),
            '-' => Token::new(TokenKind::Minus, "-", loc),
            '*' => Token::new(TokenKind::Times, "*", loc),
            '/' => Token::new(TokenKind::Over, "/", loc),
            ',' => Token::new(TokenKind::Comma, ",", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            '[' => Token::new(TokenKind::LBracket, "[", loc),
            ']' => Token::new(TokenKind::RBracket, "]", loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),
            ';' => Token::new(TokenKind::Semi, ";", loc),

            _ => Token::new(TokenKind::Error, ch.to_string(), loc),
        }
    }

    /// Single-character operator that becomes a two-character one before `=`
    fn with_optional_eq(
        &mut self,
        single: TokenKind,
        with_eq: TokenKind,
        loc: SourceLocation,
    ) -> Token {
        let kind = if self.peek() == Some('=') {
            self.advance();
            with_eq
        } else {
            single
        };
        let lexeme = kind.symbol().unwrap_or_default();
        Token::new(kind, lexeme, loc)
    }

    /// Scan a run of digits
    fn number(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Num, num_str, loc)
    }

    /// Scan an identifier and classify it against the reserved-word table
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = reserved_words()
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Id);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and comments. Returns an error token when a comment
    /// runs into the end of input.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    if let Err(error) = self.skip_block_comment() {
                        return Some(error);
                    }
                }
                _ => return None,
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), Token> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(Token::new(TokenKind::Error, COMMENT_ERROR, start_loc))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.last_location = Some(self.current_location());
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    /// Location of end of file: just past the last character, on that
    /// character's line even when it is a trailing newline
    fn end_location(&self) -> SourceLocation {
        match self.last_location {
            Some(last) => SourceLocation::new(last.line, last.column + 1),
            None => self.current_location(),
        }
    }
}

/// Yields tokens up to, but not including, end of file
impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndFile).then_some(token)
    }
}
