use crate::ast::{Block, Expr, FunctionDecl, Param, Stmt, Type, VarDecl};
use crate::token::{Token, TokenCategory, TokenKind};
use minic_source::ParseError;
use std::mem;
use tracing::trace;

mod expr;
mod stmt;

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses `tokens` into the function declarations of one translation unit.
pub fn parse(tokens: &[Token]) -> ParseResult<Vec<FunctionDecl>> {
    Parser::new(tokens).parse_program()
}

pub struct Parser<'a> {
    tokens: &'a [Token],
    /// Index of the current token.
    pos: usize,
    /// Observed when probing past the last token.
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(),
        }
    }

    /// Parses a sequence of top-level function declarations until the end of input.
    pub fn parse_program(&mut self) -> ParseResult<Vec<FunctionDecl>> {
        let mut functions = Vec::new();
        while !self.check(&TokenKind::Eof) {
            functions.push(self.parse_fn_declaration()?);
        }
        trace!(count = functions.len(), "parsed functions");
        Ok(functions)
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Returns the current token without consuming it.
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Consumes and returns the current token.
    fn next(&mut self) -> Token {
        let token = self.current().clone();
        self.pos = (self.pos + 1).min(self.tokens.len());
        token
    }

    /// Predicate that tests whether the current token has the same discriminant as `kind`.
    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current().kind) == mem::discriminant(kind)
    }

    /// Predicate that tests whether the current token has the same discriminant and eats the token if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(&kind) {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(&kind) {
            Ok(self.next())
        } else {
            Err(self.error(message))
        }
    }

    /// Creates an error at the current token.
    fn error(&self, message: impl ToString) -> ParseError {
        ParseError::new(message, self.current().position)
    }

    /// Raises an unexpected token error.
    fn unexpected(&self) -> ParseError {
        self.error(format!("Unexpected token {}", self.current()))
    }

    /// Consumes an identifier and returns its name.
    fn parse_ident(&mut self) -> ParseResult<String> {
        match self.current().kind {
            TokenKind::Identifier => Ok(self.next().lexeme),
            _ => Err(self.error("Expected identifier")),
        }
    }
}
