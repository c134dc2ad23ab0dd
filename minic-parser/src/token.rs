//! Token and keyword model shared by the lexer and the parser.

use std::fmt;

use logos::{Lexer, Logos, Skip};
use minic_source::Position;

use crate::ast::BinaryOp;

/// Reserved words. Every other identifier-shaped lexeme is an identifier.
pub const KEYWORDS: [&str; 7] = ["int", "return", "if", "else", "while", "void", "extern"];

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]+", |lex| lex.slice().parse())]
    Number(i64),

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // keywords
    #[token("int")]
    Int,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("void")]
    Void,
    #[token("extern")]
    Extern,

    // unary operators
    #[token("!")]
    LogicalNot,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("&&")]
    LogicalAnd,
    #[token("||")]
    LogicalOr,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // misc
    #[regex(r"[ \t]+", logos::skip)]
    #[regex(r"\r?\n", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[token("/*", block_comment)]
    #[error]
    Error,

    /// Only generated by the parser when probing past the last token.
    Eof,
}

/// Skips the body of a block comment. An unterminated comment runs to the end of input.
fn block_comment(lex: &mut Lexer<TokenKind>) -> Skip {
    let rest = lex.remainder();
    let len = rest.find("*/").map(|end| end + 2).unwrap_or_else(|| rest.len());
    lex.bump(len);
    Skip
}

/// Coarse classification of a [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Number,
    Ident,
    Keyword,
    Symbol,
    Eof,
}

impl TokenKind {
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Number(_) => TokenCategory::Number,
            TokenKind::Identifier => TokenCategory::Ident,
            TokenKind::Int
            | TokenKind::Return
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::Void
            | TokenKind::Extern => TokenCategory::Keyword,
            TokenKind::Eof => TokenCategory::Eof,
            _ => TokenCategory::Symbol,
        }
    }

    /// Returns the binary binding power or `None` if invalid binop token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Assignment (`TokenKind::Equals`) has the lowest precedence with `(3, 2)`.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Assignment */
            TokenKind::Equals => Some((3, 2)),
            /* Logical */
            TokenKind::LogicalOr => Some((4, 5)),
            TokenKind::LogicalAnd => Some((6, 7)),
            /* Equality */
            TokenKind::EqualsEquals | TokenKind::NotEquals => Some((8, 9)),
            TokenKind::GreaterThan
            | TokenKind::GreaterThanEquals
            | TokenKind::LessThan
            | TokenKind::LessThanEquals => Some((10, 11)),
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some((12, 13)),
            /* Multiplicative */
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Some((14, 15)),
            _ => None,
        }
    }

    /// Maps an operator token to its [`BinaryOp`]. Assignment is not a [`BinaryOp`].
    pub fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Asterisk => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Rem,
            TokenKind::LessThan => BinaryOp::Lt,
            TokenKind::LessThanEquals => BinaryOp::Le,
            TokenKind::GreaterThan => BinaryOp::Gt,
            TokenKind::GreaterThanEquals => BinaryOp::Ge,
            TokenKind::EqualsEquals => BinaryOp::Eq,
            TokenKind::NotEquals => BinaryOp::Ne,
            TokenKind::LogicalAnd => BinaryOp::And,
            TokenKind::LogicalOr => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }
}

/// A lexed token. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    /// The token observed past the end of the token sequence.
    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "", Position::EOF)
    }

    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// The value of a `NUMBER` token.
    pub fn literal_value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Number(value) => Some(value),
            _ => None,
        }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_keyword_tokens() {
        for keyword in KEYWORDS.iter() {
            let mut lexer = TokenKind::lexer(keyword);
            let kind = lexer.next().unwrap();
            assert_eq!(kind.category(), TokenCategory::Keyword, "{}", keyword);
            assert_eq!(lexer.next(), None);
        }
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let kinds: Vec<_> = TokenKind::lexer("integer if_ _while").collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Identifier]
        );
    }

    #[test]
    fn test_binding_power_ordering() {
        let levels = [
            TokenKind::LogicalOr,
            TokenKind::LogicalAnd,
            TokenKind::EqualsEquals,
            TokenKind::LessThan,
            TokenKind::Plus,
            TokenKind::Asterisk,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0].binop_bp().unwrap().1 < pair[1].binop_bp().unwrap().0);
        }
        let (l_bp, r_bp) = TokenKind::Equals.binop_bp().unwrap();
        assert!(r_bp < l_bp, "assignment is right associative");
    }
}
