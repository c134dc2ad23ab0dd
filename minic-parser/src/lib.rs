//! Lexer, token model, AST and recursive descent parser for the minic language.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use lexer::tokenize;
pub use parser::parse;
