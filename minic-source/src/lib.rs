//! Source code representation and error management.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// A 1-based line/column position in the source code.
/// Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Sentinel position carried by the `EOF` token.
    pub const EOF: Position = Position { line: 0, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Returns `true` if this is the [`Position::EOF`] sentinel.
    pub fn is_eof(&self) -> bool {
        *self == Self::EOF
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "end of input")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offsets at which each line starts. The first entry is always `0`.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    /// Translates a byte offset into a line/column [`Position`].
    ///
    /// # Example
    /// ```
    /// use minic_source::{Position, Source};
    /// let source = Source::new("int\n  x");
    /// assert_eq!(source.position_of(6), Position::new(2, 3));
    /// ```
    pub fn position_of(&self, offset: usize) -> Position {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(index) => index,
            Err(index) => index - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self.content[line_start..offset].chars().count() + 1;
        Position::new(line_index + 1, column)
    }

    /// Returns the text covered by `span`.
    pub fn slice(&self, span: Range<usize>) -> &'a str {
        &self.content[span]
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Source text that starts no valid token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {line}:{column}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub kind: LexErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// The literal is well formed but does not fit in an `i64`.
    #[error("integer literal {0} is out of range")]
    NumberOutOfRange(String),
}

impl LexError {
    pub fn new(position: Position, kind: LexErrorKind) -> Self {
        Self {
            line: position.line,
            column: position.column,
            kind,
        }
    }

    pub fn unexpected_character(position: Position, character: char) -> Self {
        Self::new(position, LexErrorKind::UnexpectedCharacter(character))
    }

    pub fn number_out_of_range(position: Position, literal: impl Into<String>) -> Self {
        Self::new(position, LexErrorKind::NumberOutOfRange(literal.into()))
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// A token sequence that does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

impl ParseError {
    /// Create a new parse error with the specified `message` and `position`.
    pub fn new(message: impl ToString, position: Position) -> Self {
        Self {
            message: message.to_string(),
            position,
        }
    }
}

/// Errors raised while lowering the AST. These carry no position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    #[error("unsupported type `{name}`")]
    UnsupportedType { name: String },
    /// A variable was read or assigned without a declaration in scope.
    #[error("use of undeclared variable `{name}`")]
    UndeclaredVariable { name: String },
}

/// Any error that aborts a compilation, tagged with the phase that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// Name of the phase that failed.
    pub fn phase(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "lex",
            CompileError::Parse(_) => "parse",
            CompileError::Codegen(_) => "codegen",
        }
    }

    /// Source position of the error, if the phase tracks one.
    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::Lex(err) => Some(err.position()),
            CompileError::Parse(err) => Some(err.position),
            CompileError::Codegen(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of() {
        let source = Source::new("ab\r\n\tc\n\nd");
        assert_eq!(source.position_of(0), Position::new(1, 1));
        assert_eq!(source.position_of(1), Position::new(1, 2));
        assert_eq!(source.position_of(4), Position::new(2, 1));
        assert_eq!(source.position_of(5), Position::new(2, 2)); // tab is one column
        assert_eq!(source.position_of(8), Position::new(4, 1));
    }

    #[test]
    fn test_position_counts_chars() {
        let source = Source::new("é@");
        assert_eq!(source.position_of(2), Position::new(1, 2));
    }

    #[test]
    fn test_error_display() {
        let err: CompileError = LexError::unexpected_character(Position::new(1, 5), '@').into();
        assert_eq!(err.to_string(), "lex error: unexpected character '@' at 1:5");
        assert_eq!(err.phase(), "lex");
        assert_eq!(err.position(), Some(Position::new(1, 5)));

        let err: CompileError = ParseError::new("Expected ';'", Position::EOF).into();
        assert_eq!(err.to_string(), "parse error: Expected ';' at end of input");

        let err: CompileError = CodegenError::UnsupportedType {
            name: "char".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "codegen error: unsupported type `char`");
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_number_out_of_range_display() {
        let err = LexError::number_out_of_range(Position::new(1, 8), "99999999999999999999");
        assert_eq!(err.to_string(), "integer literal 99999999999999999999 is out of range at 1:8");
        assert_eq!(err.position(), Position::new(1, 8));
    }
}
