//! Converts source text into a sequence of [`Token`]s.

use logos::Logos;
use minic_source::{LexError, Source};
use tracing::trace;

use crate::token::{Token, TokenKind};

/// Tokenizes `source`. Fails on the first character that starts no token, or on an
/// integer literal that does not fit in an `i64`.
///
/// # Example
/// ```
/// use minic_parser::lexer::tokenize;
/// use minic_parser::token::TokenKind;
/// let tokens = tokenize("return 42;").unwrap();
/// assert_eq!(tokens[1].kind, TokenKind::Number(42));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let source = Source::new(source);
    let mut lexer = TokenKind::lexer(source.content);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        let position = source.position_of(span.start);
        if kind == TokenKind::Error {
            let lexeme = source.slice(span);
            return Err(match lexeme.chars().next() {
                Some(c) if c.is_ascii_digit() => LexError::number_out_of_range(position, lexeme),
                Some(c) => LexError::unexpected_character(position, c),
                None => LexError::unexpected_character(position, '\0'),
            });
        }
        tokens.push(Token::new(kind, source.slice(span), position));
    }

    trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenCategory;
    use minic_source::{LexErrorKind, Position};

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_function_header() {
        let tokens = tokenize("int main() {").unwrap();
        let summary: Vec<_> = tokens
            .iter()
            .map(|token| (token.category(), token.lexeme.as_str(), token.line(), token.column()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TokenCategory::Keyword, "int", 1, 1),
                (TokenCategory::Ident, "main", 1, 5),
                (TokenCategory::Symbol, "(", 1, 9),
                (TokenCategory::Symbol, ")", 1, 10),
                (TokenCategory::Symbol, "{", 1, 12),
            ]
        );
    }

    #[test]
    fn test_multi_char_operators() {
        assert_eq!(
            kinds("== = != ! <= < >= > && ||"),
            vec![
                TokenKind::EqualsEquals,
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::LogicalNot,
                TokenKind::LessThanEquals,
                TokenKind::LessThan,
                TokenKind::GreaterThanEquals,
                TokenKind::GreaterThan,
                TokenKind::LogicalAnd,
                TokenKind::LogicalOr,
            ]
        );
        assert_eq!(kinds("a==b"), vec![TokenKind::Identifier, TokenKind::EqualsEquals, TokenKind::Identifier]);
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("0 007 123abc").unwrap();
        assert_eq!(tokens[0].literal_value(), Some(0));
        assert_eq!(tokens[1].literal_value(), Some(7));
        assert_eq!(tokens[1].lexeme, "007");
        assert_eq!(tokens[2].literal_value(), Some(123));
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].literal_value(), None);
    }

    #[test]
    fn test_comments_and_newlines() {
        let tokens = tokenize("// line\r\nx /* block\n comment */ y\n\tz").unwrap();
        let positions: Vec<_> = tokens.iter().map(|token| (token.lexeme.as_str(), token.position)).collect();
        assert_eq!(
            positions,
            vec![
                ("x", Position::new(2, 1)),
                ("y", Position::new(3, 13)),
                ("z", Position::new(4, 2)),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(kinds("x /* never closed"), vec![TokenKind::Identifier]);
        assert_eq!(kinds("/* @ */"), vec![]);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("int @x;").unwrap_err();
        assert_eq!(err, LexError::unexpected_character(Position::new(1, 5), '@'));

        let err = tokenize("int f() {\n  return 1 # 2;\n}").unwrap_err();
        assert_eq!((err.line, err.column), (2, 12));
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('#'));
    }

    #[test]
    fn test_lone_carriage_return() {
        let err = tokenize("x\ry").unwrap_err();
        assert_eq!(err.position(), Position::new(1, 2));
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('\r'));
    }

    #[test]
    fn test_number_out_of_range() {
        let err = tokenize("return 99999999999999999999;").unwrap_err();
        assert_eq!(err.position(), Position::new(1, 8));
        assert_eq!(
            err.kind,
            LexErrorKind::NumberOutOfRange("99999999999999999999".to_string())
        );
        assert_eq!(err.to_string(), "integer literal 99999999999999999999 is out of range at 1:8");

        assert_eq!(kinds("9223372036854775807"), vec![TokenKind::Number(i64::MAX)]);
    }
}
