use super::*;
use crate::ast::UnaryOp;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current().kind.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current() is a valid binop
            let binop = self.next();

            lhs = match binop.kind.binary_op() {
                Some(op) => {
                    let rhs = self.parse_expr_bp(r_bp)?;
                    Expr::Binary {
                        lhs: Box::new(lhs),
                        op,
                        rhs: Box::new(rhs),
                    }
                }
                // assignment
                None => match lhs {
                    Expr::Var(name) => {
                        let value = self.parse_expr_bp(r_bp)?;
                        Expr::Assign {
                            name,
                            value: Box::new(value),
                        }
                    }
                    _ => return Err(ParseError::new("Invalid assignment target", binop.position)),
                },
            }
        }

        Ok(lhs)
    }

    /// Parses a prefix `-` or `!` expression, or a call/primary expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::LogicalNot => UnaryOp::Not,
            _ => return self.parse_primary_expr(),
        };
        self.next();

        Ok(Expr::Unary {
            op,
            arg: Box::new(self.parse_unary_expr()?),
        })
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.current().kind {
            TokenKind::Number(val) => {
                self.next();
                Ok(Expr::Number(val))
            }
            TokenKind::Identifier => self.parse_identifier_or_call_expr(),
            TokenKind::OpenParen => {
                self.next();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::CloseParen, "Expected ')'")?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    /* Expressions.Identifier */
    /// Parses an identifier or a call expression.
    /// Call syntax is only accepted directly after an identifier.
    fn parse_identifier_or_call_expr(&mut self) -> ParseResult<Expr> {
        let name = self.parse_ident()?;

        if self.eat(TokenKind::OpenParen) {
            // parse call expression
            let mut args = Vec::new();

            if !self.eat(TokenKind::CloseParen) {
                loop {
                    args.push(self.parse_expr()?);

                    if self.eat(TokenKind::Comma) {
                        continue;
                    }
                    self.expect(TokenKind::CloseParen, "Expected ')'")?;
                    break;
                }
            }

            Ok(Expr::Call { name, args })
        } else {
            // parse identifier expression
            Ok(Expr::Var(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::test_utils::sexpr;
    use insta::assert_debug_snapshot;
    use minic_source::Position;

    fn try_expr(source: &str) -> ParseResult<String> {
        let tokens = tokenize(source).unwrap();
        let mut parser = Parser::new(&tokens);
        let ast = parser.parse_expr()?;
        assert!(parser.check(&TokenKind::Eof), "trailing tokens in {:?}", source);
        Ok(sexpr(&ast))
    }

    fn expr(source: &str) -> String {
        try_expr(source).unwrap()
    }

    #[test]
    fn test_literal() {
        assert_eq!(expr("1"), "1");
        assert_eq!(expr("(42)"), "42");
    }

    #[test]
    fn test_binary_expr() {
        assert_eq!(expr("1 + 1"), "(+ 1 1)");
        assert_eq!(expr("1 == 2 - 1"), "(== 1 (- 2 1))");
        assert_eq!(expr("2 * 2 * 2"), "(* (* 2 2) 2)"); // should be (2 * 2) * 2
        assert_eq!(expr("8 - 4 - 2"), "(- (- 8 4) 2)");
        assert_eq!(expr("a = b = c"), "(= a (= b c))"); // should be a = (b = c)
    }

    #[test]
    fn test_binary_expr_tree() {
        let tokens = tokenize("x = -1 * 2").unwrap();
        let ast = Parser::new(&tokens).parse_expr().unwrap();
        assert_debug_snapshot!(ast, @r###"
        Assign {
            name: "x",
            value: Binary {
                lhs: Unary {
                    op: Neg,
                    arg: Number(
                        1,
                    ),
                },
                op: Mul,
                rhs: Number(
                    2,
                ),
            },
        }
        "###);
    }

    #[test]
    fn test_precedence_chain() {
        assert_eq!(
            expr("a || b && c == d < e + f * g"),
            "(|| a (&& b (== c (< d (+ e (* f g))))))"
        );
        assert_eq!(expr("a * b % c / d"), "(/ (% (* a b) c) d)");
        assert_eq!(expr("a < b <= c > d >= e"), "(>= (> (<= (< a b) c) d) e)");
        assert_eq!(expr("a != b == c"), "(== (!= a b) c)");
        assert_eq!(expr("a || b || c"), "(|| (|| a b) c)");
        assert_eq!(expr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(expr("x = a || b"), "(= x (|| a b))");
    }

    #[test]
    fn test_unary_expr() {
        assert_eq!(expr("-1 + 2"), "(+ (- 1) 2)");
        assert_eq!(expr("!a && b"), "(&& (! a) b)");
        assert_eq!(expr("--x"), "(- (- x))");
        assert_eq!(expr("-!x * 3"), "(* (- (! x)) 3)");
    }

    #[test]
    fn test_identifier() {
        assert_eq!(expr("foo"), "foo");
    }

    #[test]
    fn test_fn_call() {
        assert_eq!(expr("foo()"), "(call foo [])");
        assert_eq!(expr("foo(1, bar)"), "(call foo [1 bar])");
        assert_eq!(expr("foo(1, bar, baz())"), "(call foo [1 bar (call baz [])])");
        assert_eq!(expr("f(x = 1) + 2"), "(+ (call f [(= x 1)]) 2)");
    }

    #[test]
    fn test_invalid_assignment_target() {
        let err = try_expr("a + b = c").unwrap_err();
        assert_eq!(err, ParseError::new("Invalid assignment target", Position::new(1, 7)));
        assert!(try_expr("f() = 1").is_err());
        assert!(try_expr("(a) = 1").is_ok()); // parenthesized variables are still variables
    }

    #[test]
    fn test_call_requires_identifier() {
        let tokens = tokenize("(f)(1)").unwrap();
        let mut parser = Parser::new(&tokens);
        assert_eq!(sexpr(&parser.parse_expr().unwrap()), "f");
        assert!(parser.check(&TokenKind::OpenParen));
    }

    #[test]
    fn test_unexpected_token() {
        let err = try_expr("1 + ;").unwrap_err();
        assert_eq!(err, ParseError::new("Unexpected token ';'", Position::new(1, 5)));
        let err = try_expr("foo(1, 2").unwrap_err();
        assert_eq!(err, ParseError::new("Expected ')'", Position::EOF));
    }
}
