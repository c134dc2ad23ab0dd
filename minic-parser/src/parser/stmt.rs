use super::*;

impl<'a> Parser<'a> {
    /// Parses a function declaration (`type ident '(' params ')' '{' block`).
    pub fn parse_fn_declaration(&mut self) -> ParseResult<FunctionDecl> {
        let return_type = self.parse_type()?;
        let name = self.parse_ident()?;
        self.expect(TokenKind::OpenParen, "Expected '('")?;

        let mut params = Vec::new();
        if !self.eat(TokenKind::CloseParen) {
            loop {
                let ty = self.parse_type()?;
                let name = self.parse_ident()?;
                params.push(Param { ty, name });

                if self.eat(TokenKind::Comma) {
                    continue;
                }
                self.expect(TokenKind::CloseParen, "Expected ')'")?;
                break;
            }
        }

        self.expect(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_block()?;

        Ok(FunctionDecl {
            return_type,
            name,
            params,
            body,
        })
    }

    /// Parses the statements of a block up to and including the closing `}`.
    /// The opening `{` must already be consumed.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        let mut statements = Vec::new();
        while !self.eat(TokenKind::CloseBrace) {
            match self.current().kind {
                TokenKind::Int => statements.extend(self.parse_local_declaration()?),
                _ => statements.push(self.parse_stmt()?),
            }
        }
        Ok(Block { statements })
    }

    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.current().kind {
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            _ => {
                // expression statement
                if self.eat(TokenKind::Semi) {
                    return Ok(Stmt::Expr(None));
                }
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi, "Expected ';'")?;
                Ok(Stmt::Expr(Some(expr)))
            }
        }
    }

    /// Parses `int ident;` or `int ident = expr;`.
    /// An initializer becomes a separate assignment statement following the declaration.
    fn parse_local_declaration(&mut self) -> ParseResult<Vec<Stmt>> {
        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        let decl = Stmt::VarDecl(VarDecl {
            ty,
            name: name.clone(),
        });

        if self.eat(TokenKind::Equals) {
            let value = self.parse_expr()?;
            self.expect(TokenKind::Semi, "Expected ';'")?;
            let assign = Expr::Assign {
                name,
                value: Box::new(value),
            };
            Ok(vec![decl, Stmt::Expr(Some(assign))])
        } else {
            self.expect(TokenKind::Semi, "Expected ';'")?;
            Ok(vec![decl])
        }
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::If, "Expected 'if'")?;
        let cond = self.parse_paren_cond()?;
        self.expect(TokenKind::OpenBrace, "Expected '{'")?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(TokenKind::Else) {
            self.expect(TokenKind::OpenBrace, "Expected '{'")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::While, "Expected 'while'")?;
        let cond = self.parse_paren_cond()?;
        self.expect(TokenKind::OpenBrace, "Expected '{'")?;
        let body = self.parse_block()?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(TokenKind::Return, "Expected 'return'")?;
        if self.eat(TokenKind::Semi) {
            return Ok(Stmt::Return(None));
        }
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semi, "Expected ';'")?;
        Ok(Stmt::Return(Some(expr)))
    }

    /// Parses `'(' expr ')'`.
    fn parse_paren_cond(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::OpenParen, "Expected '('")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::CloseParen, "Expected ')'")?;
        Ok(cond)
    }

    /// Parses a type keyword. Keywords other than `int` and `void` are rejected.
    fn parse_type(&mut self) -> ParseResult<Type> {
        let ty = match self.current().kind {
            TokenKind::Int => Type::int(),
            TokenKind::Void => Type::void(),
            _ if self.current().category() == TokenCategory::Keyword => {
                return Err(self.error(format!("Unsupported type {}", self.current().lexeme)));
            }
            _ => return Err(self.error("Expected type keyword")),
        };
        self.next();
        Ok(ty)
    }
}
