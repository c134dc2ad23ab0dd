//! Abstract syntax tree produced by [`crate::parser::Parser`].

use std::fmt;

/// A type name. Only `int` and `void` are produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub name: String,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn int() -> Self {
        Self::new("int")
    }

    pub fn void() -> Self {
        Self::new("void")
    }

    pub fn is_void(&self) -> bool {
        self.name == "void"
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

/// A local variable declaration (e.g. `int x;`).
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: Type,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub return_type: Type,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: Expr,
        body: Block,
    },
    Return(Option<Expr>),
    /// An expression statement. `None` for the empty statement `;`.
    Expr(Option<Expr>),
    VarDecl(VarDecl),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    /// Logical and. Both operands are always evaluated.
    And,
    /// Logical or. Both operands are always evaluated.
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    /// A variable read (e.g. `foo`).
    Var(String),
    /// An assignment to a named variable (e.g. `x = 1`). Evaluates to the assigned value.
    Assign { name: String, value: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A direct call by name (e.g. `foo(1, 2)`).
    Call { name: String, args: Vec<Expr> },
}
