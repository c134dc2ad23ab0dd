//! Typed model of the emitted intermediate representation.
//!
//! Instructions are built with [`builder::Builder`] and rendered to text through their
//! [`std::fmt::Display`] implementations (see `printer.rs`).

pub mod builder;
pub mod instr;
pub mod module;
mod printer;

pub use builder::Builder;
pub use instr::{BinOp, Cmp, Instr};
pub use module::{Function, Line, Module};

/// A first-class IR type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrType {
    I32,
    Void,
}

/// A numbered temporary register (`%t<N>`). Assigned at most once.
/// Temporaries produced by `alloca` name stack slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub u32);

/// A basic block label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// The label opening every function body.
    pub fn entry() -> Self {
        Label("entry".to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// An instruction operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// An immediate integer.
    Imm(i64),
    Temp(Temp),
    /// An incoming function parameter (`%<name>`).
    Param(String),
}

impl From<Temp> for Value {
    fn from(temp: Temp) -> Self {
        Value::Temp(temp)
    }
}
