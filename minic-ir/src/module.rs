//! Definitions for [`Module`], [`Function`] and [`Line`].

use crate::{Instr, IrType, Label};

/// Declaration of the external variadic formatting function, emitted at the top of every module.
pub const PRINTF_DECLARATION: &str = "declare i32 @printf(i8*, ...)";
/// Private `"%d\n"` format string constant, emitted at the top of every module.
pub const FORMAT_STRING: &str = r#"@.fmt = private constant [4 x i8] c"%d\0A\00""#;

/// One line of a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Label(Label),
    Instr(Instr),
}

/// A function definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub ret: IrType,
    pub params: Vec<(IrType, String)>,
    pub body: Vec<Line>,
}

impl Function {
    pub fn new(name: impl Into<String>, ret: IrType, params: Vec<(IrType, String)>) -> Self {
        Self {
            name: name.into(),
            ret,
            params,
            body: Vec::new(),
        }
    }

    /// Iterates over the instructions of the body, skipping labels.
    pub fn instrs(&self) -> impl Iterator<Item = &Instr> {
        self.body.iter().filter_map(|line| match line {
            Line::Instr(instr) => Some(instr),
            Line::Label(_) => None,
        })
    }

    /// Iterates over the labels of the body in emission order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.body.iter().filter_map(|line| match line {
            Line::Label(label) => Some(label),
            Line::Instr(_) => None,
        })
    }

    /// Returns the instructions following `label` up to the next label.
    pub fn block(&self, label: &str) -> Option<Vec<&Instr>> {
        let start = self
            .body
            .iter()
            .position(|line| matches!(line, Line::Label(l) if l.name() == label))?;
        Some(
            self.body[start + 1..]
                .iter()
                .take_while(|line| matches!(line, Line::Instr(_)))
                .filter_map(|line| match line {
                    Line::Instr(instr) => Some(instr),
                    Line::Label(_) => None,
                })
                .collect(),
        )
    }
}

/// A translation unit: the fixed preamble followed by function definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}
