//! Definitions for [`Instr`] and its operators.

use crate::{IrType, Label, Temp, Value};

/// Integer binary operator. Operands and result are `i32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// Signed division. The divisor is assumed to be nonzero.
    SDiv,
    /// Signed remainder. The divisor is assumed to be nonzero.
    SRem,
    And,
    Or,
}

/// Signed integer comparison predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

/// A single non-label line of a function body.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// Allocates a stack slot for one value of `ty`.
    Alloca { dest: Temp, ty: IrType },
    /// Stores `value` into the slot `ptr`.
    Store { ty: IrType, value: Value, ptr: Temp },
    /// Loads the value held in the slot `ptr`.
    Load { dest: Temp, ty: IrType, ptr: Temp },
    Binary {
        dest: Temp,
        op: BinOp,
        lhs: Value,
        rhs: Value,
    },
    /// Compares two `i32` values, producing an `i1`.
    Icmp {
        dest: Temp,
        cmp: Cmp,
        lhs: Value,
        rhs: Value,
    },
    /// Widens an `i1` to `i32`.
    Zext { dest: Temp, value: Value },
    /// Direct call of `@callee` returning `i32`. Every argument is passed as `i32`.
    Call {
        dest: Temp,
        callee: String,
        args: Vec<Value>,
    },
    /// Call of the module's `printf` declaration with the `%d\n` format string.
    Print { dest: Temp, value: Value },
    Br { target: Label },
    CondBr {
        cond: Value,
        then_label: Label,
        else_label: Label,
    },
    Ret { ty: IrType, value: Value },
    RetVoid,
}

impl Instr {
    /// Returns `true` if the instruction ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instr::Br { .. } | Instr::CondBr { .. } | Instr::Ret { .. } | Instr::RetVoid
        )
    }

    /// The temporary defined by this instruction, if any.
    pub fn dest(&self) -> Option<Temp> {
        match self {
            Instr::Alloca { dest, .. }
            | Instr::Load { dest, .. }
            | Instr::Binary { dest, .. }
            | Instr::Icmp { dest, .. }
            | Instr::Zext { dest, .. }
            | Instr::Call { dest, .. }
            | Instr::Print { dest, .. } => Some(*dest),
            Instr::Store { .. }
            | Instr::Br { .. }
            | Instr::CondBr { .. }
            | Instr::Ret { .. }
            | Instr::RetVoid => None,
        }
    }

    /// Labels this instruction may transfer control to.
    pub fn successors(&self) -> Vec<&Label> {
        match self {
            Instr::Br { target } => vec![target],
            Instr::CondBr {
                then_label,
                else_label,
                ..
            } => vec![then_label, else_label],
            _ => Vec::new(),
        }
    }
}
