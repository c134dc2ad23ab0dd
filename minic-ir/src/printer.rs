//! Renders the IR model as text.

use std::fmt;

use crate::module::{FORMAT_STRING, PRINTF_DECLARATION};
use crate::{BinOp, Cmp, Function, Instr, IrType, Label, Line, Module, Temp, Value};

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IrType::I32 => "i32",
            IrType::Void => "void",
        })
    }
}

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%t{}", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Imm(value) => write!(f, "{}", value),
            Value::Temp(temp) => write!(f, "{}", temp),
            Value::Param(name) => write!(f, "%{}", name),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::SDiv => "sdiv",
            BinOp::SRem => "srem",
            BinOp::And => "and",
            BinOp::Or => "or",
        })
    }
}

impl fmt::Display for Cmp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cmp::Eq => "eq",
            Cmp::Ne => "ne",
            Cmp::Slt => "slt",
            Cmp::Sle => "sle",
            Cmp::Sgt => "sgt",
            Cmp::Sge => "sge",
        })
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Alloca { dest, ty } => write!(f, "{} = alloca {}", dest, ty),
            Instr::Store { ty, value, ptr } => write!(f, "store {} {}, {}* {}", ty, value, ty, ptr),
            Instr::Load { dest, ty, ptr } => write!(f, "{} = load {}, {}* {}", dest, ty, ty, ptr),
            Instr::Binary { dest, op, lhs, rhs } => write!(f, "{} = {} i32 {}, {}", dest, op, lhs, rhs),
            Instr::Icmp { dest, cmp, lhs, rhs } => write!(f, "{} = icmp {} i32 {}, {}", dest, cmp, lhs, rhs),
            Instr::Zext { dest, value } => write!(f, "{} = zext i1 {} to i32", dest, value),
            Instr::Call { dest, callee, args } => {
                write!(f, "{} = call i32 @{}(", dest, callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "i32 {}", arg)?;
                }
                f.write_str(")")
            }
            Instr::Print { dest, value } => write!(
                f,
                "{} = call i32 (i8*, ...) @printf(i8* getelementptr inbounds ([4 x i8], [4 x i8]* @.fmt, i32 0, i32 0), i32 {})",
                dest, value
            ),
            Instr::Br { target } => write!(f, "br label %{}", target),
            Instr::CondBr {
                cond,
                then_label,
                else_label,
            } => write!(f, "br i1 {}, label %{}, label %{}", cond, then_label, else_label),
            Instr::Ret { ty, value } => write!(f, "ret {} {}", ty, value),
            Instr::RetVoid => f.write_str("ret void"),
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Label(label) => write!(f, "{}:", label),
            Line::Instr(instr) => write!(f, "  {}", instr),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "define {} @{}(", self.ret, self.name)?;
        for (i, (ty, name)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} %{}", ty, name)?;
        }
        writeln!(f, ") {{")?;
        for line in &self.body {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", PRINTF_DECLARATION)?;
        writeln!(f, "{}", FORMAT_STRING)?;
        for function in &self.functions {
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
