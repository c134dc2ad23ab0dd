//! Lowers the minic AST into IR text.

pub mod codegen;

pub use codegen::{generate, generate_module, ir_type, Codegen};
