//! Lowers the AST into an IR [`Module`].
//!
//! Every variable lives in its own stack slot: declarations and parameters are `alloca`ed,
//! reads are `load`s and assignments are `store`s. Promoting slots to registers is left to
//! the downstream backend.

use minic_ir::{BinOp, Builder, Cmp, Instr, IrType, Label, Module, Temp, Value};
use minic_parser::ast::{BinaryOp, Block, Expr, FunctionDecl, Stmt, Type, UnaryOp};
use minic_source::CodegenError;
use minic_symbols::SymbolTable;
use tracing::{debug, trace};

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Name of the builtin print primitive backed by the module's `printf` declaration.
///
/// This is the one exception to plain call lowering: a one-argument `print` call with no
/// user-defined `print` in scope becomes a `printf` call instead of `call i32 @print(...)`.
pub const PRINT_BUILTIN: &str = "print";

/// Generates the IR text for `functions`.
pub fn generate(functions: &[FunctionDecl]) -> CodegenResult<String> {
    Ok(generate_module(functions)?.to_string())
}

/// Generates the IR [`Module`] for `functions`.
pub fn generate_module(functions: &[FunctionDecl]) -> CodegenResult<Module> {
    let mut globals = SymbolTable::new();
    for func in functions {
        globals.define_func(func.name.clone(), func.return_type.clone(), func.params.clone());
    }

    let mut codegen = Codegen::new();
    for func in functions {
        codegen.codegen_function(func, &globals)?;
    }

    let module = codegen.into_inner_module();
    debug!("generated module\n{}", module);
    Ok(module)
}

/// Maps a source type name to its IR type.
pub fn ir_type(ty: &Type) -> CodegenResult<IrType> {
    match ty.name.as_str() {
        "int" => Ok(IrType::I32),
        "void" => Ok(IrType::Void),
        _ => Err(CodegenError::UnsupportedType {
            name: ty.name.clone(),
        }),
    }
}

/// Generate IR from an abstract syntax tree.
/// Owns the temporary and label counters for the duration of one compilation.
pub struct Codegen {
    builder: Builder,
}

impl Codegen {
    pub fn new() -> Self {
        Self {
            builder: Builder::new(),
        }
    }

    /// Consumes `self` and returns the generated [`Module`].
    #[must_use]
    pub fn into_inner_module(self) -> Module {
        self.builder.into_inner_module()
    }

    /// Emits the definition of `func`. Its scope is chained to `globals` and dropped once
    /// the function is emitted.
    pub fn codegen_function(&mut self, func: &FunctionDecl, globals: &SymbolTable) -> CodegenResult<()> {
        debug!(name = %func.name, params = func.params.len(), "lowering function");

        let ret = ir_type(&func.return_type)?;
        let params = func
            .params
            .iter()
            .map(|param| Ok((ir_type(&param.ty)?, param.name.clone())))
            .collect::<CodegenResult<Vec<_>>>()?;

        self.builder.begin_function(func.name.clone(), ret, params.clone());
        self.builder.emit_label(Label::entry());

        let mut scope = SymbolTable::with_parent(globals);
        for ((ty, name), param) in params.into_iter().zip(&func.params) {
            let slot = self.builder.new_temp();
            self.builder.emit(Instr::Alloca { dest: slot, ty });
            self.builder.emit(Instr::Store {
                ty,
                value: Value::Param(name.clone()),
                ptr: slot,
            });
            scope.define_var(name, param.ty.clone(), slot);
        }

        self.codegen_block(&func.body, &mut scope)?;

        // Appended even when the body already ends in a return.
        if func.return_type.is_void() {
            self.builder.emit(Instr::RetVoid);
        }
        self.builder.end_function();
        Ok(())
    }

    fn codegen_block(&mut self, block: &Block, scope: &mut SymbolTable) -> CodegenResult<()> {
        for stmt in &block.statements {
            self.codegen_stmt(stmt, scope)?;
        }
        Ok(())
    }

    fn codegen_stmt(&mut self, stmt: &Stmt, scope: &mut SymbolTable) -> CodegenResult<()> {
        trace!(?stmt, "lowering statement");

        match stmt {
            Stmt::VarDecl(decl) => {
                let ty = ir_type(&decl.ty)?;
                let slot = self.builder.new_temp();
                self.builder.emit(Instr::Alloca { dest: slot, ty });
                scope.define_var(decl.name.clone(), decl.ty.clone(), slot);
            }
            Stmt::Expr(expr) => {
                if let Some(expr) = expr {
                    self.codegen_expr(expr, scope)?; // Value is discarded.
                }
            }
            Stmt::Return(None) => self.builder.emit(Instr::RetVoid),
            Stmt::Return(Some(expr)) => {
                let value = self.codegen_expr(expr, scope)?;
                self.builder.emit(Instr::Ret {
                    ty: IrType::I32,
                    value,
                });
            }
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                let cond = self.codegen_cond(cond, scope)?;
                let then_label = self.builder.new_label("then");
                let else_label = else_block.as_ref().map(|_| self.builder.new_label("else"));
                let end_label = self.builder.new_label("endif");

                self.builder.emit(Instr::CondBr {
                    cond,
                    then_label: then_label.clone(),
                    else_label: else_label.clone().unwrap_or_else(|| end_label.clone()),
                });

                self.builder.emit_label(then_label);
                self.codegen_block(then_block, scope)?;
                self.builder.emit(Instr::Br {
                    target: end_label.clone(),
                });

                if let (Some(else_label), Some(else_block)) = (else_label, else_block) {
                    self.builder.emit_label(else_label);
                    self.codegen_block(else_block, scope)?;
                    self.builder.emit(Instr::Br {
                        target: end_label.clone(),
                    });
                }

                self.builder.emit_label(end_label);
            }
            Stmt::While { cond, body } => {
                let cond_label = self.builder.new_label("while.cond");
                let body_label = self.builder.new_label("while.body");
                let end_label = self.builder.new_label("while.end");

                self.builder.emit(Instr::Br {
                    target: cond_label.clone(),
                });
                self.builder.emit_label(cond_label.clone());
                let cond = self.codegen_cond(cond, scope)?;
                self.builder.emit(Instr::CondBr {
                    cond,
                    then_label: body_label.clone(),
                    else_label: end_label.clone(),
                });

                self.builder.emit_label(body_label);
                self.codegen_block(body, scope)?;
                self.builder.emit(Instr::Br { target: cond_label });

                self.builder.emit_label(end_label);
            }
        }

        Ok(())
    }

    /// Evaluates `cond` and compares it not-equal-to-zero, producing an `i1`.
    fn codegen_cond(&mut self, cond: &Expr, scope: &SymbolTable) -> CodegenResult<Value> {
        let value = self.codegen_expr(cond, scope)?;
        Ok(self.icmp(Cmp::Ne, value, Value::Imm(0)).into())
    }

    /// Emits `expr` and returns the `i32` value it evaluates to.
    fn codegen_expr(&mut self, expr: &Expr, scope: &SymbolTable) -> CodegenResult<Value> {
        let value: Value = match expr {
            Expr::Number(val) => Value::Imm(*val),
            Expr::Var(name) => {
                let ptr = Self::slot(scope, name)?;
                let dest = self.builder.new_temp();
                self.builder.emit(Instr::Load {
                    dest,
                    ty: IrType::I32,
                    ptr,
                });
                dest.into()
            }
            Expr::Assign { name, value } => {
                let value = self.codegen_expr(value, scope)?;
                let ptr = Self::slot(scope, name)?;
                self.builder.emit(Instr::Store {
                    ty: IrType::I32,
                    value: value.clone(),
                    ptr,
                });
                value
            }
            Expr::Unary { op, arg } => {
                let arg = self.codegen_expr(arg, scope)?;
                match op {
                    UnaryOp::Neg => self.binary(BinOp::Sub, Value::Imm(0), arg).into(),
                    UnaryOp::Not => {
                        let cmp = self.icmp(Cmp::Eq, arg, Value::Imm(0));
                        self.zext(cmp).into()
                    }
                }
            }
            Expr::Binary { lhs, op, rhs } => {
                // Both operands are always evaluated, including for `&&` and `||`.
                let lhs = self.codegen_expr(lhs, scope)?;
                let rhs = self.codegen_expr(rhs, scope)?;
                match op {
                    BinaryOp::Add => self.binary(BinOp::Add, lhs, rhs).into(),
                    BinaryOp::Sub => self.binary(BinOp::Sub, lhs, rhs).into(),
                    BinaryOp::Mul => self.binary(BinOp::Mul, lhs, rhs).into(),
                    BinaryOp::Div => self.binary(BinOp::SDiv, lhs, rhs).into(),
                    BinaryOp::Rem => self.binary(BinOp::SRem, lhs, rhs).into(),
                    BinaryOp::Lt => self.comparison(Cmp::Slt, lhs, rhs).into(),
                    BinaryOp::Le => self.comparison(Cmp::Sle, lhs, rhs).into(),
                    BinaryOp::Gt => self.comparison(Cmp::Sgt, lhs, rhs).into(),
                    BinaryOp::Ge => self.comparison(Cmp::Sge, lhs, rhs).into(),
                    BinaryOp::Eq => self.comparison(Cmp::Eq, lhs, rhs).into(),
                    BinaryOp::Ne => self.comparison(Cmp::Ne, lhs, rhs).into(),
                    BinaryOp::And => {
                        let combined = self.binary(BinOp::And, lhs, rhs);
                        self.comparison(Cmp::Ne, combined.into(), Value::Imm(0)).into()
                    }
                    BinaryOp::Or => {
                        let combined = self.binary(BinOp::Or, lhs, rhs);
                        self.comparison(Cmp::Ne, combined.into(), Value::Imm(0)).into()
                    }
                }
            }
            Expr::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.codegen_expr(arg, scope))
                    .collect::<CodegenResult<Vec<_>>>()?;
                let dest = self.builder.new_temp();

                // Every other call, including a user-defined `print`, stays a plain `call`.
                let is_builtin_print = name == PRINT_BUILTIN && scope.resolve_func(name).is_none();
                match args.as_slice() {
                    [value] if is_builtin_print => self.builder.emit(Instr::Print {
                        dest,
                        value: value.clone(),
                    }),
                    _ => {
                        if scope.resolve_func(name).is_none() {
                            debug!(%name, "call to undeclared function");
                        }
                        self.builder.emit(Instr::Call {
                            dest,
                            callee: name.clone(),
                            args,
                        });
                    }
                }
                dest.into()
            }
        };

        Ok(value)
    }

    /// Looks up the stack slot bound to the variable `name`.
    fn slot(scope: &SymbolTable, name: &str) -> CodegenResult<Temp> {
        scope
            .resolve_var(name)
            .map(|symbol| symbol.slot)
            .ok_or_else(|| CodegenError::UndeclaredVariable {
                name: name.to_string(),
            })
    }

    fn binary(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Temp {
        let dest = self.builder.new_temp();
        self.builder.emit(Instr::Binary { dest, op, lhs, rhs });
        dest
    }

    fn icmp(&mut self, cmp: Cmp, lhs: Value, rhs: Value) -> Temp {
        let dest = self.builder.new_temp();
        self.builder.emit(Instr::Icmp { dest, cmp, lhs, rhs });
        dest
    }

    fn zext(&mut self, value: Temp) -> Temp {
        let dest = self.builder.new_temp();
        self.builder.emit(Instr::Zext {
            dest,
            value: value.into(),
        });
        dest
    }

    /// Compares two values and widens the result to `i32`.
    fn comparison(&mut self, cmp: Cmp, lhs: Value, rhs: Value) -> Temp {
        let result = self.icmp(cmp, lhs, rhs);
        self.zext(result)
    }
}

impl Default for Codegen {
    fn default() -> Self {
        Self::new()
    }
}
