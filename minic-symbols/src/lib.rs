//! Chained lexical scopes mapping names to variables and functions.

use std::collections::HashMap;

use minic_ir::Temp;
use minic_parser::ast::{Param, Type};

/// A variable together with the stack slot it was bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: Type,
    /// The `alloca` temporary holding the variable.
    pub slot: Temp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSymbol {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<Param>,
}

/// A single scope. A scope borrows its parent, so it can never outlive it.
///
/// Redefining a name in the same scope silently replaces the previous entry.
#[derive(Debug, Default)]
pub struct SymbolTable<'p> {
    parent: Option<&'p SymbolTable<'p>>,
    vars: HashMap<String, VariableSymbol>,
    funcs: HashMap<String, FunctionSymbol>,
}

impl<'p> SymbolTable<'p> {
    /// Create a global scope (no parent).
    pub fn new() -> Self {
        Self {
            parent: None,
            vars: HashMap::new(),
            funcs: HashMap::new(),
        }
    }

    /// Create a scope nested inside `parent`.
    pub fn with_parent(parent: &'p SymbolTable<'p>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new()
        }
    }

    pub fn parent(&self) -> Option<&'p SymbolTable<'p>> {
        self.parent
    }

    pub fn define_var(&mut self, name: impl Into<String>, ty: Type, slot: Temp) {
        let name = name.into();
        self.vars.insert(name.clone(), VariableSymbol { name, ty, slot });
    }

    /// Returns the nearest enclosing definition of the variable `name`.
    pub fn resolve_var(&self, name: &str) -> Option<&VariableSymbol> {
        match self.vars.get(name) {
            Some(symbol) => Some(symbol),
            None => self.parent.and_then(|parent| parent.resolve_var(name)),
        }
    }

    pub fn define_func(&mut self, name: impl Into<String>, return_type: Type, params: Vec<Param>) {
        let name = name.into();
        self.funcs.insert(
            name.clone(),
            FunctionSymbol {
                name,
                return_type,
                params,
            },
        );
    }

    /// Returns the nearest enclosing definition of the function `name`.
    pub fn resolve_func(&self, name: &str) -> Option<&FunctionSymbol> {
        match self.funcs.get(name) {
            Some(symbol) => Some(symbol),
            None => self.parent.and_then(|parent| parent.resolve_func(name)),
        }
    }

    /// Variables defined directly in this scope, in no particular order.
    pub fn vars(&self) -> impl Iterator<Item = &VariableSymbol> {
        self.vars.values()
    }
}
