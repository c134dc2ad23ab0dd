//! Incremental construction of a [`Module`].

use std::mem;

use crate::{Function, Instr, IrType, Label, Line, Module, Temp};

/// Builds a [`Module`] one function at a time.
///
/// Temporaries and labels are numbered by two counters owned by the builder. Neither is
/// reset between functions, so every name is unique across the whole module and the
/// numbering only depends on the order of calls.
#[derive(Debug)]
pub struct Builder {
    module: Module,
    /// The function currently being emitted.
    current: Function,
    temp_counter: u32,
    label_counter: u32,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            module: Module::new(),
            current: Function::new(String::new(), IrType::Void, Vec::new()),
            temp_counter: 0,
            label_counter: 0,
        }
    }

    /// Returns a fresh temporary.
    ///
    /// # Example
    /// ```
    /// use minic_ir::{Builder, Temp};
    /// let mut builder = Builder::new();
    /// assert_eq!(builder.new_temp(), Temp(1));
    /// assert_eq!(builder.new_temp(), Temp(2));
    /// ```
    pub fn new_temp(&mut self) -> Temp {
        self.temp_counter += 1;
        Temp(self.temp_counter)
    }

    /// Returns a fresh label named `<base><N>`.
    pub fn new_label(&mut self, base: &str) -> Label {
        self.label_counter += 1;
        Label(format!("{}{}", base, self.label_counter))
    }

    /// Starts a new function. Instructions are appended to it until [`Builder::end_function`].
    pub fn begin_function(&mut self, name: impl Into<String>, ret: IrType, params: Vec<(IrType, String)>) {
        self.current = Function::new(name, ret, params);
    }

    /// Finishes the current function and adds it to the module.
    pub fn end_function(&mut self) {
        let function = mem::replace(
            &mut self.current,
            Function::new(String::new(), IrType::Void, Vec::new()),
        );
        self.module.functions.push(function);
    }

    /// Appends an instruction to the current function.
    pub fn emit(&mut self, instr: Instr) {
        self.current.body.push(Line::Instr(instr));
    }

    /// Starts a new basic block in the current function.
    pub fn emit_label(&mut self, label: Label) {
        self.current.body.push(Line::Label(label));
    }

    /// Consumes `self` and returns the generated [`Module`].
    #[must_use]
    pub fn into_inner_module(self) -> Module {
        self.module
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_label_counter_is_shared_across_bases() {
        let mut builder = Builder::new();
        assert_eq!(builder.new_label("then").name(), "then1");
        assert_eq!(builder.new_label("else").name(), "else2");
        assert_eq!(builder.new_label("endif").name(), "endif3");
    }

    #[test]
    fn test_counters_survive_functions() {
        let mut builder = Builder::new();
        builder.begin_function("a", IrType::Void, vec![]);
        let first = builder.new_temp();
        builder.emit(Instr::Alloca { dest: first, ty: IrType::I32 });
        builder.new_label("while.cond");
        builder.end_function();

        builder.begin_function("b", IrType::Void, vec![]);
        assert_eq!(builder.new_temp(), Temp(2));
        assert_eq!(builder.new_label("while.cond").name(), "while.cond2");
        builder.end_function();

        let module = builder.into_inner_module();
        assert_eq!(module.functions.len(), 2);
        assert_eq!(module.functions[0].body.len(), 1);
        assert!(module.functions[1].body.is_empty());
    }

    #[test]
    fn test_block_lookup() {
        let mut builder = Builder::new();
        builder.begin_function("f", IrType::I32, vec![]);
        builder.emit_label(Label::entry());
        let end = builder.new_label("endif");
        builder.emit(Instr::Br { target: end.clone() });
        builder.emit_label(end);
        builder.emit(Instr::Ret { ty: IrType::I32, value: Value::Imm(0) });
        builder.end_function();

        let module = builder.into_inner_module();
        let f = module.function("f").unwrap();
        assert_eq!(f.labels().map(Label::name).collect::<Vec<_>>(), vec!["entry", "endif1"]);
        let entry = f.block("entry").unwrap();
        assert_eq!(entry.len(), 1);
        assert_eq!(entry[0].successors()[0].name(), "endif1");
        assert!(f.block("endif1").unwrap()[0].is_terminator());
        assert!(f.block("missing").is_none());
    }
}
