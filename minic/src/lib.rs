//! Compiles minic source text into textual IR.
//!
//! ```
//! let ir = minic::compile("int main() { return 42; }").unwrap();
//! assert!(ir.contains("define i32 @main() {"));
//! assert!(ir.contains("  ret i32 42"));
//! ```

pub use minic_source::{CodegenError, CompileError, LexError, LexErrorKind, ParseError, Position};

use tracing::debug;

/// Runs the whole pipeline on `source`: lexing, parsing and code generation.
/// The first error aborts the compilation and no output is produced.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = minic_parser::tokenize(source)?;
    debug!(tokens = tokens.len(), "lexed source");

    let functions = minic_parser::parse(&tokens)?;
    debug!(functions = functions.len(), "parsed source");

    let ir = minic_codegen::generate(&functions)?;
    debug!(bytes = ir.len(), "generated ir");
    Ok(ir)
}
