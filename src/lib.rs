pub mod analyzer;
pub mod ast;
pub mod bytecode;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod vm;


pub use error::CompileError;

use crate::bytecode::Module;
use crate::vm::{Value, Vm};

use anyhow::Context;
use tracing::debug;

use std::fs;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_MODULE_NAME: &str = "Main";
pub const DEFAULT_ENTRY: &str = codegen::ENTRY_FUNCTION;

/// Runs every stage over `source` and returns the compiled module.
pub fn compile(source: &str, module_name: &str) -> Result<Module, CompileError> {
    let tokens = lexer::tokenize(source);
    let program = parser::parse(tokens)?;
    analyzer::analyze(&program)?;
    let module = codegen::generate(module_name, &program)?;
    debug!(module = module_name, "compiled");
    Ok(module)
}

/// Compiles the file at `input` and writes the listing to `output`.
///
/// Nothing is written when compilation fails.
pub fn compile_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> anyhow::Result<Module> {
    let input = input.as_ref();
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let module = compile(&source, DEFAULT_MODULE_NAME)?;

    let output = output.as_ref();
    module
        .write_to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(module)
}

/// Compiles `source` and runs `entry`, sending printed values to `output`.
pub fn run_source<W: Write>(source: &str, entry: &str, output: W) -> anyhow::Result<Option<Value>> {
    let module = compile(source, DEFAULT_MODULE_NAME)?;
    let mut vm = Vm::new(&module).with_output(output);
    Ok(vm.run(entry)?)
}
