pub mod error;
pub mod expression;
pub mod statement;


pub use error::CodegenError;

use crate::ast::{Function, Program};
use crate::bytecode::{FunctionCode, Instruction, Label, Labels, Module};
use crate::lexer::Position;

use tracing::{debug, trace};

use std::collections::HashMap;

pub type CodegenResult<T> = Result<T, CodegenError>;

/// Name of the function that runs first and produces no value.
pub const ENTRY_FUNCTION: &str = "main";

/// Tree-walking generator from a checked [`Program`] to a stack machine
/// [`Module`].
///
/// Each function is emitted with symbolic [`Label`]s and then fixed up in one
/// pass once every label has been bound to an offset.
pub struct Generator {
    module_name: String,
    /// Every function in the program and its arity, filled before any body
    /// is emitted.
    callees: HashMap<String, usize>,
    current_function: String,
    is_entry: bool,
    slots: HashMap<String, usize>,
    code: Vec<Instruction<Label>>,
    labels: Labels,
}

impl Generator {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
            callees: HashMap::new(),
            current_function: String::new(),
            is_entry: false,
            slots: HashMap::new(),
            code: vec![],
            labels: Labels::new(),
        }
    }

    pub fn generate(&mut self, program: &Program) -> CodegenResult<Module> {
        self.callees = program
            .functions
            .iter()
            .map(|function| (function.name.clone(), function.arity()))
            .collect();

        let mut module = Module::new(self.module_name.as_str());
        for function in &program.functions {
            module.functions.push(self.generate_function(function)?);
        }

        debug!(
            module = %module.name,
            functions = module.functions.len(),
            "generated module"
        );
        Ok(module)
    }

    fn generate_function(&mut self, function: &Function) -> CodegenResult<FunctionCode> {
        self.current_function = function.name.clone();
        self.is_entry = function.name == ENTRY_FUNCTION && function.params.is_empty();
        self.slots.clear();
        self.code.clear();
        self.labels = Labels::new();

        for (param, _) in &function.params {
            self.slot_for(param);
        }

        self.generate_block(&function.body)?;
        self.emit_default_return();

        let instructions = self.fix_up()?;
        trace!(
            function = %function.name,
            instructions = instructions.len(),
            locals = self.slots.len(),
            "generated function"
        );

        Ok(FunctionCode {
            name: function.name.clone(),
            arity: function.arity(),
            locals: self.slots.len(),
            void: self.is_entry,
            instructions,
        })
    }

    /// Entry function falls off the end without a value; all others return 0.
    fn emit_default_return(&mut self) {
        if self.is_entry {
            self.emit(Instruction::ReturnVoid);
        } else {
            self.emit(Instruction::PushInt(0));
            self.emit(Instruction::Return);
        }
    }

    fn fix_up(&self) -> CodegenResult<Vec<Instruction>> {
        self.code
            .iter()
            .cloned()
            .map(|instruction| {
                instruction.map_target(|label| {
                    self.labels
                        .offset(label)
                        .ok_or_else(|| CodegenError::UnboundLabel {
                            function: self.current_function.clone(),
                            label: label.id(),
                        })
                })
            })
            .collect()
    }

    fn emit(&mut self, instruction: Instruction<Label>) {
        self.code.push(instruction);
    }

    fn new_label(&mut self) -> Label {
        self.labels.fresh()
    }

    /// Binds `label` to the offset of the next instruction emitted.
    fn bind(&mut self, label: Label) {
        self.labels.bind(label, self.code.len());
    }

    /// Slot of `name`, allocating the next free one on first sight.
    fn slot_for(&mut self, name: &str) -> usize {
        let next = self.slots.len();
        *self.slots.entry(name.to_string()).or_insert(next)
    }

    fn existing_slot(&self, name: &str, position: Position) -> CodegenResult<usize> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| CodegenError::UnknownVariable {
                name: name.to_string(),
                position,
            })
    }
}

pub fn generate(module_name: &str, program: &Program) -> CodegenResult<Module> {
    Generator::new(module_name).generate(program)
}
