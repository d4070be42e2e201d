use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

use crate::ast::BinOp;


/// Comparison carried by a compare-and-branch instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Cmp {
    /// The comparison that holds exactly when `self` does not.
    pub fn negate(self) -> Cmp {
        match self {
            Cmp::Eq => Cmp::Ne,
            Cmp::Ne => Cmp::Eq,
            Cmp::Lt => Cmp::Ge,
            Cmp::Le => Cmp::Gt,
            Cmp::Gt => Cmp::Le,
            Cmp::Ge => Cmp::Lt,
        }
    }

    pub fn from_binop(op: BinOp) -> Option<Cmp> {
        match op {
            BinOp::Eq => Some(Cmp::Eq),
            BinOp::NotEq => Some(Cmp::Ne),
            BinOp::Less => Some(Cmp::Lt),
            BinOp::LessEq => Some(Cmp::Le),
            BinOp::Greater => Some(Cmp::Gt),
            BinOp::GreaterEq => Some(Cmp::Ge),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Cmp::Eq => "eq",
            Cmp::Ne => "ne",
            Cmp::Lt => "lt",
            Cmp::Le => "le",
            Cmp::Gt => "gt",
            Cmp::Ge => "ge",
        }
    }
}

/// Opaque jump target handed out while a function is being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(usize);

impl Label {
    pub fn id(self) -> usize {
        self.0
    }
}

/// Side table mapping labels to instruction offsets.
#[derive(Debug, Default, Clone)]
pub struct Labels {
    offsets: Vec<Option<usize>>,
}

impl Labels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> Label {
        self.offsets.push(None);
        Label(self.offsets.len() - 1)
    }

    pub fn bind(&mut self, label: Label, offset: usize) {
        self.offsets[label.0] = Some(offset);
    }

    pub fn offset(&self, label: Label) -> Option<usize> {
        self.offsets.get(label.0).copied().flatten()
    }
}

/// Stack machine instruction. `T` is the jump target: [`Label`] while a
/// function is being emitted, a concrete instruction offset afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction<T = usize> {
    PushInt(i32),
    PushFloat(f32),
    Load(usize),
    Store(usize),
    Dup,
    Pop,

    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Neg,

    Jump(T),
    JumpIfZero(T),
    /// Pops right then left; jumps when `left cmp right` holds.
    JumpIf {
        cmp: Cmp,
        target: T,
    },

    Call {
        function: String,
        arity: usize,
    },
    Print,
    Return,
    ReturnVoid,
}

impl<T> Instruction<T> {
    /// Rewrites the jump target, if any, leaving every other instruction as is.
    pub fn map_target<U, E>(
        self,
        mut f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<Instruction<U>, E> {
        use Instruction::*;
        Ok(match self {
            PushInt(value) => PushInt(value),
            PushFloat(value) => PushFloat(value),
            Load(slot) => Load(slot),
            Store(slot) => Store(slot),
            Dup => Dup,
            Pop => Pop,
            Add => Add,
            Sub => Sub,
            Mul => Mul,
            Div => Div,
            Rem => Rem,
            Neg => Neg,
            Jump(target) => Jump(f(target)?),
            JumpIfZero(target) => JumpIfZero(f(target)?),
            JumpIf { cmp, target } => JumpIf {
                cmp,
                target: f(target)?,
            },
            Call { function, arity } => Call { function, arity },
            Print => Print,
            Return => Return,
            ReturnVoid => ReturnVoid,
        })
    }
}

impl Display for Instruction<usize> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match self {
            PushInt(value) => write!(f, "push {}", value),
            PushFloat(value) => write!(f, "pushf {:?}", value),
            Load(slot) => write!(f, "load {}", slot),
            Store(slot) => write!(f, "store {}", slot),
            Dup => write!(f, "dup"),
            Pop => write!(f, "pop"),
            Add => write!(f, "add"),
            Sub => write!(f, "sub"),
            Mul => write!(f, "mul"),
            Div => write!(f, "div"),
            Rem => write!(f, "rem"),
            Neg => write!(f, "neg"),
            Jump(target) => write!(f, "jump {:04}", target),
            JumpIfZero(target) => write!(f, "jz {:04}", target),
            JumpIf { cmp, target } => write!(f, "if_{} {:04}", cmp.mnemonic(), target),
            Call { function, arity } => write!(f, "call {} {}", function, arity),
            Print => write!(f, "print"),
            Return => write!(f, "ret"),
            ReturnVoid => write!(f, "ret_void"),
        }
    }
}

/// Finished code for one function, jump targets resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCode {
    pub name: String,
    pub arity: usize,
    /// Number of local slots, parameters included.
    pub locals: usize,
    /// `true` for the entry function, which produces no value.
    pub void: bool,
    pub instructions: Vec<Instruction>,
}

impl FunctionCode {
    /// Signature in the all-int form: `(II)I`, or `()V` for the entry function.
    pub fn descriptor(&self) -> String {
        let params = "I".repeat(self.arity);
        let ret = if self.void { "V" } else { "I" };
        format!("({}){}", params, ret)
    }
}

impl Display for FunctionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            ".function {} {} locals={}",
            self.name,
            self.descriptor(),
            self.locals
        )?;
        for (offset, instruction) in self.instructions.iter().enumerate() {
            writeln!(f, "  {:04}  {}", offset, instruction)?;
        }
        writeln!(f, ".end")
    }
}

/// A compiled program: named functions in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    pub functions: Vec<FunctionCode>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Module {
            name: name.into(),
            functions: vec![],
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunctionCode> {
        self.functions.iter().find(|function| function.name == name)
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, ".module {}", self.name)?;
        for function in &self.functions {
            write!(f, "{}", function)?;
        }
        Ok(())
    }
}
