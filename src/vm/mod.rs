pub mod error;


pub use error::RuntimeError;

use crate::bytecode::{Cmp, FunctionCode, Instruction, Module};

use tracing::{debug, trace};

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Stdout, Write};

pub type RunResult<T> = Result<T, RuntimeError>;

/// Maximum number of live call frames.
pub const MAX_CALL_DEPTH: usize = 10_000;

/// Runtime value. Integer arithmetic wraps at 32 bits; mixing in a float
/// promotes both operands to `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
}

impl Value {
    pub fn is_zero(self) -> bool {
        match self {
            Value::Int(value) => value == 0,
            Value::Float(value) => value == 0.0,
        }
    }

    fn as_f32(self) -> f32 {
        match self {
            Value::Int(value) => value as f32,
            Value::Float(value) => value,
        }
    }

    fn negate(self) -> Value {
        match self {
            Value::Int(value) => Value::Int(value.wrapping_neg()),
            Value::Float(value) => Value::Float(-value),
        }
    }

    fn compare(self, other: Value, cmp: Cmp) -> bool {
        match (self, other) {
            (Value::Int(l), Value::Int(r)) => compare_with(l, r, cmp),
            (l, r) => compare_with(l.as_f32(), r.as_f32(), cmp),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
        }
    }
}

fn compare_with<T: PartialOrd>(l: T, r: T, cmp: Cmp) -> bool {
    match cmp {
        Cmp::Eq => l == r,
        Cmp::Ne => l != r,
        Cmp::Lt => l < r,
        Cmp::Le => l <= r,
        Cmp::Gt => l > r,
        Cmp::Ge => l >= r,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

/// `None` means an integer division or remainder by zero.
fn arith(op: Arith, left: Value, right: Value) -> Option<Value> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => {
            let value = match op {
                Arith::Add => l.wrapping_add(r),
                Arith::Sub => l.wrapping_sub(r),
                Arith::Mul => l.wrapping_mul(r),
                Arith::Div if r == 0 => return None,
                Arith::Div => l.wrapping_div(r),
                Arith::Rem if r == 0 => return None,
                Arith::Rem => l.wrapping_rem(r),
            };
            Some(Value::Int(value))
        }
        (l, r) => {
            let (l, r) = (l.as_f32(), r.as_f32());
            let value = match op {
                Arith::Add => l + r,
                Arith::Sub => l - r,
                Arith::Mul => l * r,
                Arith::Div => l / r,
                Arith::Rem => l % r,
            };
            Some(Value::Float(value))
        }
    }
}

struct Frame<'m> {
    function: &'m FunctionCode,
    ip: usize,
    locals: Vec<Option<Value>>,
    /// Height of the operand stack when the frame was entered.
    base: usize,
}

/// Loads a [`Module`] and runs its functions on an operand stack.
///
/// `print` writes one value per line to the output sink, stdout by default.
pub struct Vm<'m, W: Write = Stdout> {
    functions: HashMap<&'m str, &'m FunctionCode>,
    output: W,
    stack: Vec<Value>,
    frames: Vec<Frame<'m>>,
}

impl<'m> Vm<'m, Stdout> {
    pub fn new(module: &'m Module) -> Self {
        let functions = module
            .functions
            .iter()
            .map(|function| (function.name.as_str(), function))
            .collect();
        Vm {
            functions,
            output: io::stdout(),
            stack: vec![],
            frames: vec![],
        }
    }
}

impl<'m, W: Write> Vm<'m, W> {
    pub fn with_output<O: Write>(self, output: O) -> Vm<'m, O> {
        Vm {
            functions: self.functions,
            output,
            stack: self.stack,
            frames: self.frames,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Invokes `entry` with no arguments and runs until it returns.
    pub fn run(&mut self, entry: &str) -> RunResult<Option<Value>> {
        let function = self.lookup(entry)?;
        if function.arity != 0 {
            return Err(RuntimeError::EntryTakesArguments {
                name: entry.to_string(),
                arity: function.arity,
            });
        }

        debug!(entry, "running module");
        self.stack.clear();
        self.frames.clear();
        self.push_frame(function, vec![])?;

        let result = self.execute();
        self.output.flush()?;
        result
    }

    fn lookup(&self, name: &str) -> RunResult<&'m FunctionCode> {
        self.functions
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UnknownFunction {
                name: name.to_string(),
            })
    }

    fn push_frame(&mut self, function: &'m FunctionCode, args: Vec<Value>) -> RunResult<()> {
        if self.frames.len() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::CallDepthExceeded {
                limit: MAX_CALL_DEPTH,
            });
        }

        let mut locals = vec![None; function.locals.max(args.len())];
        for (slot, arg) in args.into_iter().enumerate() {
            locals[slot] = Some(arg);
        }

        trace!(function = %function.name, depth = self.frames.len(), "call");
        self.frames.push(Frame {
            function,
            ip: 0,
            locals,
            base: self.stack.len(),
        });
        Ok(())
    }

    fn frame(&mut self) -> &mut Frame<'m> {
        // `execute` only runs while at least one frame is live
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn pop(&mut self) -> RunResult<Value> {
        let base = self.frames.last().map_or(0, |frame| frame.base);
        if self.stack.len() > base {
            if let Some(value) = self.stack.pop() {
                return Ok(value);
            }
        }

        let (function, offset) = self
            .frames
            .last()
            .map(|frame| (frame.function.name.clone(), frame.ip.saturating_sub(1)))
            .unwrap_or_default();
        Err(RuntimeError::StackUnderflow { function, offset })
    }

    fn pop_pair(&mut self) -> RunResult<(Value, Value)> {
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    fn jump(&mut self, target: usize) -> RunResult<()> {
        let frame = self.frame();
        if target >= frame.function.instructions.len() {
            return Err(RuntimeError::InvalidJump {
                function: frame.function.name.clone(),
                target,
            });
        }
        frame.ip = target;
        Ok(())
    }

    fn binary(&mut self, op: Arith) -> RunResult<()> {
        let (left, right) = self.pop_pair()?;
        let value = arith(op, left, right).ok_or_else(|| RuntimeError::DivisionByZero {
            function: self.frame().function.name.clone(),
        })?;
        self.stack.push(value);
        Ok(())
    }

    /// Pops the current frame and hands `value` to the caller. Returns the
    /// final result once the entry frame is gone.
    fn return_from(&mut self, value: Option<Value>) -> Option<Option<Value>> {
        if let Some(frame) = self.frames.pop() {
            self.stack.truncate(frame.base);
        }
        if self.frames.is_empty() {
            return Some(value);
        }
        self.stack.push(value.unwrap_or(Value::Int(0)));
        None
    }

    fn execute(&mut self) -> RunResult<Option<Value>> {
        loop {
            let frame = self.frame();
            let function = frame.function;
            let ip = frame.ip;
            let instruction = function.instructions.get(ip).ok_or_else(|| {
                RuntimeError::InvalidJump {
                    function: function.name.clone(),
                    target: ip,
                }
            })?;
            frame.ip += 1;

            match instruction {
                Instruction::PushInt(value) => self.stack.push(Value::Int(*value)),
                Instruction::PushFloat(value) => self.stack.push(Value::Float(*value)),
                Instruction::Load(slot) => {
                    let value = self
                        .frame()
                        .locals
                        .get(*slot)
                        .copied()
                        .flatten()
                        .ok_or_else(|| RuntimeError::UninitializedSlot {
                            function: function.name.clone(),
                            slot: *slot,
                        })?;
                    self.stack.push(value);
                }
                Instruction::Store(slot) => {
                    let value = self.pop()?;
                    let locals = &mut self.frame().locals;
                    if *slot >= locals.len() {
                        locals.resize(*slot + 1, None);
                    }
                    locals[*slot] = Some(value);
                }
                Instruction::Dup => {
                    let value = self.pop()?;
                    self.stack.push(value);
                    self.stack.push(value);
                }
                Instruction::Pop => {
                    self.pop()?;
                }
                Instruction::Add => self.binary(Arith::Add)?,
                Instruction::Sub => self.binary(Arith::Sub)?,
                Instruction::Mul => self.binary(Arith::Mul)?,
                Instruction::Div => self.binary(Arith::Div)?,
                Instruction::Rem => self.binary(Arith::Rem)?,
                Instruction::Neg => {
                    let value = self.pop()?;
                    self.stack.push(value.negate());
                }
                Instruction::Jump(target) => self.jump(*target)?,
                Instruction::JumpIfZero(target) => {
                    if self.pop()?.is_zero() {
                        self.jump(*target)?;
                    }
                }
                Instruction::JumpIf { cmp, target } => {
                    let (left, right) = self.pop_pair()?;
                    if left.compare(right, *cmp) {
                        self.jump(*target)?;
                    }
                }
                Instruction::Call {
                    function: callee,
                    arity,
                } => {
                    let callee = self.lookup(callee)?;
                    let mut args = (0..*arity)
                        .map(|_| self.pop())
                        .collect::<RunResult<Vec<_>>>()?;
                    args.reverse();
                    self.push_frame(callee, args)?;
                }
                Instruction::Print => {
                    let value = self.pop()?;
                    writeln!(self.output, "{}", value)?;
                }
                Instruction::Return => {
                    let value = self.pop()?;
                    if let Some(result) = self.return_from(Some(value)) {
                        return Ok(result);
                    }
                }
                Instruction::ReturnVoid => {
                    if let Some(result) = self.return_from(None) {
                        return Ok(result);
                    }
                }
            }
        }
    }
}
