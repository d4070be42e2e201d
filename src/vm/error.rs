use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("function '{name}' not found in module")]
    UnknownFunction { name: String },

    #[error("entry function '{name}' takes {arity} argument(s); entry functions take none")]
    EntryTakesArguments { name: String, arity: usize },

    #[error("division by zero in '{function}'")]
    DivisionByZero { function: String },

    #[error("operand stack underflow in '{function}' at {offset:04}")]
    StackUnderflow { function: String, offset: usize },

    #[error("jump to invalid offset {target:04} in '{function}'")]
    InvalidJump { function: String, target: usize },

    #[error("local slot {slot} read before being written in '{function}'")]
    UninitializedSlot { function: String, slot: usize },

    #[error("call depth exceeded {limit} frames")]
    CallDepthExceeded { limit: usize },

    #[error("failed to write program output: {0}")]
    Io(#[from] io::Error),
}
