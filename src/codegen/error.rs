use crate::lexer::Position;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("no slot allocated for variable '{name}'")]
    UnknownVariable { name: String, position: Position },

    #[error("call to unknown function '{name}'")]
    UnknownFunction { name: String, position: Position },

    #[error("function '{name}' takes {expected} argument(s) but {found} were supplied")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        position: Position,
    },

    #[error("label {label} in function '{function}' was never bound")]
    UnboundLabel { function: String, label: usize },
}

impl CodegenError {
    pub fn position(&self) -> Option<Position> {
        match self {
            CodegenError::UnknownVariable { position, .. }
            | CodegenError::UnknownFunction { position, .. }
            | CodegenError::ArityMismatch { position, .. } => Some(*position),
            CodegenError::UnboundLabel { .. } => None,
        }
    }
}
