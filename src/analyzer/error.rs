use crate::lexer::Position;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SemanticError {
    #[error("variable '{name}' not declared")]
    UndeclaredVariable { name: String, position: Position },

    #[error("variable '{name}' may not have been initialized")]
    UninitializedVariable { name: String, position: Position },

    #[error("'{name}' already declared in this scope")]
    RedeclaredInScope { name: String, position: Position },

    #[error("function '{name}' not declared")]
    UndeclaredFunction { name: String, position: Position },

    #[error("invalid variable '{name}'; functions cannot be used as values")]
    FunctionAsValue { name: String, position: Position },
}

impl SemanticError {
    pub fn position(&self) -> Position {
        match self {
            SemanticError::UndeclaredVariable { position, .. }
            | SemanticError::UninitializedVariable { position, .. }
            | SemanticError::RedeclaredInScope { position, .. }
            | SemanticError::UndeclaredFunction { position, .. }
            | SemanticError::FunctionAsValue { position, .. } => *position,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SemanticError::UndeclaredVariable { name, .. }
            | SemanticError::UninitializedVariable { name, .. }
            | SemanticError::RedeclaredInScope { name, .. }
            | SemanticError::UndeclaredFunction { name, .. }
            | SemanticError::FunctionAsValue { name, .. } => name,
        }
    }
}
