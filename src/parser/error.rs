use crate::lexer::{Position, TokenKind};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error("expected {expected}, found '{found}' ({kind}) at {position}")]
    UnexpectedToken {
        expected: String,
        found: String,
        kind: TokenKind,
        position: Position,
    },

    #[error("expected {expected} but reached end of input at {position}")]
    UnexpectedEof { expected: String, position: Position },

    #[error("invalid assignment target at {position}; only a variable can be assigned")]
    InvalidAssignmentTarget { position: Position },

    #[error("invalid call target at {position}; only a named function can be called")]
    InvalidCallTarget { position: Position },

    #[error("integer literal '{lexeme}' does not fit in 32 bits at {position}")]
    IntegerOutOfRange { lexeme: String, position: Position },

    #[error("invalid character '{lexeme}' at {position}")]
    InvalidToken { lexeme: String, position: Position },
}

impl SyntaxError {
    pub fn position(&self) -> Position {
        match self {
            SyntaxError::UnexpectedToken { position, .. }
            | SyntaxError::UnexpectedEof { position, .. }
            | SyntaxError::InvalidAssignmentTarget { position }
            | SyntaxError::InvalidCallTarget { position }
            | SyntaxError::IntegerOutOfRange { position, .. }
            | SyntaxError::InvalidToken { position, .. } => *position,
        }
    }
}
