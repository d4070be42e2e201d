use crate::analyzer::SemanticError;
use crate::codegen::CodegenError;
use crate::lexer::Position;
use crate::parser::SyntaxError;

use ariadne::{Color, ColorGenerator, Fmt, Label, Report, ReportKind, Source};
use thiserror::Error;
use yansi::Paint;

use std::ops::Range;

pub type Diagnostic = Report<'static, (String, Range<usize>)>;

/// First error raised by any compilation stage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Syntax(_) => "E-syntax",
            CompileError::Semantic(_) => "E-semantic",
            CompileError::Codegen(_) => "E-codegen",
        }
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            CompileError::Syntax(error) => Some(error.position()),
            CompileError::Semantic(error) => Some(error.position()),
            CompileError::Codegen(error) => error.position(),
        }
    }

    /// Builds a report pointing at the offending character of `source`.
    pub fn report(&self, file: &str, source: &str) -> Diagnostic {
        let span = self
            .position()
            .map(|position| char_span(source, position))
            .unwrap_or(0..0);

        Report::build(ReportKind::Error, (file.to_string(), span.clone()))
            .with_code(self.code())
            .with_message(self.to_string())
            .with_label(
                Label::new((file.to_string(), span))
                    .with_message(self.label_message())
                    .with_color(ColorGenerator::new().next()),
            )
            .finish()
    }

    fn label_message(&self) -> String {
        match self {
            CompileError::Syntax(SyntaxError::UnexpectedToken { expected, found, .. }) => {
                format!(
                    "expected {} here, found {}",
                    expected,
                    Fmt::fg(found, Color::BrightRed).bold()
                )
            }
            CompileError::Syntax(SyntaxError::UnexpectedEof { expected, .. }) => {
                format!("expected {} before the end of input", expected)
            }
            CompileError::Syntax(SyntaxError::InvalidToken { lexeme, .. }) => format!(
                "{} is not part of the language",
                Fmt::fg(lexeme, Color::BrightRed).bold()
            ),
            CompileError::Syntax(_) => "here".to_string(),
            CompileError::Semantic(error) => {
                let name = highlight(error.name());
                match error {
                    SemanticError::UndeclaredVariable { .. } => {
                        format!("{} is read before any assignment", name)
                    }
                    SemanticError::UninitializedVariable { .. } => {
                        format!("{} has no value yet", name)
                    }
                    SemanticError::RedeclaredInScope { .. } => {
                        format!("{} is declared again here", name)
                    }
                    SemanticError::UndeclaredFunction { .. } => {
                        format!("no function named {}", name)
                    }
                    SemanticError::FunctionAsValue { .. } => {
                        format!("{} is a function", name)
                    }
                }
            }
            CompileError::Codegen(CodegenError::ArityMismatch { name, expected, .. }) => {
                format!("{} expects {} argument(s)", highlight(name), expected)
            }
            CompileError::Codegen(error) => error.to_string(),
        }
    }
}

fn highlight(name: &str) -> String {
    format!("{}", Fmt::fg(name, Color::Blue).bold())
}

/// Character span of one column at `position`, clamped to the source.
///
/// Lines and columns are 1-based; a position past the end of its line (as
/// for end of input) lands on the last character.
pub fn char_span(source: &str, position: Position) -> Range<usize> {
    let text = Source::from(source);
    let total = source.chars().count();
    let offset = text
        .line(position.line.saturating_sub(1))
        .map(|line| line.offset() + position.column.saturating_sub(1))
        .unwrap_or(total);

    let start = offset.min(total.saturating_sub(1));
    if total == 0 {
        0..0
    } else {
        start..start + 1
    }
}
