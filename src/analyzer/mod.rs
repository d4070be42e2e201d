pub mod error;
pub mod scope;


pub use error::SemanticError;
pub use scope::{Resolution, Scope, ScopeStack};

use crate::ast::{Block, Expr, Function, Program, Stmt};
use crate::lexer::Position;

use tracing::{debug, trace};

pub type AnalyzeResult<T> = Result<T, SemanticError>;

/// Single pass over a parsed program checking that every variable is declared
/// before use and initialized before it is read, and that every called
/// function exists.
///
/// Function names live in the global frame and are all declared before any
/// body is checked, so a function may call one defined further down the file.
/// Argument counts are not compared against the callee's parameter list here.
#[derive(Debug, Default)]
pub struct Analyzer {
    scopes: ScopeStack,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            scopes: ScopeStack::new(),
        }
    }

    pub fn analyze(&mut self, program: &Program) -> AnalyzeResult<()> {
        for function in &program.functions {
            if !self.scopes.declare(&function.name) {
                return Err(SemanticError::RedeclaredInScope {
                    name: function.name.clone(),
                    position: function.position,
                });
            }
            self.scopes.initialize(&function.name);
        }

        for function in &program.functions {
            self.analyze_function(function)?;
        }

        debug!(functions = program.functions.len(), "semantic analysis passed");
        Ok(())
    }

    fn analyze_function(&mut self, function: &Function) -> AnalyzeResult<()> {
        trace!(function = %function.name, "analyzing function");
        self.scoped(|this| {
            for (param, position) in &function.params {
                if !this.scopes.declare(param) {
                    return Err(SemanticError::RedeclaredInScope {
                        name: param.clone(),
                        position: *position,
                    });
                }
                this.scopes.initialize(param);
            }
            this.analyze_block(&function.body)
        })
    }

    /// Runs `f` inside a fresh frame; the frame is popped even when `f` fails.
    fn scoped<T>(&mut self, f: impl FnOnce(&mut Self) -> AnalyzeResult<T>) -> AnalyzeResult<T> {
        self.scopes.enter();
        let result = f(self);
        self.scopes.exit();
        result
    }

    fn analyze_block(&mut self, block: &Block) -> AnalyzeResult<()> {
        self.scoped(|this| {
            for (stmt, _) in &block.statements {
                this.analyze_stmt(stmt)?;
            }
            Ok(())
        })
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) -> AnalyzeResult<()> {
        match stmt {
            Stmt::Assign { var, value } => self.analyze_assignment(var, value),
            Stmt::Expr(expr) | Stmt::Print(expr) => self.analyze_expr(expr),
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                self.analyze_expr(condition)?;
                self.analyze_block(then_block)?;
                if let Some(else_block) = else_block {
                    self.analyze_block(else_block)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                self.analyze_expr(condition)?;
                self.analyze_block(body)
            }
            Stmt::Return(Some(expr)) => self.analyze_expr(expr),
            Stmt::Return(None) => Ok(()),
            Stmt::Block(block) => self.analyze_block(block),
        }
    }

    /// A target with no local binding, including one named like a function,
    /// is declared in the current frame. It is only marked initialized after
    /// the right-hand side has been checked.
    fn analyze_assignment(&mut self, var: &str, value: &(Expr, Position)) -> AnalyzeResult<()> {
        if self.scopes.resolve(var).is_none_or(|resolution| resolution.is_global()) {
            self.scopes.declare(var);
        }

        self.analyze_expr(value)?;
        self.scopes.initialize(var);
        Ok(())
    }

    fn analyze_expr(&mut self, expr: &(Expr, Position)) -> AnalyzeResult<()> {
        let (expr, position) = expr;
        match expr {
            Expr::Int(_) | Expr::Float(_) => Ok(()),
            Expr::Variable(name) => match self.scopes.resolve(name) {
                None => Err(SemanticError::UndeclaredVariable {
                    name: name.clone(),
                    position: *position,
                }),
                Some(resolution) if resolution.is_global() => Err(SemanticError::FunctionAsValue {
                    name: name.clone(),
                    position: *position,
                }),
                Some(resolution) if !resolution.initialized => {
                    Err(SemanticError::UninitializedVariable {
                        name: name.clone(),
                        position: *position,
                    })
                }
                Some(_) => Ok(()),
            },
            Expr::BinOp {
                l_value, r_value, ..
            } => {
                self.analyze_expr(l_value)?;
                self.analyze_expr(r_value)
            }
            Expr::UnOp { expression, .. } => self.analyze_expr(expression),
            // locals never shadow a callee; calls only look at the global frame
            Expr::Call { function, args } => {
                if !self.scopes.is_function(function) {
                    return Err(SemanticError::UndeclaredFunction {
                        name: function.clone(),
                        position: *position,
                    });
                }
                for arg in args {
                    self.analyze_expr(arg)?;
                }
                Ok(())
            }
            Expr::Assign { var, value } => self.analyze_assignment(var, value),
        }
    }
}

pub fn analyze(program: &Program) -> AnalyzeResult<()> {
    Analyzer::new().analyze(program)
}
