//! S-expression rendering of the AST, used by `--emit-ast` and the tests.
//!
//! Expressions print on one line (`(+ 2 (* 3 4))`); statements inside a block
//! go on their own indented line.

use crate::ast::{Block, Expr, Function, Program, Stmt};

pub fn expr_to_string(expr: &Expr) -> String {
    match expr {
        Expr::Int(i) => i.to_string(),
        Expr::Float(f) => format!("{:?}", f),
        Expr::Variable(name) => name.clone(),
        Expr::BinOp {
            operator,
            l_value,
            r_value,
        } => format!(
            "({} {} {})",
            operator,
            expr_to_string(&l_value.0),
            expr_to_string(&r_value.0)
        ),
        Expr::UnOp { unop, expression } => {
            format!("({} {})", unop, expr_to_string(&expression.0))
        }
        Expr::Call { function, args } => {
            let mut out = format!("(call {}", function);
            for (arg, _) in args {
                out.push(' ');
                out.push_str(&expr_to_string(arg));
            }
            out.push(')');
            out
        }
        Expr::Assign { var, value } => format!("(= {} {})", var, expr_to_string(&value.0)),
    }
}

pub fn program_to_string(program: &Program) -> String {
    let mut printer = Printer::default();
    printer.program(program);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    fn newline(&mut self) {
        self.out.push('\n');
        self.out.push_str(&"  ".repeat(self.indent));
    }

    fn program(&mut self, program: &Program) {
        self.out.push_str("(program");
        self.indent += 1;
        for function in &program.functions {
            self.newline();
            self.function(function);
        }
        self.indent -= 1;
        self.out.push(')');
    }

    fn function(&mut self, function: &Function) {
        let params = function
            .params
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.out
            .push_str(&format!("(fun {} ({})", function.name, params));
        self.indent += 1;
        self.newline();
        self.block(&function.body);
        self.indent -= 1;
        self.out.push(')');
    }

    fn block(&mut self, block: &Block) {
        self.out.push_str("(block");
        self.indent += 1;
        for (stmt, _) in &block.statements {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.out.push(')');
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { var, value } => {
                self.out
                    .push_str(&format!("(= {} {})", var, expr_to_string(&value.0)));
            }
            Stmt::Expr((expr, _)) => {
                self.out
                    .push_str(&format!("(expr-stmt {})", expr_to_string(expr)));
            }
            Stmt::Print((expr, _)) => {
                self.out
                    .push_str(&format!("(print {})", expr_to_string(expr)));
            }
            Stmt::Return(Some((expr, _))) => {
                self.out
                    .push_str(&format!("(return {})", expr_to_string(expr)));
            }
            Stmt::Return(None) => self.out.push_str("(return)"),
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                let head = if else_block.is_some() { "if-else" } else { "if" };
                self.out
                    .push_str(&format!("({} {}", head, expr_to_string(&condition.0)));
                self.indent += 1;
                self.newline();
                self.block(then_block);
                if let Some(else_block) = else_block {
                    self.newline();
                    self.block(else_block);
                }
                self.indent -= 1;
                self.out.push(')');
            }
            Stmt::While { condition, body } => {
                self.out
                    .push_str(&format!("(while {}", expr_to_string(&condition.0)));
                self.indent += 1;
                self.newline();
                self.block(body);
                self.indent -= 1;
                self.out.push(')');
            }
            Stmt::Block(block) => self.block(block),
        }
    }
}
