use crate::lexer::Position;

use std::fmt::{self, Display, Formatter};
use std::vec::Vec;

pub mod printer;

#[cfg(test)]
pub mod test;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i32),
    Float(f32),

    Variable(String),

    BinOp {
        operator: BinOp,
        l_value: Box<(Expr, Position)>,
        r_value: Box<(Expr, Position)>,
    },

    UnOp {
        unop: UnOp,
        expression: Box<(Expr, Position)>,
    },

    Call {
        function: String,
        args: Vec<(Expr, Position)>,
    },

    // assignment nested inside a larger expression, e.g. `a = b = 1;`
    Assign {
        var: String,
        value: Box<(Expr, Position)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

impl BinOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOp::Eq
                | BinOp::NotEq
                | BinOp::Less
                | BinOp::Greater
                | BinOp::LessEq
                | BinOp::GreaterEq
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Minus,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Minus => f.write_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign {
        var: String,
        value: (Expr, Position),
    },
    Expr((Expr, Position)),
    Print((Expr, Position)),
    If {
        condition: (Expr, Position),
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        condition: (Expr, Position),
        body: Block,
    },
    Return(Option<(Expr, Position)>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<(Stmt, Position)>,
}

impl Block {
    pub fn new(statements: Vec<(Stmt, Position)>) -> Self {
        Block { statements }
    }

    /// Wraps a lone statement so `if`/`while` bodies are always blocks.
    pub fn wrap(statement: (Stmt, Position)) -> Self {
        match statement {
            (Stmt::Block(block), _) => block,
            other => Block::new(vec![other]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub params: Vec<(String, Position)>,
    pub body: Block,
    pub position: Position,
}

impl Function {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}
