use crate::ast::{BinOp, Expr, UnOp};
use crate::bytecode::{Cmp, Instruction, Label};
use crate::codegen::{CodegenError, CodegenResult, Generator};
use crate::lexer::Position;

impl Generator {
    /// Emits code leaving the value of `expr` on top of the stack.
    pub fn generate_expr(&mut self, expr: &(Expr, Position)) -> CodegenResult<()> {
        let (expr, position) = expr;
        match expr {
            Expr::Int(value) => self.emit(Instruction::PushInt(*value)),
            Expr::Float(value) => self.emit(Instruction::PushFloat(*value)),
            Expr::Variable(name) => {
                let slot = self.existing_slot(name, *position)?;
                self.emit(Instruction::Load(slot));
            }
            Expr::BinOp {
                operator,
                l_value,
                r_value,
            } => {
                self.generate_expr(l_value)?;
                self.generate_expr(r_value)?;
                if let Some(cmp) = Cmp::from_binop(*operator) {
                    self.materialize_comparison(cmp);
                } else if let Some(instruction) = arithmetic(*operator) {
                    self.emit(instruction);
                }
            }
            Expr::UnOp {
                unop: UnOp::Minus,
                expression,
            } => {
                self.generate_expr(expression)?;
                self.emit(Instruction::Neg);
            }
            Expr::Call { function, args } => {
                let expected = self.callees.get(function).copied().ok_or_else(|| {
                    CodegenError::UnknownFunction {
                        name: function.clone(),
                        position: *position,
                    }
                })?;
                if expected != args.len() {
                    return Err(CodegenError::ArityMismatch {
                        name: function.clone(),
                        expected,
                        found: args.len(),
                        position: *position,
                    });
                }

                for arg in args {
                    self.generate_expr(arg)?;
                }
                self.emit(Instruction::Call {
                    function: function.clone(),
                    arity: expected,
                });
            }
            Expr::Assign { var, value } => {
                self.generate_expr(value)?;
                self.emit(Instruction::Dup);
                let slot = self.slot_for(var);
                self.emit(Instruction::Store(slot));
            }
        }
        Ok(())
    }

    /// Turns the two operands on the stack into 1 or 0.
    fn materialize_comparison(&mut self, cmp: Cmp) {
        let true_label = self.new_label();
        let end_label = self.new_label();

        self.emit(Instruction::JumpIf {
            cmp,
            target: true_label,
        });
        self.emit(Instruction::PushInt(0));
        self.emit(Instruction::Jump(end_label));
        self.bind(true_label);
        self.emit(Instruction::PushInt(1));
        self.bind(end_label);
    }

    /// Emits a branch to `false_label` taken when `condition` does not hold.
    ///
    /// A comparison at the root compiles straight to a compare-and-branch on
    /// the negated comparison; any other expression is evaluated and tested
    /// against zero.
    pub fn generate_condition(
        &mut self,
        condition: &(Expr, Position),
        false_label: Label,
    ) -> CodegenResult<()> {
        if let (
            Expr::BinOp {
                operator,
                l_value,
                r_value,
            },
            _,
        ) = condition
        {
            if let Some(cmp) = Cmp::from_binop(*operator) {
                self.generate_expr(l_value)?;
                self.generate_expr(r_value)?;
                self.emit(Instruction::JumpIf {
                    cmp: cmp.negate(),
                    target: false_label,
                });
                return Ok(());
            }
        }

        self.generate_expr(condition)?;
        self.emit(Instruction::JumpIfZero(false_label));
        Ok(())
    }
}

fn arithmetic(op: BinOp) -> Option<Instruction<Label>> {
    match op {
        BinOp::Add => Some(Instruction::Add),
        BinOp::Sub => Some(Instruction::Sub),
        BinOp::Mul => Some(Instruction::Mul),
        BinOp::Div => Some(Instruction::Div),
        BinOp::Mod => Some(Instruction::Rem),
        _ => None,
    }
}
