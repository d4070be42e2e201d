use crate::ast::{Block, Stmt};
use crate::bytecode::Instruction;
use crate::codegen::{CodegenResult, Generator};

impl Generator {
    pub fn generate_block(&mut self, block: &Block) -> CodegenResult<()> {
        for (stmt, _) in &block.statements {
            self.generate_stmt(stmt)?;
        }
        Ok(())
    }

    pub fn generate_stmt(&mut self, stmt: &Stmt) -> CodegenResult<()> {
        match stmt {
            Stmt::Assign { var, value } => {
                self.generate_expr(value)?;
                let slot = self.slot_for(var);
                self.emit(Instruction::Store(slot));
            }
            Stmt::Expr(expr) => {
                self.generate_expr(expr)?;
                self.emit(Instruction::Pop);
            }
            Stmt::Print(expr) => {
                self.generate_expr(expr)?;
                self.emit(Instruction::Print);
            }
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                let else_label = self.new_label();
                let end_label = self.new_label();

                self.generate_condition(condition, else_label)?;
                self.generate_block(then_block)?;
                self.emit(Instruction::Jump(end_label));
                self.bind(else_label);
                if let Some(else_block) = else_block {
                    self.generate_block(else_block)?;
                }
                self.bind(end_label);
            }
            Stmt::While { condition, body } => {
                let start_label = self.new_label();
                let end_label = self.new_label();

                self.bind(start_label);
                self.generate_condition(condition, end_label)?;
                self.generate_block(body)?;
                self.emit(Instruction::Jump(start_label));
                self.bind(end_label);
            }
            Stmt::Return(Some(expr)) => {
                self.generate_expr(expr)?;
                self.emit(Instruction::Return);
            }
            // a bare return still hands callers the default value
            Stmt::Return(None) => self.emit_default_return(),
            Stmt::Block(block) => self.generate_block(block)?,
        }
        Ok(())
    }
}
