use crate::ast::{BinOp, Expr, UnOp};
use crate::lexer::{Position, TokenKind};
use crate::parser::prec::Precedence;
use crate::parser::{ParseResult, Parser, SyntaxError};

impl Parser {
    pub fn parse_expression(&mut self) -> ParseResult<(Expr, Position)> {
        self.parse_precedence(Precedence::Assignment)
    }

    /// Parses an expression whose operators all bind at least as tightly as
    /// `precedence`.
    fn parse_precedence(&mut self, precedence: Precedence) -> ParseResult<(Expr, Position)> {
        let mut expr = self.prefix()?;

        while precedence <= Precedence::from(self.peek().kind) {
            expr = self.infix(expr)?;
        }

        Ok(expr)
    }

    fn prefix(&mut self) -> ParseResult<(Expr, Position)> {
        let token = self.peek().clone();
        let position = token.position();

        match token.kind {
            TokenKind::IntLiteral => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<i32>()
                    .map_err(|_| SyntaxError::IntegerOutOfRange {
                        lexeme: token.lexeme.clone(),
                        position,
                    })?;
                Ok((Expr::Int(value), position))
            }
            TokenKind::FloatLiteral => {
                self.advance();
                let value = token
                    .lexeme
                    .parse::<f32>()
                    .map_err(|_| SyntaxError::UnexpectedToken {
                        expected: "float literal".to_string(),
                        found: token.lexeme.clone(),
                        kind: token.kind,
                        position,
                    })?;
                Ok((Expr::Float(value), position))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok((Expr::Variable(token.lexeme), position))
            }
            TokenKind::LParen => {
                self.advance();
                let (expr, _) = self.parse_expression()?;
                self.consume(TokenKind::RParen, "')' after expression")?;
                Ok((expr, position))
            }
            TokenKind::Minus => {
                self.advance();
                let operand = self.parse_precedence(Precedence::Unary)?;
                Ok((
                    Expr::UnOp {
                        unop: UnOp::Minus,
                        expression: Box::new(operand),
                    },
                    position,
                ))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn infix(&mut self, left: (Expr, Position)) -> ParseResult<(Expr, Position)> {
        let operator = self.advance().clone();

        match operator.kind {
            TokenKind::Assign => {
                let (target, position) = left;
                let Expr::Variable(var) = target else {
                    return Err(SyntaxError::InvalidAssignmentTarget {
                        position: operator.position(),
                    });
                };
                // right-associative: `a = b = c` is `a = (b = c)`
                let value = self.parse_precedence(Precedence::Assignment)?;
                Ok((
                    Expr::Assign {
                        var,
                        value: Box::new(value),
                    },
                    position,
                ))
            }
            TokenKind::LParen => self.finish_call(left, operator.position()),
            kind => {
                let binop = match kind {
                    TokenKind::Plus => BinOp::Add,
                    TokenKind::Minus => BinOp::Sub,
                    TokenKind::Mul => BinOp::Mul,
                    TokenKind::Div => BinOp::Div,
                    TokenKind::Mod => BinOp::Mod,
                    TokenKind::Eq => BinOp::Eq,
                    TokenKind::NotEq => BinOp::NotEq,
                    TokenKind::Less => BinOp::Less,
                    TokenKind::Greater => BinOp::Greater,
                    TokenKind::LessEq => BinOp::LessEq,
                    TokenKind::GreaterEq => BinOp::GreaterEq,
                    _ => {
                        return Err(SyntaxError::UnexpectedToken {
                            expected: "binary operator".to_string(),
                            found: operator.lexeme.clone(),
                            kind,
                            position: operator.position(),
                        });
                    }
                };
                // left-associative: the right operand binds one level tighter
                let right = self.parse_precedence(Precedence::from(kind).next())?;
                let position = left.1;
                Ok((
                    Expr::BinOp {
                        operator: binop,
                        l_value: Box::new(left),
                        r_value: Box::new(right),
                    },
                    position,
                ))
            }
        }
    }

    fn finish_call(
        &mut self,
        callee: (Expr, Position),
        paren: Position,
    ) -> ParseResult<(Expr, Position)> {
        let mut args = vec![];
        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if self.match_any(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "')' after arguments")?;

        match callee {
            (Expr::Variable(function), position) => Ok((Expr::Call { function, args }, position)),
            _ => Err(SyntaxError::InvalidCallTarget { position: paren }),
        }
    }
}
