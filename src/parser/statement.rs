use crate::ast::{Block, Expr, Stmt};
use crate::lexer::{Position, TokenKind};
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parses statements up to and including the closing `}`. The opening
    /// brace has already been consumed.
    pub fn parse_block_body(&mut self) -> ParseResult<Block> {
        let mut statements = vec![];
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.consume(TokenKind::RBrace, "'}' after block")?;
        Ok(Block::new(statements))
    }

    pub fn parse_statement(&mut self) -> ParseResult<(Stmt, Position)> {
        let position = self.peek().position();
        match self.peek().kind {
            TokenKind::KeywordIf => {
                self.advance();
                self.parse_if(position)
            }
            TokenKind::KeywordWhile => {
                self.advance();
                self.parse_while(position)
            }
            TokenKind::KeywordPrint => {
                self.advance();
                self.parse_print(position)
            }
            TokenKind::KeywordReturn => {
                self.advance();
                self.parse_return(position)
            }
            TokenKind::LBrace => {
                self.advance();
                Ok((Stmt::Block(self.parse_block_body()?), position))
            }
            _ => self.parse_expression_statement(position),
        }
    }

    fn parse_if(&mut self, position: Position) -> ParseResult<(Stmt, Position)> {
        self.consume(TokenKind::LParen, "'(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "')' after if condition")?;

        let then_block = Block::wrap(self.parse_statement()?);
        let else_block = if self.match_any(&[TokenKind::KeywordElse]).is_some() {
            Some(Block::wrap(self.parse_statement()?))
        } else {
            None
        };

        Ok((
            Stmt::If {
                condition,
                then_block,
                else_block,
            },
            position,
        ))
    }

    fn parse_while(&mut self, position: Position) -> ParseResult<(Stmt, Position)> {
        self.consume(TokenKind::LParen, "'(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "')' after while condition")?;
        let body = Block::wrap(self.parse_statement()?);

        Ok((Stmt::While { condition, body }, position))
    }

    fn parse_print(&mut self, position: Position) -> ParseResult<(Stmt, Position)> {
        self.consume(TokenKind::LParen, "'(' after 'print'")?;
        let value = self.parse_expression()?;
        self.consume(TokenKind::RParen, "')' after value")?;
        self.consume(TokenKind::Semicolon, "';' after print statement")?;
        Ok((Stmt::Print(value), position))
    }

    fn parse_return(&mut self, position: Position) -> ParseResult<(Stmt, Position)> {
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "';' after return value")?;
        Ok((Stmt::Return(value), position))
    }

    /// `name = expr;` becomes [`Stmt::Assign`]; anything else is an
    /// expression statement.
    fn parse_expression_statement(&mut self, position: Position) -> ParseResult<(Stmt, Position)> {
        let (expr, expr_position) = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "';' after expression or assignment")?;

        let stmt = match expr {
            Expr::Assign { var, value } => Stmt::Assign { var, value: *value },
            expr => Stmt::Expr((expr, expr_position)),
        };
        Ok((stmt, position))
    }
}
