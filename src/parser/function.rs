use crate::ast::Function;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

use tracing::trace;

impl Parser {
    /// `function name(a, b) { ... }`
    pub fn parse_function(&mut self) -> ParseResult<Function> {
        let keyword = self.consume(TokenKind::KeywordFunction, "'function'")?;
        let name = self.consume(TokenKind::Identifier, "function name after 'function'")?;
        self.consume(TokenKind::LParen, "'(' after function name")?;

        let mut params = vec![];
        if !self.check(TokenKind::RParen) {
            loop {
                let param = self.consume(TokenKind::Identifier, "parameter name")?;
                params.push((param.lexeme.clone(), param.position()));
                if self.match_any(&[TokenKind::Comma]).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "')' after parameters")?;

        self.consume(TokenKind::LBrace, "'{' before function body")?;
        let body = self.parse_block_body()?;

        trace!(function = %name.lexeme, params = params.len(), "parsed function");

        Ok(Function {
            name: name.lexeme,
            params,
            body,
            position: keyword.position(),
        })
    }
}
