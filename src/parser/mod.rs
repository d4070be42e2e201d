pub mod error;
pub mod expression;
pub mod function;
pub mod prec;
pub mod statement;

#[cfg(test)]
pub mod test;

pub use error::SyntaxError;

use crate::ast::Program;
use crate::lexer::{Position, Token, TokenKind};

use tracing::debug;

pub type ParseResult<T> = Result<T, SyntaxError>;

/// Recursive-descent parser over a fully tokenized source.
///
/// The token list must end with an end-of-input token, as produced by
/// [`crate::lexer::Tokenizer::all`]. The first mismatch aborts parsing.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|token| token.kind != TokenKind::Eof) {
            let position = tokens
                .last()
                .map(|token| Position::new(token.line, token.column + token.lexeme.chars().count()))
                .unwrap_or(Position::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", position.line, position.column));
        }
        Parser { tokens, current: 0 }
    }

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut functions = vec![];
        while !self.is_at_end() {
            if self.check(TokenKind::KeywordFunction) {
                functions.push(self.parse_function()?);
            } else {
                return Err(self.unexpected("'function' at top level"));
            }
        }
        debug!(functions = functions.len(), "parsed program");
        Ok(Program { functions })
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Consumes the current token if it has one of the given kinds.
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|kind| self.check(*kind)) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    fn consume(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Builds the error for the token under the cursor not matching `expected`.
    fn unexpected(&self, expected: &str) -> SyntaxError {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => SyntaxError::UnexpectedEof {
                expected: expected.to_string(),
                position: token.position(),
            },
            TokenKind::Invalid => SyntaxError::InvalidToken {
                lexeme: token.lexeme.clone(),
                position: token.position(),
            },
            kind => SyntaxError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.lexeme.clone(),
                kind,
                position: token.position(),
            },
        }
    }
}

pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse_program()
}
