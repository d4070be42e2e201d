use crate::source::SourceCursor;

use logos::Logos;
use tracing::debug;

use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

#[cfg(test)]
pub mod test;

/// Separators skipped between tokens. Non-breaking spaces (U+00A0, U+2007,
/// U+202F) are not blanks and come out as invalid characters.
fn is_blank(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\n'
            | '\r'
            | '\u{0B}'
            | '\u{0C}'
            | '\u{1C}'..='\u{1F}'
            | '\u{1680}'
            | '\u{2000}'..='\u{2006}'
            | '\u{2008}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Raw classification produced by logos. Positions and invalid characters are
/// handled by [`Tokenizer`].
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\n\r\x0B\x0C\x1C-\x1F\x{1680}\x{2000}-\x{2006}\x{2008}-\x{200A}\x{2028}\x{2029}\x{205F}\x{3000}]+")] // blanks, see `is_blank`
#[logos(skip r"//[^\n]*")] // line comments
enum RawToken {
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*")]
    Identifier,

    #[token("int")]
    KeywordInt,

    #[token("float")]
    KeywordFloat,

    #[token("if")]
    KeywordIf,

    #[token("else")]
    KeywordElse,

    #[token("while")]
    KeywordWhile,

    #[token("function")]
    KeywordFunction,

    #[token("return")]
    KeywordReturn,

    #[token("print")]
    KeywordPrint,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("%")]
    Mod,

    #[token("=")]
    Assign,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("<=")]
    LessEq,

    #[token(">=")]
    GreaterEq,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    IntLiteral,
    FloatLiteral,
    Identifier,

    KeywordInt,
    KeywordFloat,
    KeywordIf,
    KeywordElse,
    KeywordWhile,
    KeywordFunction,
    KeywordReturn,
    KeywordPrint,

    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Assign,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    Eof,
    Invalid,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Float => TokenKind::FloatLiteral,
            RawToken::Int => TokenKind::IntLiteral,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::KeywordInt => TokenKind::KeywordInt,
            RawToken::KeywordFloat => TokenKind::KeywordFloat,
            RawToken::KeywordIf => TokenKind::KeywordIf,
            RawToken::KeywordElse => TokenKind::KeywordElse,
            RawToken::KeywordWhile => TokenKind::KeywordWhile,
            RawToken::KeywordFunction => TokenKind::KeywordFunction,
            RawToken::KeywordReturn => TokenKind::KeywordReturn,
            RawToken::KeywordPrint => TokenKind::KeywordPrint,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Mul => TokenKind::Mul,
            RawToken::Div => TokenKind::Div,
            RawToken::Mod => TokenKind::Mod,
            RawToken::Assign => TokenKind::Assign,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::Less => TokenKind::Less,
            RawToken::Greater => TokenKind::Greater,
            RawToken::LessEq => TokenKind::LessEq,
            RawToken::GreaterEq => TokenKind::GreaterEq,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Comma => TokenKind::Comma,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::Identifier => "identifier",
            TokenKind::KeywordInt => "'int'",
            TokenKind::KeywordFloat => "'float'",
            TokenKind::KeywordIf => "'if'",
            TokenKind::KeywordElse => "'else'",
            TokenKind::KeywordWhile => "'while'",
            TokenKind::KeywordFunction => "'function'",
            TokenKind::KeywordReturn => "'return'",
            TokenKind::KeywordPrint => "'print'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Assign => "'='",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEq => "'<='",
            TokenKind::GreaterEq => "'>='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Eof => "end of input",
            TokenKind::Invalid => "invalid character",
        };
        f.write_str(text)
    }
}

/// Line/column of the first character of a token or node.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// Turns source text into [`Token`]s.
///
/// Lexing never fails: characters that start no token come out as
/// [`TokenKind::Invalid`] tokens and the parser decides what to do with them.
pub struct Tokenizer<'a> {
    raw: logos::Lexer<'a, RawToken>,
    cursor: SourceCursor<'a>,
    pending: VecDeque<Token>,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            raw: RawToken::lexer(source),
            cursor: SourceCursor::new(source),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Returns the next token. Once the input is exhausted this keeps
    /// returning the end-of-input token.
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending.pop_front() {
            return token;
        }

        loop {
            let Some(raw) = self.raw.next() else {
                let end = self.cursor.source().len();
                self.cursor.advance_to(end);
                return Token::new(
                    TokenKind::Eof,
                    "",
                    self.cursor.line(),
                    self.cursor.column(),
                );
            };
            let span = self.raw.span();

            match raw {
                Ok(raw) => {
                    self.cursor.advance_to(span.start);
                    let token = Token::new(
                        raw.into(),
                        self.raw.slice(),
                        self.cursor.line(),
                        self.cursor.column(),
                    );
                    self.cursor.advance_to(span.end);
                    return token;
                }
                Err(()) => {
                    // logos may report part of a multi-byte character; the
                    // cursor only ever stops on character boundaries
                    if span.end <= self.cursor.offset() {
                        continue;
                    }
                    self.cursor.advance_to(span.start);
                    while self.cursor.offset() < span.end {
                        let Some(c) = self.cursor.current() else {
                            break;
                        };
                        if is_blank(c) {
                            self.cursor.advance();
                            continue;
                        }
                        self.pending.push_back(Token::new(
                            TokenKind::Invalid,
                            c.to_string(),
                            self.cursor.line(),
                            self.cursor.column(),
                        ));
                        self.cursor.advance();
                    }
                    if let Some(token) = self.pending.pop_front() {
                        return token;
                    }
                }
            }
        }
    }

    /// Tokenizes the remaining input, ending with exactly one end-of-input token.
    pub fn all(mut self) -> Vec<Token> {
        let mut tokens = vec![];
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        debug!(tokens = tokens.len(), "tokenized source");
        tokens
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every token including the end-of-input token, then stops.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::new(source).all()
}
