use super::*;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|token| token.kind).collect()
}

#[test]
fn test_basic_tokens() {
    let tokens = tokenize("x = 10 + 20;");
    assert_eq!(tokens.len(), 7);

    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x", 1, 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Assign, "=", 1, 3));
    assert_eq!(tokens[2], Token::new(TokenKind::IntLiteral, "10", 1, 5));
    assert_eq!(tokens[3], Token::new(TokenKind::Plus, "+", 1, 8));
    assert_eq!(tokens[4], Token::new(TokenKind::IntLiteral, "20", 1, 10));
    assert_eq!(tokens[5], Token::new(TokenKind::Semicolon, ";", 1, 12));
    assert_eq!(tokens[6].kind, TokenKind::Eof);
}

#[test]
fn test_number_literals() {
    let tokens = tokenize("42 0 3.14 100.0");
    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].lexeme, "42");
    assert_eq!(tokens[1].lexeme, "0");
    assert_eq!(tokens[2].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[2].lexeme, "3.14");
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].lexeme, "100.0");
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let tokens = tokenize("5.;");
    assert_eq!(tokens[0], Token::new(TokenKind::IntLiteral, "5", 1, 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Invalid, ".", 1, 2));
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
}

#[test]
fn test_identifiers_and_keywords() {
    assert_eq!(
        kinds("if else while function return print int float"),
        vec![
            TokenKind::KeywordIf,
            TokenKind::KeywordElse,
            TokenKind::KeywordWhile,
            TokenKind::KeywordFunction,
            TokenKind::KeywordReturn,
            TokenKind::KeywordPrint,
            TokenKind::KeywordInt,
            TokenKind::KeywordFloat,
            TokenKind::Eof,
        ]
    );

    let tokens = tokenize("myVar _temp var123 iffy printer");
    for token in &tokens[..5] {
        assert_eq!(token.kind, TokenKind::Identifier);
    }
    assert_eq!(tokens[1].lexeme, "_temp");
    assert_eq!(tokens[3].lexeme, "iffy");
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("+ - * / % = == < > <= >= !="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Mul,
            TokenKind::Div,
            TokenKind::Mod,
            TokenKind::Assign,
            TokenKind::Eq,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEq,
            TokenKind::GreaterEq,
            TokenKind::NotEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_two_char_operators_are_greedy() {
    assert_eq!(
        kinds("a<=b==c"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEq,
            TokenKind::Identifier,
            TokenKind::Eq,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("==="),
        vec![TokenKind::Eq, TokenKind::Assign, TokenKind::Eof]
    );
}

#[test]
fn test_delimiters() {
    assert_eq!(
        kinds("( ) { } ; ,"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_and_positions() {
    let input = "// header comment\nx = 1; // trailing\n  y";
    let tokens = tokenize(input);
    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "x", 2, 1));
    assert_eq!(tokens[3], Token::new(TokenKind::Semicolon, ";", 2, 6));
    assert_eq!(tokens[4], Token::new(TokenKind::Identifier, "y", 3, 3));
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_invalid_characters_become_tokens() {
    let tokens = tokenize("x @ y ! #");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1], Token::new(TokenKind::Invalid, "@", 1, 3));
    assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "y", 1, 5));
    assert_eq!(tokens[3], Token::new(TokenKind::Invalid, "!", 1, 7));
    assert_eq!(tokens[4], Token::new(TokenKind::Invalid, "#", 1, 9));
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_unicode_identifiers() {
    let tokens = tokenize("é = 1; größe2 = π;");
    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "é", 1, 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Assign, "=", 1, 3));
    assert_eq!(tokens[4], Token::new(TokenKind::Identifier, "größe2", 1, 8));
    assert_eq!(tokens[6], Token::new(TokenKind::Identifier, "π", 1, 17));
}

#[test]
fn test_no_break_space_is_not_a_separator() {
    let tokens = tokenize("ab\u{a0}c\u{3000}d");
    assert_eq!(tokens[0], Token::new(TokenKind::Identifier, "ab", 1, 1));
    assert_eq!(tokens[1], Token::new(TokenKind::Invalid, "\u{a0}", 1, 3));
    assert_eq!(tokens[2], Token::new(TokenKind::Identifier, "c", 1, 4));
    assert_eq!(tokens[3], Token::new(TokenKind::Identifier, "d", 1, 6));
    assert_eq!(tokens[4].kind, TokenKind::Eof);
}

#[test]
fn test_eof_repeats() {
    let mut tokenizer = Tokenizer::new("x");
    assert_eq!(tokenizer.next_token().kind, TokenKind::Identifier);
    assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
    assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
}

#[test]
fn test_empty_input() {
    let tokens = tokenize("");
    assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", 1, 1)]);

    let tokens = tokenize("   // only a comment");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
}

#[test]
fn test_iterator_stops_after_eof() {
    let tokens: Vec<Token> = Tokenizer::new("a b").collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_tokenizing_is_deterministic() {
    let input = "function main() { x = 1.5 * (y - 2); print(x); }";
    assert_eq!(tokenize(input), tokenize(input));
}
