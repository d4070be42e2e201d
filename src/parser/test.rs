use super::*;
use crate::ast::printer::{expr_to_string, program_to_string};
use crate::ast::{Block, Expr, Stmt};
use crate::lexer::tokenize;

// Helper function to parse input without file I/O
fn parse_str(input: &str) -> ParseResult<Program> {
    Parser::new(tokenize(input)).parse_program()
}

fn parse_expr(input: &str) -> String {
    let mut parser = Parser::new(tokenize(input));
    let (expr, _) = parser.parse_expression().unwrap();
    assert!(parser.is_at_end(), "trailing tokens after {:?}", input);
    expr_to_string(&expr)
}

fn main_body(input: &str) -> Block {
    let program = parse_str(input).unwrap();
    program.functions[0].body.clone()
}

#[test]
fn test_simple_addition() {
    assert_eq!(parse_expr("2 + 3"), "(+ 2 3)");
}

#[test]
fn test_operator_precedence() {
    assert_eq!(parse_expr("2 + 3 * 4"), "(+ 2 (* 3 4))");
    assert_eq!(parse_expr("(2 + 3) * 4"), "(* (+ 2 3) 4)");
    assert_eq!(parse_expr("-5 + 10"), "(+ (- 5) 10)");
}

#[test]
fn test_complex_expression() {
    assert_eq!(parse_expr("-(5 + 2) * 3 / 4"), "(/ (* (- (+ 5 2)) 3) 4)");
    assert_eq!(parse_expr("a > b == c < d"), "(== (> a b) (< c d))");
    assert_eq!(
        parse_expr("a + b * c == d / e - f"),
        "(== (+ a (* b c)) (- (/ d e) f))"
    );
    assert_eq!(parse_expr("a % b * c"), "(* (% a b) c)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(parse_expr("1 - 2 - 3"), "(- (- 1 2) 3)");
    assert_eq!(parse_expr("8 / 4 / 2"), "(/ (/ 8 4) 2)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(parse_expr("a = b = 3"), "(= a (= b 3))");
}

#[test]
fn test_parse_calls() {
    assert_eq!(parse_expr("foo(1, x + 2, bar())"), "(call foo 1 (+ x 2) (call bar))");
    assert_eq!(parse_expr("-f(2)"), "(- (call f 2))");
    assert_eq!(parse_expr("myVariable"), "myVariable");
    assert_eq!(parse_expr("2.5 * x"), "(* 2.5 x)");
}

#[test]
fn test_invalid_assignment_target() {
    let mut parser = Parser::new(tokenize("a + b = 3"));
    assert!(matches!(
        parser.parse_expression(),
        Err(SyntaxError::InvalidAssignmentTarget { position }) if position == Position::new(1, 7)
    ));
}

#[test]
fn test_invalid_call_target() {
    let mut parser = Parser::new(tokenize("f(1)(2)"));
    assert!(matches!(
        parser.parse_expression(),
        Err(SyntaxError::InvalidCallTarget { .. })
    ));

    let mut parser = Parser::new(tokenize("(1 + 2)(3)"));
    assert!(matches!(
        parser.parse_expression(),
        Err(SyntaxError::InvalidCallTarget { .. })
    ));
}

#[test]
fn test_parse_function_declarations() {
    let program = parse_str(
        "
        function add(a, b) { return a + b; }
        function main() { print(add(1, 2)); }
        ",
    )
    .unwrap();

    assert_eq!(program.functions.len(), 2);
    let add = &program.functions[0];
    assert_eq!(add.name, "add");
    assert_eq!(add.arity(), 2);
    assert_eq!(add.params[0].0, "a");
    assert_eq!(add.params[1], ("b".to_string(), Position::new(2, 25)));
    assert_eq!(add.position, Position::new(2, 9));
    assert_eq!(program.functions[1].arity(), 0);
}

#[test]
fn test_assignment_statement_is_normalized() {
    let body = main_body("function main() { x = 1; x + 1; y = x = 2; }");

    assert!(matches!(
        &body.statements[0].0,
        Stmt::Assign { var, value: (Expr::Int(1), _) } if var == "x"
    ));
    assert!(matches!(&body.statements[1].0, Stmt::Expr((Expr::BinOp { .. }, _))));
    let Stmt::Assign { var, value } = &body.statements[2].0 else {
        panic!("Expected assignment statement");
    };
    assert_eq!(var, "y");
    assert!(matches!(&value.0, Expr::Assign { var, .. } if var == "x"));
}

#[test]
fn test_if_and_while_bodies_are_wrapped() {
    let body = main_body(
        "function main() {
            if (x < 1) print(1); else print(2);
            while (x) x = x - 1;
            if (y) { print(3); }
        }",
    );

    let Stmt::If {
        then_block,
        else_block,
        ..
    } = &body.statements[0].0
    else {
        panic!("Expected if statement");
    };
    assert_eq!(then_block.statements.len(), 1);
    assert!(matches!(then_block.statements[0].0, Stmt::Print(_)));
    assert_eq!(else_block.as_ref().unwrap().statements.len(), 1);

    let Stmt::While { body: loop_body, .. } = &body.statements[1].0 else {
        panic!("Expected while statement");
    };
    assert!(matches!(loop_body.statements[0].0, Stmt::Assign { .. }));

    let Stmt::If {
        then_block,
        else_block,
        ..
    } = &body.statements[2].0
    else {
        panic!("Expected if statement");
    };
    assert!(matches!(then_block.statements[0].0, Stmt::Print(_)));
    assert!(else_block.is_none());
}

#[test]
fn test_return_forms_and_nested_blocks() {
    let body = main_body("function main() { { return; } return 1 + 2; }");
    let Stmt::Block(inner) = &body.statements[0].0 else {
        panic!("Expected nested block");
    };
    assert!(matches!(inner.statements[0].0, Stmt::Return(None)));
    assert!(matches!(body.statements[1].0, Stmt::Return(Some(_))));
}

#[test]
fn test_program_printout() {
    let program = parse_str("function main() { x = 5; if (x > 2) print(x); }").unwrap();
    let expected = "\
(program
  (fun main ()
    (block
      (= x 5)
      (if (> x 2)
        (block
          (print x))))))";
    assert_eq!(program_to_string(&program), expected);
}

#[test]
fn test_empty_program() {
    let program = parse_str("  // nothing here\n").unwrap();
    assert!(program.functions.is_empty());
}

#[test]
fn test_top_level_statement_is_rejected() {
    let err = parse_str("x = 1;").unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::UnexpectedToken { ref expected, .. } if expected == "'function' at top level"
    ));
    assert_eq!(err.position(), Position::new(1, 1));
}

#[test]
fn test_missing_semicolon() {
    let err = parse_str("function main() {\n  x = 1\n}").unwrap_err();
    match err {
        SyntaxError::UnexpectedToken {
            expected,
            found,
            kind,
            position,
        } => {
            assert_eq!(expected, "';' after expression or assignment");
            assert_eq!(found, "}");
            assert_eq!(kind, TokenKind::RBrace);
            assert_eq!(position, Position::new(3, 1));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse_str("function main() { print(1);").unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedEof { .. }));
}

#[test]
fn test_invalid_token_reaches_parser() {
    let err = parse_str("function main() { x = 1 @ 2; }").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::InvalidToken {
            lexeme: "@".to_string(),
            position: Position::new(1, 25),
        }
    );
}

#[test]
fn test_type_keywords_are_not_expressions() {
    let err = parse_str("function main() { int x; }").unwrap_err();
    assert!(matches!(
        err,
        SyntaxError::UnexpectedToken { kind: TokenKind::KeywordInt, .. }
    ));
}

#[test]
fn test_integer_out_of_range() {
    let err = parse_str("function main() { x = 3000000000; }").unwrap_err();
    assert!(matches!(err, SyntaxError::IntegerOutOfRange { ref lexeme, .. } if lexeme == "3000000000"));
}

#[test]
fn test_parser_without_eof_token() {
    let mut tokens = tokenize("function main() { }");
    tokens.pop();
    let program = Parser::new(tokens).parse_program().unwrap();
    assert_eq!(program.functions.len(), 1);
}
