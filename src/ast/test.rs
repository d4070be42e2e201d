use super::printer::*;
use super::*;

fn p() -> Position {
    Position::new(1, 1)
}

fn int(i: i32) -> (Expr, Position) {
    (Expr::Int(i), p())
}

fn var(name: &str) -> (Expr, Position) {
    (Expr::Variable(name.to_string()), p())
}

fn bin(operator: BinOp, l: (Expr, Position), r: (Expr, Position)) -> (Expr, Position) {
    (
        Expr::BinOp {
            operator,
            l_value: Box::new(l),
            r_value: Box::new(r),
        },
        p(),
    )
}

#[test]
fn test_print_nested_expression() {
    let (expr, _) = bin(BinOp::Add, int(2), bin(BinOp::Mul, int(3), int(4)));
    assert_eq!(expr_to_string(&expr), "(+ 2 (* 3 4))");
}

#[test]
fn test_print_unary_call_and_float() {
    let expr = Expr::Call {
        function: "f".to_string(),
        args: vec![
            (
                Expr::UnOp {
                    unop: UnOp::Minus,
                    expression: Box::new(var("x")),
                },
                p(),
            ),
            (Expr::Float(100.0), p()),
        ],
    };
    assert_eq!(expr_to_string(&expr), "(call f (- x) 100.0)");
}

#[test]
fn test_print_program() {
    let program = Program {
        functions: vec![Function {
            name: "main".to_string(),
            params: vec![],
            body: Block::new(vec![
                (
                    Stmt::Assign {
                        var: "x".to_string(),
                        value: int(1),
                    },
                    p(),
                ),
                (
                    Stmt::If {
                        condition: bin(BinOp::Less, var("x"), int(2)),
                        then_block: Block::new(vec![(Stmt::Print(var("x")), p())]),
                        else_block: None,
                    },
                    p(),
                ),
            ]),
            position: p(),
        }],
    };

    let expected = "\
(program
  (fun main ()
    (block
      (= x 1)
      (if (< x 2)
        (block
          (print x))))))";
    assert_eq!(program_to_string(&program), expected);
}

#[test]
fn test_block_wrap() {
    let stmt = (Stmt::Print(int(1)), p());
    let block = Block::wrap(stmt.clone());
    assert_eq!(block.statements, vec![stmt]);

    let inner = Block::new(vec![(Stmt::Return(None), p())]);
    assert_eq!(Block::wrap((Stmt::Block(inner.clone()), p())), inner);
}

#[test]
fn test_comparison_classification() {
    assert!(BinOp::LessEq.is_comparison());
    assert!(BinOp::NotEq.is_comparison());
    assert!(!BinOp::Mod.is_comparison());
    assert!(!BinOp::Add.is_comparison());
}
