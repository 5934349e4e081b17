//! Formatter-specific tests.

use c2py::{
    ArithOp, BinaryOp, Expr, Function, IfChain, Program, RangeLoop, Stmt, UnaryOp, format,
};

fn program_with(stmt: Stmt) -> Program {
    Program::new().function(Function::new("f").statement(stmt))
}

#[test]
fn format_four_space_indentation() {
    let program = program_with(Stmt::while_loop(
        Expr::ident("a"),
        vec![Stmt::from(IfChain::new(
            Expr::ident("b"),
            vec![Stmt::assign("c", Expr::int(1))],
        ))],
    ));
    let output = format(&program);
    assert!(output.contains("\n    while a:\n"));
    assert!(output.contains("\n        if b:\n"));
    assert!(output.contains("\n            c = 1\n"));
}

#[test]
fn format_boolean_literals_and_logic() {
    let condition = Expr::binary(
        Expr::binary(Expr::ident("c"), BinaryOp::Eq, Expr::Bool(true)),
        BinaryOp::And,
        Expr::binary(Expr::ident("d"), BinaryOp::Eq, Expr::Bool(false)),
    );
    let output = format(&program_with(Stmt::ret(condition)));
    assert!(output.contains("return c == True and d == False"));
}

#[test]
fn format_or() {
    let expr = Expr::binary(Expr::ident("a"), BinaryOp::Or, Expr::ident("b"));
    let output = format(&program_with(Stmt::Expr(expr)));
    assert!(output.contains("    a or b\n"));
}

#[test]
fn format_keeps_explicit_parentheses() {
    let expr = Expr::binary(
        Expr::paren(Expr::binary(
            Expr::ident("a"),
            BinaryOp::Arith(ArithOp::Add),
            Expr::ident("b"),
        )),
        BinaryOp::Arith(ArithOp::Mul),
        Expr::ident("c"),
    );
    let output = format(&program_with(Stmt::assign("x", expr)));
    assert!(output.contains("x = (a + b) * c"));
}

#[test]
fn format_adds_parentheses_for_tree_precedence() {
    // Built without a Paren node: the tree itself says "a + b" first.
    let expr = Expr::binary(
        Expr::binary(
            Expr::ident("a"),
            BinaryOp::Arith(ArithOp::Add),
            Expr::ident("b"),
        ),
        BinaryOp::Arith(ArithOp::Mul),
        Expr::ident("c"),
    );
    let output = format(&program_with(Stmt::assign("x", expr)));
    assert!(output.contains("x = (a + b) * c"));
}

#[test]
fn format_right_nested_subtraction() {
    let expr = Expr::binary(
        Expr::ident("a"),
        BinaryOp::Arith(ArithOp::Sub),
        Expr::binary(
            Expr::ident("b"),
            BinaryOp::Arith(ArithOp::Sub),
            Expr::ident("c"),
        ),
    );
    let output = format(&program_with(Stmt::assign("x", expr)));
    assert!(output.contains("x = a - (b - c)"));
}

#[test]
fn format_nested_comparison_does_not_chain() {
    let expr = Expr::binary(
        Expr::ident("a"),
        BinaryOp::Eq,
        Expr::binary(Expr::ident("b"), BinaryOp::Lt, Expr::ident("c")),
    );
    let output = format(&program_with(Stmt::Expr(expr)));
    assert!(output.contains("a == (b < c)"));
}

#[test]
fn format_unary_minus() {
    let negated = Expr::Unary {
        op: UnaryOp::Neg,
        operand: Box::new(Expr::ident("x")),
    };
    let output = format(&program_with(Stmt::assign("y", negated)));
    assert!(output.contains("y = -x"));
}

#[test]
fn format_call() {
    let call = Expr::call("max", vec![Expr::ident("a"), Expr::int(3)]);
    let output = format(&program_with(Stmt::Expr(call)));
    assert!(output.contains("    max(a, 3)\n"));
}

#[test]
fn format_ascending_range() {
    let output = format(&program_with(
        RangeLoop::new("i", 0, 10, 2)
            .statement(Stmt::compound("s", ArithOp::Add, Expr::ident("i")))
            .into(),
    ));
    assert_eq!(
        output,
        "def f():\n    for i in range(0, 10, 2):\n        s += i\n"
    );
}

#[test]
fn format_empty_function() {
    let output = format(&Program::new().function(Function::new("noop")));
    assert_eq!(output, "def noop():\n    pass\n");
}

#[test]
fn format_empty_else() {
    let chain = IfChain::new(Expr::ident("a"), vec![Stmt::ret(Expr::int(1))]).otherwise(Vec::new());
    let output = format(&program_with(chain.into()));
    assert!(output.ends_with("    else:\n        pass\n"));
}
