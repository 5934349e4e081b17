//! Builder API tests.

use c2py::{
    ArithOp, BinaryOp, Direction, Expr, Function, IfChain, Program, RangeLoop, Stmt, format,
    parse, tokenize,
};

#[test]
fn builder_matches_parsed_program() {
    let source = "int add(int a, int b = 2) {\n    int s = a + b;\n    return s;\n}\n";
    let tokens = tokenize(source).expect("tokenize");
    let parsed = parse(&tokens).expect("parse");

    let built = Program::new().function(
        Function::new("add")
            .param("a")
            .param_with_default("b", Expr::int(2))
            .statement(Stmt::assign(
                "s",
                Expr::binary(
                    Expr::ident("a"),
                    BinaryOp::Arith(ArithOp::Add),
                    Expr::ident("b"),
                ),
            ))
            .statement(Stmt::ret(Expr::ident("s"))),
    );

    assert_eq!(parsed, built);
}

#[test]
fn builder_range_matches_parsed_loop() {
    let tokens =
        tokenize("void f() { for (int i = 20; i > 10; i = i - 1) { } }").expect("tokenize");
    let parsed = parse(&tokens).expect("parse");
    let built = Program::new()
        .function(Function::new("f").statement(RangeLoop::new("i", 20, 10, -1).into()));
    assert_eq!(parsed, built);
}

#[test]
fn builder_range_direction() {
    assert_eq!(RangeLoop::new("i", 0, 5, 1).step.direction, Direction::Up);
    assert_eq!(RangeLoop::new("i", 5, 0, -2).step.direction, Direction::Down);
    assert_eq!(RangeLoop::new("i", 5, 0, -2).step.to_string(), "-2");
}

#[test]
fn builder_negative_bounds() {
    let output = format(
        &Program::new().function(Function::new("f").statement(RangeLoop::new("i", -3, -10, -1).into())),
    );
    assert!(output.contains("for i in range(-3, -10, -1):"));
}

#[test]
fn builder_if_chain_order() {
    let chain = IfChain::new(Expr::ident("a"), vec![Stmt::ret(Expr::int(1))])
        .else_if(Expr::ident("b"), vec![Stmt::ret(Expr::int(2))])
        .else_if(Expr::ident("c"), vec![Stmt::ret(Expr::int(3))])
        .otherwise(vec![Stmt::ret(Expr::int(4))]);
    assert_eq!(chain.branches.len(), 3);

    let output = format(&Program::new().function(Function::new("pick").statement(chain.into())));
    let headers: Vec<_> = output
        .lines()
        .filter(|l| l.trim_end().ends_with(':'))
        .map(str::trim)
        .collect();
    assert_eq!(headers, vec!["def pick():", "if a:", "elif b:", "elif c:", "else:"]);
}
