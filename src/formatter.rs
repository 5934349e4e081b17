//! Emitter that renders the AST as indentation-structured Python text.
//!
//! Four spaces per nesting level. Depth is passed down by value, so every
//! body is rendered exactly one level below its header.

use std::fmt::Write as _;

use crate::ast::{Function, IfChain, Program, RangeLoop, Stmt};

const INDENT: &str = "    ";

/// Format a `Program` as target source text.
///
/// Functions follow each other with no blank lines in between. The
/// result ends with a newline unless there are no functions.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();

    for function in &program.functions {
        format_function(&mut out, function);
    }

    tracing::debug!(bytes = out.len(), "formatted program");
    out
}

fn format_function(out: &mut String, function: &Function) {
    out.push_str("def ");
    out.push_str(&function.name);
    out.push('(');
    for (i, param) in function.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&param.name);
        if let Some(default) = &param.default {
            let _ = write!(out, "={default}");
        }
    }
    out.push_str("):\n");
    format_body(out, &function.body, 1);
}

/// Statements of a block; an empty block becomes `pass`.
fn format_body(out: &mut String, body: &[Stmt], depth: usize) {
    if body.is_empty() {
        line(out, depth, "pass");
        return;
    }
    for stmt in body {
        format_stmt(out, stmt, depth);
    }
}

fn format_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Assign { target, value } => line(out, depth, &format!("{target} = {value}")),
        Stmt::Declare { name } => line(out, depth, &format!("{name} = None")),
        Stmt::CompoundAssign { target, op, value } => {
            line(out, depth, &format!("{target} {}= {value}", op.symbol()));
        }
        Stmt::If(chain) => format_if(out, chain, depth),
        Stmt::For(range) => format_for(out, range, depth),
        Stmt::While { condition, body } => {
            line(out, depth, &format!("while {condition}:"));
            format_body(out, body, depth + 1);
        }
        Stmt::Return(Some(value)) => line(out, depth, &format!("return {value}")),
        Stmt::Return(None) => line(out, depth, "return"),
        Stmt::Expr(expr) => line(out, depth, &expr.to_string()),
    }
}

fn format_if(out: &mut String, chain: &IfChain, depth: usize) {
    for (i, branch) in chain.branches.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elif" };
        line(out, depth, &format!("{keyword} {}:", branch.condition));
        format_body(out, &branch.body, depth + 1);
    }
    if let Some(body) = &chain.otherwise {
        line(out, depth, "else:");
        format_body(out, body, depth + 1);
    }
}

fn format_for(out: &mut String, range: &RangeLoop, depth: usize) {
    line(
        out,
        depth,
        &format!(
            "for {} in range({}, {}, {}):",
            range.var, range.start, range.end, range.step
        ),
    );
    format_body(out, &range.body, depth + 1);
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ArithOp, BinaryOp, Branch, Direction, Expr, Param, Step};

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    fn num(n: &str) -> Expr {
        Expr::Number(n.to_string())
    }

    fn assign(target: &str, value: Expr) -> Stmt {
        Stmt::Assign {
            target: target.to_string(),
            value,
        }
    }

    fn function(name: &str, body: Vec<Stmt>) -> Function {
        Function {
            name: name.to_string(),
            params: Vec::new(),
            body,
        }
    }

    #[test]
    fn simple_function() {
        let program = Program {
            functions: vec![function("main", vec![Stmt::Return(Some(num("0")))])],
        };
        assert_eq!(format(&program), "def main():\n    return 0\n");
    }

    #[test]
    fn params_with_defaults() {
        let program = Program {
            functions: vec![Function {
                name: "main3".to_string(),
                params: vec![
                    Param {
                        name: "a".to_string(),
                        default: Some(num("1")),
                    },
                    Param {
                        name: "b".to_string(),
                        default: None,
                    },
                ],
                body: vec![Stmt::Return(None)],
            }],
        };
        assert_eq!(format(&program), "def main3(a=1, b):\n    return\n");
    }

    #[test]
    fn empty_bodies_get_pass() {
        let program = Program {
            functions: vec![function(
                "f",
                vec![Stmt::While {
                    condition: Expr::Bool(true),
                    body: Vec::new(),
                }],
            )],
        };
        assert_eq!(format(&program), "def f():\n    while True:\n        pass\n");
    }

    #[test]
    fn if_chain_at_depth() {
        let chain = IfChain {
            branches: vec![
                Branch {
                    condition: Expr::Binary {
                        op: BinaryOp::Lt,
                        lhs: Box::new(ident("a")),
                        rhs: Box::new(num("2")),
                    },
                    body: vec![assign("a", num("200"))],
                },
                Branch {
                    condition: ident("b"),
                    body: vec![assign("a", num("1"))],
                },
            ],
            otherwise: Some(vec![assign("a", num("96"))]),
        };
        let program = Program {
            functions: vec![function("f", vec![Stmt::If(chain)])],
        };
        let expected = "\
def f():
    if a < 2:
        a = 200
    elif b:
        a = 1
    else:
        a = 96
";
        assert_eq!(format(&program), expected);
    }

    #[test]
    fn range_loop() {
        let range = RangeLoop {
            var: "i".to_string(),
            start: num("20"),
            end: num("10"),
            step: Step {
                direction: Direction::Down,
                amount: num("1"),
            },
            body: vec![Stmt::CompoundAssign {
                target: "a".to_string(),
                op: ArithOp::Add,
                value: ident("i"),
            }],
        };
        let program = Program {
            functions: vec![function("f", vec![Stmt::For(range)])],
        };
        assert_eq!(
            format(&program),
            "def f():\n    for i in range(20, 10, -1):\n        a += i\n"
        );
    }

    #[test]
    fn declaration_binds_none() {
        let program = Program {
            functions: vec![function(
                "f",
                vec![Stmt::Declare {
                    name: "x".to_string(),
                }],
            )],
        };
        assert_eq!(format(&program), "def f():\n    x = None\n");
    }

    #[test]
    fn functions_are_not_separated_by_blank_lines() {
        let program = Program {
            functions: vec![
                function("a", vec![Stmt::Return(None)]),
                function("b", vec![Stmt::Return(None)]),
            ],
        };
        assert_eq!(
            format(&program),
            "def a():\n    return\ndef b():\n    return\n"
        );
    }

    #[test]
    fn empty_program() {
        let program = Program {
            functions: Vec::new(),
        };
        assert_eq!(format(&program), "");
    }
}
