//! Renders an AST back to C source, for feeding generated programs
//! through the translator.

use std::fmt::Write as _;

use c2py::{BinaryOp, Direction, Expr, Function, IfChain, Program, RangeLoop, Stmt};

pub fn to_c(program: &Program) -> String {
    let mut out = String::new();
    for function in &program.functions {
        function_to_c(&mut out, function);
    }
    out
}

fn function_to_c(out: &mut String, function: &Function) {
    let _ = write!(out, "int {}(", function.name);
    for (i, param) in function.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "int {}", param.name);
        if let Some(default) = &param.default {
            let _ = write!(out, " = {}", expr_to_c(default));
        }
    }
    out.push_str(") ");
    block_to_c(out, &function.body, 0);
    out.push('\n');
}

fn block_to_c(out: &mut String, body: &[Stmt], depth: usize) {
    out.push_str("{\n");
    for stmt in body {
        stmt_to_c(out, stmt, depth + 1);
    }
    out.push_str(&"  ".repeat(depth));
    out.push('}');
}

fn stmt_to_c(out: &mut String, stmt: &Stmt, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    match stmt {
        Stmt::Assign { target, value } => {
            let _ = write!(out, "{target} = {};", expr_to_c(value));
        }
        Stmt::Declare { name } => {
            let _ = write!(out, "int {name};");
        }
        Stmt::CompoundAssign { target, op, value } => {
            let _ = write!(out, "{target} {}= {};", op.symbol(), expr_to_c(value));
        }
        Stmt::If(chain) => if_to_c(out, chain, depth),
        Stmt::For(range) => for_to_c(out, range, depth),
        Stmt::While { condition, body } => {
            let _ = write!(out, "while ({}) ", expr_to_c(condition));
            block_to_c(out, body, depth);
        }
        Stmt::Return(Some(value)) => {
            let _ = write!(out, "return {};", expr_to_c(value));
        }
        Stmt::Return(None) => out.push_str("return;"),
        Stmt::Expr(expr) => {
            let _ = write!(out, "{};", expr_to_c(expr));
        }
    }
    out.push('\n');
}

fn if_to_c(out: &mut String, chain: &IfChain, depth: usize) {
    for (i, branch) in chain.branches.iter().enumerate() {
        if i > 0 {
            out.push_str(" else ");
        }
        let _ = write!(out, "if ({}) ", expr_to_c(&branch.condition));
        block_to_c(out, &branch.body, depth);
    }
    if let Some(body) = &chain.otherwise {
        out.push_str(" else ");
        block_to_c(out, body, depth);
    }
}

fn for_to_c(out: &mut String, range: &RangeLoop, depth: usize) {
    let (cmp, op) = match range.step.direction {
        Direction::Up => ("<", "+"),
        Direction::Down => (">", "-"),
    };
    let v = &range.var;
    let _ = write!(
        out,
        "for (int {v} = {}; {v} {cmp} {}; {v} = {v} {op} {}) ",
        expr_to_c(&range.start),
        expr_to_c(&range.end),
        expr_to_c(&range.step.amount),
    );
    block_to_c(out, &range.body, depth);
}

pub fn expr_to_c(expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => name.clone(),
        Expr::Number(digits) => digits.clone(),
        Expr::Bool(b) => b.to_string(),
        Expr::Unary { op, operand } => format!("{}{}", op.symbol(), expr_to_c(operand)),
        Expr::Binary { op, lhs, rhs } => {
            let symbol = match op {
                BinaryOp::And => "&&",
                BinaryOp::Or => "||",
                other => other.symbol(),
            };
            format!("{} {symbol} {}", expr_to_c(lhs), expr_to_c(rhs))
        }
        Expr::Paren(inner) => format!("({})", expr_to_c(inner)),
        Expr::Call { callee, args } => {
            let args: Vec<_> = args.iter().map(expr_to_c).collect();
            format!("{callee}({})", args.join(", "))
        }
    }
}
