//! Conversion of three-clause `for` loops into bounded ranges.
//!
//! The parser hands over each clause already parsed: the initializer as a
//! [`ForInit`], the condition as an [`Expr`], and the increment as a
//! [`Stmt`]. This module checks that the clauses follow the
//! declare-compare-step shape and derives `range(start, end, step)`.

use std::fmt;

use crate::ast::{ArithOp, BinaryOp, Direction, Expr, RangeLoop, Step, Stmt, UnaryOp};

/// Reason a `for` loop has no bounded-range equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForLoopIssue {
    /// Initializer is not `[type] var = start`.
    UnsupportedInit,
    /// Condition is not `var < bound`, `var <= bound`, `var > bound` or
    /// `var >= bound`.
    UnsupportedCondition,
    /// Increment is not a constant step on the loop variable.
    UnsupportedIncrement,
    /// A clause names a variable other than the one initialized.
    VariableMismatch { expected: String, found: String },
    /// Literal step of zero.
    ZeroStep,
    /// Literal step moving away from the bound.
    StepAwayFromBound,
}

impl fmt::Display for ForLoopIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedInit => {
                write!(f, "initializer must assign the loop variable")
            }
            Self::UnsupportedCondition => {
                write!(
                    f,
                    "condition must compare the loop variable with '<', '<=', '>' or '>='"
                )
            }
            Self::UnsupportedIncrement => {
                write!(f, "increment must step the loop variable by a constant")
            }
            Self::VariableMismatch { expected, found } => {
                write!(f, "expected loop variable '{expected}', got '{found}'")
            }
            Self::ZeroStep => write!(f, "step is zero"),
            Self::StepAwayFromBound => {
                write!(f, "step moves away from the loop bound")
            }
        }
    }
}

/// Initializer clause: `[type] var = start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForInit {
    pub var: String,
    pub start: Expr,
}

/// How the condition relates the loop variable to its bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Below,
    AtMost,
    Above,
    AtLeast,
}

impl Relation {
    const fn from_op(op: BinaryOp) -> Option<Self> {
        match op {
            BinaryOp::Lt => Some(Self::Below),
            BinaryOp::Le => Some(Self::AtMost),
            BinaryOp::Gt => Some(Self::Above),
            BinaryOp::Ge => Some(Self::AtLeast),
            _ => None,
        }
    }

    /// Same relation seen from the other operand (`10 > i` is `i < 10`).
    const fn flip(self) -> Self {
        match self {
            Self::Below => Self::Above,
            Self::AtMost => Self::AtLeast,
            Self::Above => Self::Below,
            Self::AtLeast => Self::AtMost,
        }
    }

    const fn direction(self) -> Direction {
        match self {
            Self::Below | Self::AtMost => Direction::Up,
            Self::Above | Self::AtLeast => Direction::Down,
        }
    }
}

/// Build the range loop for `for (init; condition; increment) body`.
///
/// # Errors
///
/// Returns the first [`ForLoopIssue`] found, checking the condition
/// before the increment.
pub fn derive(
    init: ForInit,
    condition: Expr,
    increment: Stmt,
    body: Vec<Stmt>,
) -> Result<RangeLoop, ForLoopIssue> {
    let ForInit { var, start } = init;
    let (relation, bound) = split_condition(&var, condition)?;
    let step = split_increment(&var, increment)?;

    match (step.amount.as_integer(), step.direction == relation.direction()) {
        (Some(0), _) => return Err(ForLoopIssue::ZeroStep),
        (Some(_), false) => return Err(ForLoopIssue::StepAwayFromBound),
        _ => {}
    }

    let end = match relation {
        Relation::Below | Relation::Above => bound,
        Relation::AtMost => offset(bound, 1),
        Relation::AtLeast => offset(bound, -1),
    };

    Ok(RangeLoop {
        var,
        start,
        end,
        step,
        body,
    })
}

fn split_condition(var: &str, condition: Expr) -> Result<(Relation, Expr), ForLoopIssue> {
    let Expr::Binary { op, lhs, rhs } = strip_parens(condition) else {
        return Err(ForLoopIssue::UnsupportedCondition);
    };
    let relation = Relation::from_op(op).ok_or(ForLoopIssue::UnsupportedCondition)?;

    match (*lhs, *rhs) {
        (Expr::Ident(name), bound) if name == var => Ok((relation, bound)),
        (bound, Expr::Ident(name)) if name == var => Ok((relation.flip(), bound)),
        (Expr::Ident(name), _) => Err(ForLoopIssue::VariableMismatch {
            expected: var.to_string(),
            found: name,
        }),
        _ => Err(ForLoopIssue::UnsupportedCondition),
    }
}

fn split_increment(var: &str, increment: Stmt) -> Result<Step, ForLoopIssue> {
    let (target, direction, amount) = match increment {
        Stmt::CompoundAssign {
            target,
            op: op @ (ArithOp::Add | ArithOp::Sub),
            value,
        } => (target, direction_of(op), value),
        Stmt::Assign { target, value } => match strip_parens(value) {
            Expr::Binary {
                op: BinaryOp::Arith(op @ (ArithOp::Add | ArithOp::Sub)),
                lhs,
                rhs,
            } => match (*lhs, *rhs) {
                (Expr::Ident(name), amount) if name == target => {
                    (target, direction_of(op), amount)
                }
                (amount, Expr::Ident(name)) if name == target && op == ArithOp::Add => {
                    (target, Direction::Up, amount)
                }
                _ => return Err(ForLoopIssue::UnsupportedIncrement),
            },
            _ => return Err(ForLoopIssue::UnsupportedIncrement),
        },
        _ => return Err(ForLoopIssue::UnsupportedIncrement),
    };

    if target != var {
        return Err(ForLoopIssue::VariableMismatch {
            expected: var.to_string(),
            found: target,
        });
    }

    Ok(normalize(direction, amount))
}

const fn direction_of(op: ArithOp) -> Direction {
    if matches!(op, ArithOp::Sub) {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Fold a negative literal amount into the direction (`i += -2` steps
/// down by 2).
fn normalize(direction: Direction, amount: Expr) -> Step {
    match amount.as_integer() {
        Some(n) if n < 0 => Step {
            direction: match direction {
                Direction::Up => Direction::Down,
                Direction::Down => Direction::Up,
            },
            amount: Expr::Number(n.unsigned_abs().to_string()),
        },
        _ => Step { direction, amount },
    }
}

fn strip_parens(expr: Expr) -> Expr {
    match expr {
        Expr::Paren(inner) => strip_parens(*inner),
        other => other,
    }
}

/// `bound + delta`, folded when the bound is an integer literal and the
/// sum fits in an `i128`.
fn offset(bound: Expr, delta: i128) -> Expr {
    if let Some(n) = bound.as_integer().and_then(|n| n.checked_add(delta)) {
        return integer(n);
    }
    let op = if delta < 0 { ArithOp::Sub } else { ArithOp::Add };
    Expr::Binary {
        op: BinaryOp::Arith(op),
        lhs: Box::new(bound),
        rhs: Box::new(Expr::Number(delta.abs().to_string())),
    }
}

fn integer(n: i128) -> Expr {
    if n < 0 {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(Expr::Number(n.unsigned_abs().to_string())),
        }
    } else {
        Expr::Number(n.to_string())
    }
}
