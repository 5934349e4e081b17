use std::fmt;

/// A translation unit: the functions in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// Function definition. The C return type is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// Parameter with an optional default value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `name = value`, from an assignment or an initialized declaration.
    Assign { target: String, value: Expr },
    /// Declaration without initializer (`int x;`).
    Declare { name: String },
    /// `name op= value`; `x++` and `x--` land here with a value of `1`.
    CompoundAssign {
        target: String,
        op: ArithOp,
        value: Expr,
    },
    If(IfChain),
    For(RangeLoop),
    While { condition: Expr, body: Vec<Self> },
    Return(Option<Expr>),
    /// Bare expression statement, such as a call.
    Expr(Expr),
}

/// `if` / `else if` / `else` chain. `branches` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfChain {
    pub branches: Vec<Branch>,
    pub otherwise: Option<Vec<Stmt>>,
}

/// A conditioned branch of an `if` chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// Bounded iteration of `var` over `[start, end)` by `step`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeLoop {
    pub var: String,
    pub start: Expr,
    pub end: Expr,
    pub step: Step,
    pub body: Vec<Stmt>,
}

/// Signed loop step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub direction: Direction,
    /// Magnitude as written in the source, always unsigned.
    pub amount: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Ident(String),
    /// Integer literal, digits only.
    Number(String),
    Bool(bool),
    Unary { op: UnaryOp, operand: Box<Self> },
    Binary {
        op: BinaryOp,
        lhs: Box<Self>,
        rhs: Box<Self>,
    },
    /// Parentheses written in the source.
    Paren(Box<Self>),
    Call { callee: String, args: Vec<Self> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
}

/// Arithmetic operators, shared by binary expressions and compound
/// assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Arith(ArithOp),
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl ArithOp {
    /// Parse a single-character operator spelling.
    #[must_use]
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl BinaryOp {
    /// Binding power in the source language. Higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::Neq => 3,
            Self::Lt | Self::Le | Self::Gt | Self::Ge => 4,
            Self::Arith(ArithOp::Add | ArithOp::Sub) => 5,
            Self::Arith(ArithOp::Mul | ArithOp::Div) => 6,
        }
    }

    /// True for the operators that chain in the target language.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Neq | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }

    /// Target-language spelling.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Arith(op) => op.symbol(),
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
        }
    }
}

impl Expr {
    /// Integer value of a literal, looking through parentheses and a
    /// leading sign.
    #[must_use]
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Number(digits) => digits.parse().ok(),
            Self::Paren(inner) => inner.as_integer(),
            Self::Unary {
                op: UnaryOp::Neg,
                operand,
            } => operand.as_integer().and_then(i128::checked_neg),
            Self::Unary {
                op: UnaryOp::Plus,
                operand,
            } => operand.as_integer(),
            _ => None,
        }
    }

    /// Precedence of this node when it appears as an operand.
    pub(crate) const fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Unary { .. } => 7,
            _ => 8,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Number(digits) => f.write_str(digits),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Unary { op, operand } => {
                f.write_str(op.symbol())?;
                write_operand(f, operand, 7)
            }
            Self::Binary { op, lhs, rhs } => {
                let prec = op.precedence();
                if op.is_comparison() && is_comparison(lhs) {
                    write!(f, "({lhs})")?;
                } else {
                    write_operand(f, lhs, prec)?;
                }
                write!(f, " {} ", op.symbol())?;
                // Left-associative: an equal-precedence right operand
                // needs parentheses.
                if op.is_comparison() && is_comparison(rhs) {
                    write!(f, "({rhs})")
                } else {
                    write_operand(f, rhs, prec + 1)
                }
            }
            Self::Paren(inner) => write!(f, "({inner})"),
            Self::Call { callee, args } => {
                write!(f, "{callee}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, min_prec: u8) -> fmt::Result {
    if expr.precedence() < min_prec {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

const fn is_comparison(expr: &Expr) -> bool {
    matches!(expr, Expr::Binary { op, .. } if op.is_comparison())
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.direction, &self.amount) {
            (Direction::Up, amount) => write!(f, "{amount}"),
            (Direction::Down, Expr::Number(digits)) => write!(f, "-{digits}"),
            (Direction::Down, amount) => write!(
                f,
                "{}",
                Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(amount.clone()),
                }
            ),
        }
    }
}
