use crate::ast::{
    ArithOp, BinaryOp, Branch, Direction, Expr, Function, IfChain, Param, Program, RangeLoop,
    Step, Stmt, UnaryOp,
};

impl Program {
    /// Create an empty program.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            functions: Vec::new(),
        }
    }

    /// Add a function.
    #[must_use]
    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Function {
    /// Create a function with no parameters and an empty body.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, name: &str) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: None,
        });
        self
    }

    /// Add a parameter with a default value.
    #[must_use]
    pub fn param_with_default(mut self, name: &str, default: Expr) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            default: Some(default),
        });
        self
    }

    /// Append a statement to the body.
    #[must_use]
    pub fn statement(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }
}

impl Stmt {
    /// `target = value`
    #[must_use]
    pub fn assign(target: &str, value: Expr) -> Self {
        Self::Assign {
            target: target.to_string(),
            value,
        }
    }

    /// `target op= value`
    #[must_use]
    pub fn compound(target: &str, op: ArithOp, value: Expr) -> Self {
        Self::CompoundAssign {
            target: target.to_string(),
            op,
            value,
        }
    }

    /// `return value`
    #[must_use]
    pub const fn ret(value: Expr) -> Self {
        Self::Return(Some(value))
    }

    /// `while condition: body`
    #[must_use]
    pub const fn while_loop(condition: Expr, body: Vec<Self>) -> Self {
        Self::While { condition, body }
    }
}

impl From<IfChain> for Stmt {
    fn from(chain: IfChain) -> Self {
        Self::If(chain)
    }
}

impl From<RangeLoop> for Stmt {
    fn from(range: RangeLoop) -> Self {
        Self::For(range)
    }
}

impl IfChain {
    /// Start a chain with its `if` branch.
    #[must_use]
    pub fn new(condition: Expr, body: Vec<Stmt>) -> Self {
        Self {
            branches: vec![Branch { condition, body }],
            otherwise: None,
        }
    }

    /// Add an `elif` branch.
    #[must_use]
    pub fn else_if(mut self, condition: Expr, body: Vec<Stmt>) -> Self {
        self.branches.push(Branch { condition, body });
        self
    }

    /// Set the final `else` branch.
    #[must_use]
    pub fn otherwise(mut self, body: Vec<Stmt>) -> Self {
        self.otherwise = Some(body);
        self
    }
}

impl RangeLoop {
    /// Iterate `var` over `[start, end)` by `step`, which may be negative.
    ///
    /// `step` must be non-zero; `range()` rejects a zero step.
    #[must_use]
    pub fn new(var: &str, start: i64, end: i64, step: i64) -> Self {
        debug_assert_ne!(step, 0, "range step must be non-zero");
        let direction = if step < 0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Self {
            var: var.to_string(),
            start: Expr::int(start),
            end: Expr::int(end),
            step: Step {
                direction,
                amount: Expr::Number(step.unsigned_abs().to_string()),
            },
            body: Vec::new(),
        }
    }

    /// Append a statement to the body.
    #[must_use]
    pub fn statement(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }
}

impl Expr {
    #[must_use]
    pub fn ident(name: &str) -> Self {
        Self::Ident(name.to_string())
    }

    /// Integer literal; negative values become a negated literal.
    #[must_use]
    pub fn int(value: i64) -> Self {
        let literal = Self::Number(value.unsigned_abs().to_string());
        if value < 0 {
            Self::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(literal),
            }
        } else {
            literal
        }
    }

    #[must_use]
    pub fn binary(lhs: Self, op: BinaryOp, rhs: Self) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    #[must_use]
    pub fn paren(inner: Self) -> Self {
        Self::Paren(Box::new(inner))
    }

    #[must_use]
    pub fn call(callee: &str, args: Vec<Self>) -> Self {
        Self::Call {
            callee: callee.to_string(),
            args,
        }
    }
}
