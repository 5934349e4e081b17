use std::fmt;

use crate::ast::{
    ArithOp, BinaryOp, Branch, Expr, Function, IfChain, Param, Program, Stmt, UnaryOp,
};
use crate::options::Options;
use crate::range::{self, ForInit, ForLoopIssue};
use crate::token::{Span, Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A fixed token of a construct is missing.
    ExpectedToken {
        expected: TokenKind,
        found: Option<String>,
    },
    /// An expression was required.
    ExpectedExpression { found: Option<String> },
    /// The token starts no supported construct.
    UnsupportedConstruct { found: String },
    /// A `for` loop with no bounded-range equivalent.
    UnsupportedForLoop(ForLoopIssue),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedToken {
                expected,
                found: None,
            } => {
                write!(f, "expected {expected}, found end of input")
            }
            Self::ExpectedToken {
                expected,
                found: Some(t),
            } => {
                write!(f, "expected {expected}, got '{t}'")
            }
            Self::ExpectedExpression { found: None } => {
                write!(f, "expected expression, found end of input")
            }
            Self::ExpectedExpression { found: Some(t) } => {
                write!(f, "expected expression, got '{t}'")
            }
            Self::UnsupportedConstruct { found } => {
                write!(f, "unsupported construct starting at '{found}'")
            }
            Self::UnsupportedForLoop(issue) => {
                write!(f, "unsupported for loop: {issue}")
            }
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {}, column {}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// Parse a token stream into a `Program` with default options.
///
/// # Errors
///
/// Returns `ParseError` on missing delimiters, malformed expressions,
/// unsupported constructs, or `for` loops with no range equivalent.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    parse_with(tokens, &Options::default())
}

/// Parse a token stream into a `Program`.
///
/// # Errors
///
/// See [`parse`]. With `options.lenient`, unrecognized tokens at the
/// top level or at the start of a statement are skipped instead.
pub fn parse_with(tokens: &[Token], options: &Options) -> Result<Program, ParseError> {
    let program = Parser::new(tokens, options).parse()?;
    tracing::debug!(functions = program.functions.len(), "parsed program");
    Ok(program)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: &'a Options,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token], options: &'a Options) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
        }
    }

    fn parse(mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();

        while let Some(token) = self.peek() {
            if self.is_function_start() {
                functions.push(self.parse_function()?);
            } else if self.options.lenient {
                self.skip_unsupported(token);
            } else {
                return Err(Self::unsupported(token));
            }
        }

        Ok(Program { functions })
    }

    /// `<return type> <name> (`
    fn is_function_start(&self) -> bool {
        self.peek().is_some_and(|t| {
            t.kind == TokenKind::Id && self.options.is_return_type(&t.text)
        }) && self.kind_at(1) == Some(TokenKind::Id)
            && self.kind_at(2) == Some(TokenKind::LParen)
    }

    fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.pos += 1; // return type
        let name = self.expect(TokenKind::Id)?.text.clone();
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        tracing::debug!(name = %name, params = params.len(), statements = body.len(), "parsed function");
        Ok(Function { name, params, body })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }
        // `f(void)`
        if self.peek().is_some_and(|t| t.text == "void") && self.kind_at(1) == Some(TokenKind::RParen)
        {
            self.pos += 1;
            return Ok(params);
        }

        loop {
            self.expect(TokenKind::Id)?; // parameter type
            let name = self.expect(TokenKind::Id)?.text.clone();
            let default = if self.eat(TokenKind::Assign) {
                Some(self.parse_expr()?)
            } else {
                None
            };
            params.push(Param { name, default });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// `{ <statement>* }`
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LCurly)?;
        let mut body = Vec::new();

        loop {
            match self.peek().map(|t| t.kind) {
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::ExpectedToken {
                            expected: TokenKind::RCurly,
                            found: None,
                        },
                        span: self.eof_span(),
                    });
                }
                Some(TokenKind::RCurly) => {
                    self.pos += 1;
                    break;
                }
                Some(_) => {
                    if let Some(stmt) = self.parse_statement()? {
                        body.push(stmt);
                    }
                }
            }
        }

        Ok(body)
    }

    /// Parse one statement. `Ok(None)` for an empty statement or a
    /// skipped token.
    fn parse_statement(&mut self) -> Result<Option<Stmt>, ParseError> {
        let Some(token) = self.peek() else {
            return Ok(None);
        };

        let stmt = match token.kind {
            TokenKind::If => self.parse_if()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::Return => {
                self.pos += 1;
                let value = if self.check(TokenKind::Semi) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(TokenKind::Semi)?;
                Stmt::Return(value)
            }
            TokenKind::Semi => {
                self.pos += 1;
                return Ok(None);
            }
            TokenKind::Id => {
                let stmt = self.parse_simple()?;
                self.expect(TokenKind::Semi)?;
                stmt
            }
            TokenKind::Number
            | TokenKind::True
            | TokenKind::False
            | TokenKind::LParen
            | TokenKind::Op => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Stmt::Expr(expr)
            }
            _ if self.options.lenient => {
                self.skip_unsupported(token);
                return Ok(None);
            }
            _ => return Err(Self::unsupported(token)),
        };

        Ok(Some(stmt))
    }

    /// Statement starting with an identifier, without its terminator.
    /// Also used for the increment clause of a `for` loop.
    fn parse_simple(&mut self) -> Result<Stmt, ParseError> {
        let kinds = (self.kind_at(0), self.kind_at(1), self.kind_at(2));

        match kinds {
            // `int x = <expr>`
            (Some(TokenKind::Id), Some(TokenKind::Id), Some(TokenKind::Assign)) => {
                self.pos += 1;
                self.parse_assignment()
            }
            // `int x;`
            (Some(TokenKind::Id), Some(TokenKind::Id), Some(TokenKind::Semi)) => {
                let name = self.tokens[self.pos + 1].text.clone();
                self.pos += 2;
                Ok(Stmt::Declare { name })
            }
            (Some(TokenKind::Id), Some(TokenKind::Assign), _) => self.parse_assignment(),
            (Some(TokenKind::Id), Some(TokenKind::Op), Some(TokenKind::Assign))
                if self.is_compound() =>
            {
                let target = self.tokens[self.pos].text.clone();
                let op = ArithOp::from_symbol(&self.tokens[self.pos + 1].text)
                    .unwrap_or(ArithOp::Add);
                self.pos += 3;
                let value = self.parse_expr()?;
                Ok(Stmt::CompoundAssign { target, op, value })
            }
            (Some(TokenKind::Id), Some(TokenKind::Op), Some(TokenKind::Op))
                if self.is_increment() =>
            {
                let target = self.tokens[self.pos].text.clone();
                let op = if self.tokens[self.pos + 1].text == "+" {
                    ArithOp::Add
                } else {
                    ArithOp::Sub
                };
                self.pos += 3;
                Ok(Stmt::CompoundAssign {
                    target,
                    op,
                    value: Expr::Number("1".to_string()),
                })
            }
            _ => Ok(Stmt::Expr(self.parse_expr()?)),
        }
    }

    /// `name = <expr>`
    fn parse_assignment(&mut self) -> Result<Stmt, ParseError> {
        let target = self.expect(TokenKind::Id)?.text.clone();
        self.expect(TokenKind::Assign)?;
        let value = self.parse_expr()?;
        Ok(Stmt::Assign { target, value })
    }

    /// `x += v`: the operator and `=` must touch.
    fn is_compound(&self) -> bool {
        match (self.tokens.get(self.pos + 1), self.tokens.get(self.pos + 2)) {
            (Some(op), Some(assign)) => assign.span.offset == op.span.offset + 1,
            _ => false,
        }
    }

    /// `x++` or `x--`: two adjacent identical `+`/`-` ending the
    /// statement. `a - -b` is a subtraction.
    fn is_increment(&self) -> bool {
        let (Some(first), Some(second)) = (self.tokens.get(self.pos + 1), self.tokens.get(self.pos + 2))
        else {
            return false;
        };
        (first.is_op("+") || first.is_op("-"))
            && first.text == second.text
            && second.span.offset == first.span.offset + 1
            && matches!(
                self.kind_at(3),
                None | Some(TokenKind::Semi | TokenKind::RParen)
            )
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.pos += 1; // if
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        let mut branches = vec![Branch { condition, body }];
        let mut otherwise = None;

        while self.eat(TokenKind::Else) {
            if self.eat(TokenKind::If) {
                let condition = self.parse_condition()?;
                let body = self.parse_block()?;
                branches.push(Branch { condition, body });
            } else {
                otherwise = Some(self.parse_block()?);
                break;
            }
        }

        Ok(Stmt::If(IfChain {
            branches,
            otherwise,
        }))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        self.pos += 1; // while
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;
        Ok(Stmt::While { condition, body })
    }

    /// `for ( <init> ; <cond> ; <incr> ) { <block> }`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let span = self.tokens[self.pos].span;
        self.pos += 1; // for
        self.expect(TokenKind::LParen)?;
        let init = self.parse_for_init()?;
        self.expect(TokenKind::Semi)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Semi)?;
        let increment = if self.check(TokenKind::Id) {
            self.parse_simple()?
        } else {
            return Err(self.for_issue(ForLoopIssue::UnsupportedIncrement));
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        range::derive(init, condition, increment, body)
            .map(Stmt::For)
            .map_err(|issue| ParseError {
                kind: ParseErrorKind::UnsupportedForLoop(issue),
                span,
            })
    }

    /// `[type] var = <expr>`
    fn parse_for_init(&mut self) -> Result<ForInit, ParseError> {
        match (self.kind_at(0), self.kind_at(1), self.kind_at(2)) {
            (Some(TokenKind::Id), Some(TokenKind::Id), Some(TokenKind::Assign)) => {
                self.pos += 1;
            }
            (Some(TokenKind::Id), Some(TokenKind::Assign), _) => {}
            _ => return Err(self.for_issue(ForLoopIssue::UnsupportedInit)),
        }
        let var = self.tokens[self.pos].text.clone();
        self.pos += 2;
        let start = self.parse_expr()?;
        Ok(ForInit { var, start })
    }

    /// `( <expr> )`
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }

    // -----------------------------------------------------------
    // Expressions.
    // -----------------------------------------------------------

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    /// Precedence climbing; every binary operator is left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;

        while let Some(op) = self.peek_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.pos += 1;
            let rhs = self.parse_binary(prec + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek() {
            Some(t) if t.is_op("-") => UnaryOp::Neg,
            Some(t) if t.is_op("+") => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        self.pos += 1;
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.peek() else {
            return Err(ParseError {
                kind: ParseErrorKind::ExpectedExpression { found: None },
                span: self.eof_span(),
            });
        };

        let expr = match token.kind {
            TokenKind::Id => {
                self.pos += 1;
                if self.eat(TokenKind::LParen) {
                    let args = self.parse_args()?;
                    Expr::Call {
                        callee: token.text.clone(),
                        args,
                    }
                } else {
                    Expr::Ident(token.text.clone())
                }
            }
            TokenKind::Number => {
                self.pos += 1;
                Expr::Number(token.text.clone())
            }
            TokenKind::True => {
                self.pos += 1;
                Expr::Bool(true)
            }
            TokenKind::False => {
                self.pos += 1;
                Expr::Bool(false)
            }
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Expr::Paren(Box::new(inner))
            }
            _ => {
                return Err(ParseError {
                    kind: ParseErrorKind::ExpectedExpression {
                        found: Some(token.text.clone()),
                    },
                    span: token.span,
                });
            }
        };

        Ok(expr)
    }

    /// Call arguments after the opening parenthesis, through `)`.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if !self.eat(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen)?;
        }
        Ok(args)
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Or => Some(BinaryOp::Or),
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::Neq => Some(BinaryOp::Neq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            TokenKind::Op => ArithOp::from_symbol(&token.text).map(BinaryOp::Arith),
            _ => None,
        }
    }

    // -----------------------------------------------------------
    // Cursor.
    // -----------------------------------------------------------

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.kind_at(0) == Some(kind)
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(ParseError {
                kind: ParseErrorKind::ExpectedToken {
                    expected: kind,
                    found: Some(token.text.clone()),
                },
                span: token.span,
            }),
            None => Err(ParseError {
                kind: ParseErrorKind::ExpectedToken {
                    expected: kind,
                    found: None,
                },
                span: self.eof_span(),
            }),
        }
    }

    fn skip_unsupported(&mut self, token: &Token) {
        tracing::warn!(
            token = %token.text,
            line = token.span.line,
            column = token.span.column,
            "skipping unsupported token"
        );
        self.pos += 1;
    }

    fn unsupported(token: &Token) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnsupportedConstruct {
                found: token.text.clone(),
            },
            span: token.span,
        }
    }

    fn for_issue(&self, issue: ForLoopIssue) -> ParseError {
        ParseError {
            kind: ParseErrorKind::UnsupportedForLoop(issue),
            span: self.peek().map_or_else(|| self.eof_span(), |t| t.span),
        }
    }

    /// Position just past the last token.
    fn eof_span(&self) -> Span {
        self.tokens.last().map_or(
            Span {
                offset: 0,
                line: 1,
                column: 1,
            },
            |last| Span {
                offset: last.span.offset + last.text.len(),
                line: last.span.line,
                column: last.span.column + last.text.len(),
            },
        )
    }
}
