//! Translator from a small C-like language to Python syntax.
//!
//! Brace-delimited functions, `if`/`else if`/`else` chains, `while`
//! loops, three-clause `for` loops and typed declarations become
//! indentation-structured Python: `def`, `elif`, `range(start, end,
//! step)` and untyped bindings.
//!
//! # Quick start
//!
//! ```
//! let source = "int main() {\n\
//!     int a = 0;\n\
//!     for (int i = 20; i > 10; i = i - 1) {\n\
//!         a = a + i;\n\
//!     }\n\
//!     return a;\n\
//! }\n";
//!
//! let python = c2py::translate(source).unwrap();
//! assert_eq!(
//!     python,
//!     "def main():\n    a = 0\n    for i in range(20, 10, -1):\n        a = a + i\n    return a\n"
//! );
//! ```
//!
//! ## Stage by stage
//!
//! ```
//! use c2py::{tokenize, parse, format};
//!
//! let tokens = tokenize("void f(int a = 1) { return; }").unwrap();
//! let program = parse(&tokens).unwrap();
//! assert_eq!(format(&program), "def f(a=1):\n    return\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod builder;
pub mod formatter;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod range;
pub mod token;

pub use ast::{
    ArithOp, BinaryOp, Branch, Direction, Expr, Function, IfChain, Param, Program, RangeLoop,
    Step, Stmt, UnaryOp,
};
pub use formatter::format;
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use options::Options;
pub use parser::{ParseError, ParseErrorKind, parse, parse_with};
pub use range::ForLoopIssue;
pub use token::{Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Translate C source text to Python with default options.
pub fn translate(source: &str) -> Result<String, Error> {
    translate_with(source, &Options::default())
}

/// Translate C source text to Python.
///
/// Nothing is produced on error: output exists only when every stage
/// succeeds.
pub fn translate_with(source: &str, options: &Options) -> Result<String, Error> {
    let tokens = tokenize(source)?;
    let program = parse_with(&tokens, options)?;
    Ok(format(&program))
}
