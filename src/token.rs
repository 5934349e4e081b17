use std::fmt;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Byte offset into the source text.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `true`
    True,
    /// `false`
    False,
    /// `==`
    Eq,
    /// `=`
    Assign,
    /// `!=`
    Neq,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// Decimal integer literal.
    Number,
    If,
    Else,
    For,
    While,
    Return,
    /// Arithmetic operator: one of `+ - * /`.
    Op,
    /// Identifier. Type names such as `int` are identifiers too.
    Id,
    /// `;`
    Semi,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LCurly,
    /// `}`
    RCurly,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Keyword kind for a complete word, if it is reserved.
    #[must_use]
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "for" => Some(Self::For),
            "while" => Some(Self::While),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::And => "'&&'",
            Self::Or => "'||'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Eq => "'=='",
            Self::Assign => "'='",
            Self::Neq => "'!='",
            Self::Le => "'<='",
            Self::Ge => "'>='",
            Self::Lt => "'<'",
            Self::Gt => "'>'",
            Self::Number => "number",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::For => "'for'",
            Self::While => "'while'",
            Self::Return => "'return'",
            Self::Op => "operator",
            Self::Id => "identifier",
            Self::Semi => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LCurly => "'{'",
            Self::RCurly => "'}'",
            Self::Comma => "','",
        };
        f.write_str(s)
    }
}

/// A single token with its kind, text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// True if this is an `Op` token spelled `op`.
    #[must_use]
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }
}
