use std::fmt::Display;

use crate::Span;

/// Lexeme carried by the synthetic start token.
pub const START_LEXEME: &str = "Module";

/// Lexeme carried by the synthetic end-of-input token.
pub const END_LEXEME: &str = "(end)";

/// Every operator symbol the lexer classifies, longest forms first.
///
/// Only a subset of these has a grammar rule; the rest are reported as
/// unknown operators by the parser.
pub const OPERATORS: [&str; 31] = [
    "<=", ">=", "<<", ">>", "!=", "==", "<>", "::", "<-", "->", "**", ":", "=", "+", "-", "*",
    "%", "/", "^", "<", ">", "(", ")", "&", "!", "}", "{", "[", "]", "|", ",",
];

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Start,
    /// Literal `\n` / `\t` escape text separating statements.
    Stmt,
    Name,
    Operator,
    Number,
    String,
    End,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.kind, self.value)
    }
}

impl Token {
    /// Byte offset of the first character of the lexeme.
    pub fn position(&self) -> isize {
        self.span.start.0
    }
}
