//! Parser context and entry points.
//!
//! The parser pulls tokens from a [`Lexer`] one at a time and resolves each
//! against a read-only [`Grammar`]. All cursor state lives in the
//! [`Parser`] value handed to every rule handler, so independent parses
//! never share anything but the grammar.

use tracing::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    expr::parse_expr,
    lookups::{Grammar, GrammarRule, SymbolId, DEFAULT_BP, DEFAULT_GRAMMAR},
};

/// Deepest chain of nested sub-expressions a parse may open.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Cursor over a lazily tokenized source.
pub struct Parser<'g> {
    /// Source of further tokens
    lexer: Lexer,
    /// Token under the cursor, not yet consumed
    current: Token,
    /// Grammar rule of the current token, if it has one
    current_rule: Option<&'g GrammarRule>,
    grammar: &'g Grammar,
    /// Sub-expressions currently open
    depth: usize,
    max_depth: usize,
}

impl<'g> Parser<'g> {
    /// Creates a parser positioned on the first token after the start token.
    pub fn new(mut lexer: Lexer, grammar: &'g Grammar) -> Result<Self, Error> {
        let first = match lexer.next() {
            Some(token) => token?,
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: String::new(),
                    },
                    Position(0, lexer.file()),
                ))
            }
        };

        let mut parser = Parser {
            lexer,
            current: first,
            current_rule: None,
            grammar,
            depth: 0,
            max_depth: MAX_NESTING_DEPTH,
        };

        if parser.current.kind == TokenKind::Start {
            parser.advance()?;
        } else {
            parser.current_rule = parser.resolve(&parser.current)?;
        }

        Ok(parser)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn current_rule(&self) -> Option<&'g GrammarRule> {
        self.current_rule
    }

    /// Left binding power of the current token; tokens without a rule bind
    /// nothing.
    pub fn current_binding_power(&self) -> u32 {
        self.current_rule
            .map(|rule| rule.left_binding_power)
            .unwrap_or(DEFAULT_BP)
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Replaces the nesting limit of this parse.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Opens one more level of sub-expression, failing once the limit is hit.
    pub fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.max_depth,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// Fails if the lexer cannot produce the next token, or if that token
    /// is an operator the grammar does not define.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = match self.lexer.next() {
            Some(token) => token?,
            // Past the end the cursor stays on the end token.
            None => self.current.clone(),
        };

        let rule = self.resolve(&next)?;
        self.current_rule = rule;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Returns the current position in the source.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    fn resolve(&self, token: &Token) -> Result<Option<&'g GrammarRule>, Error> {
        let grammar: &'g Grammar = self.grammar;
        let id = match token.kind {
            TokenKind::Number | TokenKind::String => SymbolId::Const,
            TokenKind::Name => SymbolId::Name,
            TokenKind::End => SymbolId::End,
            TokenKind::Operator => {
                let id = SymbolId::Operator(token.value.clone());
                return match grammar.get(&id) {
                    Some(rule) => Ok(Some(rule)),
                    None => Err(Error::new(
                        ErrorImpl::UnknownOperator {
                            operator: token.value.clone(),
                        },
                        token.span.start.clone(),
                    )),
                };
            }
            TokenKind::Start | TokenKind::Stmt => return Ok(None),
        };

        Ok(grammar.get(&id))
    }
}

/// Parses `source` as a single expression with the default grammar.
pub fn parse(source: String, file: Option<String>) -> Result<Node, Error> {
    parse_with_grammar(source, file, &DEFAULT_GRAMMAR)
}

/// Parses `source` as a single expression with a caller-supplied grammar.
///
/// Fails with `TrailingInput` when anything but the end token follows the
/// root expression.
pub fn parse_with_grammar(
    source: String,
    file: Option<String>,
    grammar: &Grammar,
) -> Result<Node, Error> {
    debug!(len = source.len(), "parsing expression");

    let mut parser = Parser::new(Lexer::new(source, file), grammar)?;
    let root = parse_expr(&mut parser, DEFAULT_BP)?;

    if parser.current_token_kind() != TokenKind::End {
        return Err(Error::new(
            ErrorImpl::TrailingInput {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    debug!(%root, "parsed expression");
    Ok(root)
}
