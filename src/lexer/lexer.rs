use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, END_LEXEME, OPERATORS, START_LEXEME};

/// Builds the token for a match, or `None` when the match is only consumed.
pub type RegexHandler = fn(&Lexer, &str) -> Option<Token>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

impl RegexPattern {
    fn new(pattern: &str, handler: RegexHandler) -> Self {
        // Every pattern only ever matches at the scan position.
        let anchored = format!("^(?:{})", pattern);
        RegexPattern {
            regex: Regex::new(&anchored).unwrap(),
            handler,
        }
    }
}

lazy_static! {
    /// Lexical patterns in priority order. The first pattern matching at the
    /// scan position wins, even when a later one would match more text.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern::new(r"\\n\\t|\\n|\\t", stmt_handler),
        RegexPattern::new(r"\s+|;", skip_handler),
        RegexPattern::new(r"[a-zA-Z_][\w_]*", symbol_handler),
        RegexPattern::new(&operator_pattern(), operator_handler),
        // `(:?` admits a stray leading colon; kept for compatibility.
        RegexPattern::new(r"(:?\d*\.)?\d+", number_handler),
        RegexPattern::new(r#":?"+[\w\s]+""#, string_handler),
    ];
}

fn operator_pattern() -> String {
    OPERATORS
        .iter()
        .map(|op| regex::escape(op))
        .collect::<Vec<String>>()
        .join("|")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerState {
    Start,
    Scanning,
    Finished,
}

/// Lazy tokenizer over a single source string.
///
/// Yields the synthetic start token, every classified token in source
/// order, then the end token. A lexing failure is yielded once and ends
/// the sequence.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
    state: LexerState,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
            state: LexerState::Start,
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn token(&self, kind: TokenKind, matched: &str) -> Token {
        MK_TOKEN!(
            kind,
            String::from(matched),
            self.pos,
            self.pos + matched.len(),
            self.file
        )
    }

    /// Consumes one match at the scan position.
    fn scan(&mut self) -> Result<Option<Token>, Error> {
        let remaining = &self.source[self.pos..];

        for pattern in PATTERNS.iter() {
            if let Some(found) = pattern.regex.find(remaining) {
                let len = found.end();
                let token = (pattern.handler)(self, found.as_str());
                self.advance_n(len);
                return Ok(token);
            }
        }

        // `remaining` is non-empty here, the caller checks for eof first.
        let character = remaining.chars().next().unwrap_or_default();
        Err(Error::new(
            ErrorImpl::UnexpectedCharacter { character },
            Position(self.pos as isize, Rc::clone(&self.file)),
        ))
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            LexerState::Start => {
                self.state = LexerState::Scanning;
                Some(Ok(MK_TOKEN!(
                    TokenKind::Start,
                    String::from(START_LEXEME),
                    -1,
                    -1,
                    self.file
                )))
            }
            LexerState::Scanning => loop {
                if self.at_eof() {
                    self.state = LexerState::Finished;
                    let len = self.source.len();
                    return Some(Ok(MK_TOKEN!(
                        TokenKind::End,
                        String::from(END_LEXEME),
                        len,
                        len,
                        self.file
                    )));
                }

                match self.scan() {
                    Ok(Some(token)) => {
                        trace!(kind = %token.kind, value = %token.value, position = token.position(), "token");
                        return Some(Ok(token));
                    }
                    Ok(None) => continue,
                    Err(error) => {
                        self.state = LexerState::Finished;
                        return Some(Err(error));
                    }
                }
            },
            LexerState::Finished => None,
        }
    }
}

impl std::iter::FusedIterator for Lexer {}

fn stmt_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(lexer.token(TokenKind::Stmt, matched))
}

fn skip_handler(_lexer: &Lexer, _matched: &str) -> Option<Token> {
    None
}

fn symbol_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(lexer.token(TokenKind::Name, matched))
}

fn operator_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(lexer.token(TokenKind::Operator, matched))
}

fn number_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(lexer.token(TokenKind::Number, matched))
}

fn string_handler(lexer: &Lexer, matched: &str) -> Option<Token> {
    Some(lexer.token(TokenKind::String, matched))
}

/// Eagerly collects the token stream of `source`, start and end tokens included.
pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file).collect()
}
