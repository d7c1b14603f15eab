//! Lexical analysis for the expression front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a lazy stream of tokens for parsing. It handles:
//!
//! - Tokenization using an ordered list of regex patterns
//! - Recognition of names, operators, numbers and strings
//! - Synthetic start and end-of-input tokens
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
