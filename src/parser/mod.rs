//! Parser module for building the expression tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`Node`](crate::ast::ast::Node) tree. It uses a Pratt parser with
//! operator precedence and handles:
//!
//! - Literal, name and parenthesised atoms
//! - Prefix `+` and `-`
//! - Binary operators, left- or right-associative
//!
//! Rules live in a [`Grammar`](lookups::Grammar) registry keyed by symbol.
//! Each rule carries a left binding power plus optional NUD (null
//! denotation) and LED (left denotation) handlers.

pub mod expr;
pub mod lookups;
pub mod parser;
