//! Error types and error handling for the expression front end.
//!
//! This module defines the single error type shared by the lexer and the
//! parser. It includes:
//!
//! - An error structure carrying the source position of the failure
//! - One variant per lexing or parsing failure
//! - Error names and suggestions used by the pointer diagnostic

pub mod errors;
