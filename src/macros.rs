//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance spanning `$start..$end`

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's lexeme
/// * `$start` - Byte offset of the first character
/// * `$end` - Byte offset one past the last character
/// * `$file` - `Rc<String>` naming the source
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 0, 2, file);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr, $file:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: Span {
                start: Position($start as isize, Rc::clone(&$file)),
                end: Position($end as isize, Rc::clone(&$file)),
            },
        }
    };
}
