#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into the source plus the name of the source it belongs to.
///
/// The offset is signed because the synthetic start token sits before the
/// first byte, at `-1`. Source strings never exceed `isize::MAX` bytes, so
/// every byte offset fits.
#[derive(Debug, Clone)]
pub struct Position(pub isize, pub Rc<String>);

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line holding `position`.
///
/// Returns the 1-based line number, the line text without its terminator and
/// the column of `position` within that line. A position equal to the source
/// length points just past the last character.
pub fn get_line_at_position(source: &str, position: usize) -> Option<(usize, String, usize)> {
    if position > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            let text = line.trim_end_matches(['\n', '\r']).to_string();
            return Some((line_number, text, position - start));
        }

        start = end;
        line_number += 1;
    }

    // Past the final byte: either an empty source or a position at the end.
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => Some((
            line_number - 1,
            last.to_string(),
            position - (start - last.len()),
        )),
        _ => Some((line_number, String::new(), 0)),
    }
}

/// Renders a pointer diagnostic for `error` against the source it came from.
///
/// ```text
/// Error: UnexpectedCharacter (Unexpected character `@`)
/// -> shell
///   |
/// 1 | 1 @ 2
///   | --^
/// ```
pub fn format_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let offset = position.0.max(0) as usize;

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, offset) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    // Pad by characters, not bytes, so the caret sits under multi-byte text.
    let arrows = line_text
        .get(removed_whitespace.min(line_pos)..line_pos)
        .map(|before| before.chars().count())
        .unwrap_or_else(|| line_pos.saturating_sub(removed_whitespace))
        + 1;

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Error, ErrorImpl},
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(source, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(source, 27).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_source() {
        let (line_number, line, line_pos) = super::get_line_at_position("1 +", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "1 +");
        assert_eq!(line_pos, 3);

        let (line_number, line, line_pos) = super::get_line_at_position("", 0).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "");
        assert_eq!(line_pos, 0);

        assert!(super::get_line_at_position("abc", 4).is_none());
    }

    #[test]
    fn test_format_error_points_at_offset() {
        let error = Error::new(
            ErrorImpl::UnexpectedCharacter { character: '@' },
            Position(2, Rc::new(String::from("shell"))),
        );

        let rendered = super::format_error(&error, "1 @ 2");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Error: UnexpectedCharacter (Unexpected character `@`)");
        assert_eq!(lines[1], "-> shell");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "1 | 1 @ 2");
        assert_eq!(lines[4], "  | --^");
    }

    #[test]
    fn test_format_error_counts_characters_before_offset() {
        let error = Error::new(
            ErrorImpl::UnexpectedCharacter { character: '@' },
            Position(6, Rc::new(String::from("shell"))),
        );

        let rendered = super::format_error(&error, "\"ñu\" @ 1");
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[3], "1 | \"ñu\" @ 1");
        assert_eq!(lines[4], "  | -----^");
    }
}
