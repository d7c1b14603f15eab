use crate::{
    ast::ast::Node,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::DEFAULT_BP, parser::Parser};

/// Precedence climbing over the parser's token stream.
///
/// Parses a prefix form, then keeps folding infix operators into the left
/// operand while the current token binds tighter than `bp`. Every call
/// counts as one level of nesting against the parser's limit.
pub fn parse_expr(parser: &mut Parser<'_>, bp: u32) -> Result<Node, Error> {
    parser.enter()?;
    let result = climb(parser, bp);
    parser.leave();
    result
}

fn climb(parser: &mut Parser<'_>, bp: u32) -> Result<Node, Error> {
    // First parse NUD
    let Some(prefix) = parser.current_rule().and_then(|rule| rule.prefix) else {
        return Err(unexpected_token(parser));
    };

    let mut left = (prefix.handler)(parser, prefix.binding_power)?;

    // While the current token binds tighter than bp, fold it in as LED
    while parser.current_binding_power() > bp {
        let Some(infix) = parser.current_rule().and_then(|rule| rule.infix) else {
            return Err(unexpected_token(parser));
        };

        left = (infix.handler)(parser, left, infix.right_binding_power)?;
    }

    Ok(left)
}

fn unexpected_token(parser: &Parser<'_>) -> Error {
    Error::new(
        ErrorImpl::UnexpectedToken {
            token: parser.current_token().value.clone(),
        },
        parser.get_position(),
    )
}

pub fn parse_atom_expr(parser: &mut Parser<'_>, _bp: u32) -> Result<Node, Error> {
    let token = parser.advance()?;

    match token.kind {
        TokenKind::Name => Ok(Node::identifier(token.value)),
        _ => Ok(Node::literal(token.value)),
    }
}

pub fn parse_prefix_expr(parser: &mut Parser<'_>, bp: u32) -> Result<Node, Error> {
    let operator_token = parser.advance()?;
    let operand = parse_expr(parser, bp)?;

    Ok(Node::unary(operator_token.value, operand))
}

pub fn parse_binary_expr(parser: &mut Parser<'_>, left: Node, bp: u32) -> Result<Node, Error> {
    let operator_token = parser.advance()?;
    let right = parse_expr(parser, bp)?;

    Ok(Node::binary(operator_token.value, left, right))
}

pub fn parse_grouping_expr(parser: &mut Parser<'_>, _bp: u32) -> Result<Node, Error> {
    parser.advance()?;
    let expr = parse_expr(parser, DEFAULT_BP)?;

    let closing = parser.current_token();
    if closing.kind != TokenKind::Operator || closing.value != ")" {
        return Err(Error::new(
            ErrorImpl::UnclosedGroup {
                token: closing.value.clone(),
            },
            parser.get_position(),
        ));
    }
    parser.advance()?;

    Ok(expr)
}
