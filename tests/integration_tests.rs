//! Integration tests for the public front end.
//!
//! These tests drive the crate the way an outside caller does: source text
//! in, a rendered tree, a token list or a pointer diagnostic out.

use rstest::rstest;
use sqy::{
    ast::ast::Node,
    format_error,
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::TokenKind,
    },
    parser::{
        expr::parse_binary_expr,
        lookups::{create_grammar, Associativity, SymbolId, MULTIPLICATIVE_BP},
        parser::{parse, parse_with_grammar},
    },
};

#[rstest]
#[case("+1", "(UnaryAdd (Const 1))")]
#[case("-1", "(UnarySub (Const 1))")]
#[case("1", "(Const 1)")]
#[case("-1+1", "(Add (UnarySub (Const 1)) (Const 1))")]
#[case("1+2+4", "(Add (Add (Const 1) (Const 2)) (Const 4))")]
#[case("1+2+3-56", "(Sub (Add (Add (Const 1) (Const 2)) (Const 3)) (Const 56))")]
#[case("1+2*3", "(Add (Const 1) (Mul (Const 2) (Const 3)))")]
#[case("1*2+3", "(Add (Mul (Const 1) (Const 2)) (Const 3))")]
#[case("2/4+1*3", "(Add (Div (Const 2) (Const 4)) (Mul (Const 1) (Const 3)))")]
#[case(
    "5+2*3+4/2-1",
    "(Sub (Add (Add (Const 5) (Mul (Const 2) (Const 3))) (Div (Const 4) (Const 2))) (Const 1))"
)]
#[case(
    "10%2*10%4+7",
    "(Add (Mul (Mod (Const 10) (Const 2)) (Mod (Const 10) (Const 4))) (Const 7))"
)]
#[case("3+2^5*2", "(Add (Const 3) (Mul (Power (Const 2) (Const 5)) (Const 2)))")]
#[case("x+1", "(Add (Name x) (Const 1))")]
#[case("a+b*c", "(Add (Name a) (Mul (Name b) (Name c)))")]
#[case("1-2-3", "(Sub (Sub (Const 1) (Const 2)) (Const 3))")]
#[case("2^3^2", "(Power (Const 2) (Power (Const 3) (Const 2)))")]
#[case("2^3%2", "(Power (Const 2) (Mod (Const 3) (Const 2)))")]
#[case(r#""hello"+"world""#, r#"(Add (Const "hello") (Const "world"))"#)]
#[case("  1.5 *\t(x - .25) ", "(Mul (Const 1.5) (Sub (Name x) (Const .25)))")]
fn test_parse_samples(#[case] source: &str, #[case] expected: &str) {
    let tree = parse(source.to_string(), Some("test.sqy".to_string())).unwrap();
    assert_eq!(tree.to_string(), expected);
}

#[rstest]
#[case("1 @ 2", "UnexpectedCharacter", 2)]
#[case("'hello'", "UnexpectedCharacter", 0)]
#[case("1 != 2", "UnknownOperator", 2)]
#[case("a, b", "UnknownOperator", 1)]
#[case("* 2", "UnexpectedToken", 0)]
#[case("1 +", "UnexpectedToken", 3)]
#[case("1 2", "TrailingInput", 2)]
#[case("(1", "UnclosedGroup", 2)]
fn test_parse_failures(#[case] source: &str, #[case] name: &str, #[case] position: isize) {
    let error = parse(source.to_string(), None).unwrap_err();

    assert_eq!(error.get_error_name(), name);
    assert_eq!(error.get_position().0, position);
}

#[test]
fn test_tree_structure() {
    let tree = parse("a*-b".to_string(), None).unwrap();

    assert_eq!(
        tree,
        Node::binary("*", Node::identifier("a"), Node::unary("-", Node::identifier("b")))
    );
}

#[test]
fn test_tokenize_then_parse_agree_on_positions() {
    let source = "x1 + 22 * _y";
    let tokens = tokenize(source.to_string(), None).unwrap();

    let positions: Vec<isize> = tokens.iter().map(|token| token.position()).collect();
    assert_eq!(positions, vec![-1, 0, 3, 5, 8, 10, 12]);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::End);

    assert!(parse(source.to_string(), None).is_ok());
}

#[test]
fn test_lexer_stream_is_pulled_on_demand() {
    // Nothing after the first bad character is ever scanned.
    let mut lexer = Lexer::new("a $ ^^^ $".to_string(), None);

    assert!(lexer.next().unwrap().is_ok());
    assert!(lexer.next().unwrap().is_ok());
    let error = lexer.next().unwrap().unwrap_err();
    assert_eq!(error.get_position().0, 2);
    assert!(lexer.next().is_none());
}

#[test]
fn test_extended_grammar() {
    let mut grammar = create_grammar();
    grammar.infix(
        SymbolId::op("**"),
        MULTIPLICATIVE_BP + 5,
        Associativity::Right,
        parse_binary_expr,
    );

    let tree = parse_with_grammar("2 ** 3 ** 2 + 1".to_string(), None, &grammar).unwrap();
    assert_eq!(
        tree.to_string(),
        "(Add (** (Const 2) (** (Const 3) (Const 2))) (Const 1))"
    );

    // The default grammar is left untouched.
    assert!(parse("2 ** 3".to_string(), None).is_err());
}

#[test]
fn test_diagnostic_for_parse_error() {
    let source = "1 + 2 == 3";
    let error = parse(source.to_string(), Some("calc.sqy".to_string())).unwrap_err();

    let rendered = format_error(&error, source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines[0],
        "Error: UnknownOperator (Operator `==` is not defined by the grammar)"
    );
    assert_eq!(lines[1], "-> calc.sqy");
    assert_eq!(lines[3], "1 | 1 + 2 == 3");
    assert_eq!(lines[4], "  | ------^");
}

#[test]
fn test_diagnostic_on_second_line() {
    let source = "x\n  1 ? 2";
    let error = tokenize(source.to_string(), None).unwrap_err();

    let rendered = format_error(&error, source);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[3], "2 | 1 ? 2");
    assert_eq!(lines[4], "  | --^");
}

#[test]
fn test_bench_sized_chain() {
    // The `--bench --factor 5` program: the ten-term seed repeated 10^4 times.
    let program = format!("{}1", "1+1+1+1+1+1+1+1+1+1+".repeat(10_000));

    let tokens = tokenize(program.clone(), None).unwrap();
    assert_eq!(tokens.len(), 200_001 + 2);
    assert_eq!(tokens.last().unwrap().position(), program.len() as isize);

    let tree = parse(program, None).unwrap();
    let rendered = tree.to_string();
    assert!(rendered.starts_with("(Add (Add "));
    assert_eq!(rendered.matches("(Add ").count(), 100_000);
}

#[test]
fn test_deep_nesting_reports_instead_of_crashing() {
    let source = format!("{}x", "-(".repeat(50_000));
    let error = parse(source.clone(), None).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(format_error(&error, &source).starts_with("Error: NestingTooDeep"));
}
