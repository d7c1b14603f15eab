use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;
use tracing::{debug, warn};

use crate::{ast::ast::Node, errors::errors::Error};

use super::{expr::*, parser::Parser};

/// Binding power that lets nothing bind; also the top-level climb floor.
pub const DEFAULT_BP: u32 = 0;
pub const ADDITIVE_BP: u32 = 10;
pub const MULTIPLICATIVE_BP: u32 = 20;
pub const EXPONENT_BP: u32 = 30;
pub const UNARY_BP: u32 = 100;

pub type NUDHandler = fn(&mut Parser<'_>, u32) -> Result<Node, Error>;
pub type LEDHandler = fn(&mut Parser<'_>, Node, u32) -> Result<Node, Error>;

/// Key a grammar rule is registered under.
///
/// Numbers and strings share `Const`, every name shares `Name`, and each
/// operator symbol gets its own rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolId {
    Const,
    Name,
    End,
    Operator(String),
}

impl SymbolId {
    pub fn op(symbol: &str) -> Self {
        SymbolId::Operator(String::from(symbol))
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolId::Const => write!(f, "Const"),
            SymbolId::Name => write!(f, "Name"),
            SymbolId::End => write!(f, "(end)"),
            SymbolId::Operator(symbol) => write!(f, "{}", symbol),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy)]
pub struct PrefixRule {
    /// Binding power the operand is parsed at.
    pub binding_power: u32,
    pub handler: NUDHandler,
}

#[derive(Clone, Copy)]
pub struct InfixRule {
    /// Binding power the right operand is parsed at.
    pub right_binding_power: u32,
    pub handler: LEDHandler,
}

#[derive(Clone)]
pub struct GrammarRule {
    pub id: SymbolId,
    pub left_binding_power: u32,
    pub prefix: Option<PrefixRule>,
    pub infix: Option<InfixRule>,
}

impl GrammarRule {
    pub fn has_prefix(&self) -> bool {
        self.prefix.is_some()
    }

    pub fn has_infix(&self) -> bool {
        self.infix.is_some()
    }
}

/// Registry of grammar rules, one per [`SymbolId`].
///
/// Built once and then only read while parsing, so a single registry can
/// back any number of parses at the same time.
#[derive(Clone, Default)]
pub struct Grammar {
    rules: HashMap<SymbolId, GrammarRule>,
}

impl Grammar {
    pub fn new() -> Self {
        Grammar {
            rules: HashMap::new(),
        }
    }

    /// Returns the rule for `id`, creating a bare one if it does not exist.
    ///
    /// An existing rule is returned untouched: its binding power and any
    /// attached behaviors are kept.
    pub fn register(&mut self, id: SymbolId, left_binding_power: u32) -> &mut GrammarRule {
        self.rules
            .entry(id.clone())
            .or_insert_with(|| GrammarRule {
                id,
                left_binding_power,
                prefix: None,
                infix: None,
            })
    }

    /// Attaches a prefix behavior whose operand is parsed at `binding_power`.
    pub fn prefix(&mut self, id: SymbolId, binding_power: u32, nud_fn: NUDHandler) {
        self.register(id, DEFAULT_BP).prefix = Some(PrefixRule {
            binding_power,
            handler: nud_fn,
        });
    }

    /// Attaches an infix behavior.
    ///
    /// The right operand is parsed at the rule's own binding power for
    /// left-associative operators and one below it for right-associative
    /// ones. When `id` is already registered its stored binding power wins
    /// over `left_binding_power`, so register infix forms before prefix ones.
    pub fn infix(
        &mut self,
        id: SymbolId,
        left_binding_power: u32,
        associativity: Associativity,
        led_fn: LEDHandler,
    ) {
        let rule = self.register(id, left_binding_power);
        if rule.left_binding_power != left_binding_power {
            warn!(
                symbol = %rule.id,
                requested = left_binding_power,
                kept = rule.left_binding_power,
                "infix binding power ignored for an existing rule"
            );
        }
        let right_binding_power = match associativity {
            Associativity::Left => rule.left_binding_power,
            Associativity::Right => rule.left_binding_power.saturating_sub(1),
        };

        rule.infix = Some(InfixRule {
            right_binding_power,
            handler: led_fn,
        });
    }

    /// Registers `id` as an atom that parses to itself.
    pub fn atom(&mut self, id: SymbolId) {
        self.prefix(id, DEFAULT_BP, parse_atom_expr);
    }

    pub fn get(&self, id: &SymbolId) -> Option<&GrammarRule> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &SymbolId) -> bool {
        self.rules.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builds the arithmetic grammar.
///
/// Binary operators are registered before their prefix forms so the shared
/// `+` and `-` rules keep the additive binding power.
pub fn create_grammar() -> Grammar {
    let mut grammar = Grammar::new();

    // Literals and symbols
    grammar.atom(SymbolId::Const);
    grammar.atom(SymbolId::Name);

    // Additive and multiplicative
    grammar.infix(SymbolId::op("+"), ADDITIVE_BP, Associativity::Left, parse_binary_expr);
    grammar.infix(SymbolId::op("-"), ADDITIVE_BP, Associativity::Left, parse_binary_expr);
    grammar.infix(SymbolId::op("*"), MULTIPLICATIVE_BP, Associativity::Left, parse_binary_expr);
    grammar.infix(SymbolId::op("/"), MULTIPLICATIVE_BP, Associativity::Left, parse_binary_expr);

    // Power and modulo chain to the right
    grammar.infix(SymbolId::op("^"), EXPONENT_BP, Associativity::Right, parse_binary_expr);
    grammar.infix(SymbolId::op("%"), EXPONENT_BP, Associativity::Right, parse_binary_expr);

    grammar.register(SymbolId::End, DEFAULT_BP);

    // Unary
    grammar.prefix(SymbolId::op("+"), UNARY_BP, parse_prefix_expr);
    grammar.prefix(SymbolId::op("-"), UNARY_BP, parse_prefix_expr);

    // Grouping
    grammar.prefix(SymbolId::op("("), DEFAULT_BP, parse_grouping_expr);
    grammar.register(SymbolId::op(")"), DEFAULT_BP);

    debug!(rules = grammar.len(), "seeded default grammar");
    grammar
}

lazy_static! {
    pub static ref DEFAULT_GRAMMAR: Grammar = create_grammar();
}
