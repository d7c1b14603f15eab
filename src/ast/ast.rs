use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    /// Display names of the operators the default grammar defines.
    pub static ref OPERATOR_NAMES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("+", "Add");
        map.insert("-", "Sub");
        map.insert("*", "Mul");
        map.insert("/", "Div");
        map.insert("^", "Power");
        map.insert("%", "Mod");
        map
    };
}

/// Name an operator renders with; falls back to the symbol itself.
pub fn operator_name(operator: &str) -> &str {
    OPERATOR_NAMES.get(operator).copied().unwrap_or(operator)
}

/// Node Types
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Literal,
    Identifier,
    UnaryOp,
    BinaryOp,
}

/// Expression tree node.
///
/// Literals and identifiers keep their raw lexeme. Operator nodes keep the
/// operator symbol, which always has a rule in the grammar that built them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal {
        text: String,
    },
    Identifier {
        text: String,
    },
    UnaryOp {
        operator: String,
        operand: Box<Node>,
    },
    BinaryOp {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn literal(text: impl Into<String>) -> Self {
        Node::Literal { text: text.into() }
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Node::Identifier { text: text.into() }
    }

    pub fn unary(operator: impl Into<String>, operand: Node) -> Self {
        Node::UnaryOp {
            operator: operator.into(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(operator: impl Into<String>, left: Node, right: Node) -> Self {
        Node::BinaryOp {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn get_node_type(&self) -> NodeType {
        match self {
            Node::Literal { .. } => NodeType::Literal,
            Node::Identifier { .. } => NodeType::Identifier,
            Node::UnaryOp { .. } => NodeType::UnaryOp,
            Node::BinaryOp { .. } => NodeType::BinaryOp,
        }
    }

    /// Operator symbol of a unary or binary node.
    pub fn operator(&self) -> Option<&str> {
        match self {
            Node::UnaryOp { operator, .. } | Node::BinaryOp { operator, .. } => {
                Some(operator.as_str())
            }
            _ => None,
        }
    }

    /// Number of child nodes: 0 for atoms, 1 for unary, 2 for binary.
    pub fn arity(&self) -> usize {
        match self {
            Node::Literal { .. } | Node::Identifier { .. } => 0,
            Node::UnaryOp { .. } => 1,
            Node::BinaryOp { .. } => 2,
        }
    }
}

/// Pieces of a rendering still to be written.
enum Pending<'a> {
    Node(&'a Node),
    Text(&'static str),
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Walks an explicit stack so long operator chains render without
        // recursing once per level.
        let mut pending = vec![Pending::Node(self)];

        while let Some(next) = pending.pop() {
            match next {
                Pending::Text(text) => f.write_str(text)?,
                Pending::Node(Node::Literal { text }) => write!(f, "(Const {})", text)?,
                Pending::Node(Node::Identifier { text }) => write!(f, "(Name {})", text)?,
                Pending::Node(Node::UnaryOp { operator, operand }) => {
                    write!(f, "(Unary{} ", operator_name(operator))?;
                    pending.push(Pending::Text(")"));
                    pending.push(Pending::Node(operand));
                }
                Pending::Node(Node::BinaryOp {
                    operator,
                    left,
                    right,
                }) => {
                    write!(f, "({} ", operator_name(operator))?;
                    pending.push(Pending::Text(")"));
                    pending.push(Pending::Node(right));
                    pending.push(Pending::Text(" "));
                    pending.push(Pending::Node(left));
                }
            }
        }

        Ok(())
    }
}

impl Node {
    /// Moves the boxed children out, leaving empty literals in their place.
    fn take_children(&mut self, into: &mut Vec<Node>) {
        match self {
            Node::Literal { .. } | Node::Identifier { .. } => {}
            Node::UnaryOp { operand, .. } => {
                into.push(std::mem::replace(operand.as_mut(), Node::literal("")));
            }
            Node::BinaryOp { left, right, .. } => {
                into.push(std::mem::replace(left.as_mut(), Node::literal("")));
                into.push(std::mem::replace(right.as_mut(), Node::literal("")));
            }
        }
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);

        // Each popped node has its children detached before it is dropped,
        // so no drop nests deeper than one level.
        while let Some(mut node) = stack.pop() {
            node.take_children(&mut stack);
        }
    }
}
