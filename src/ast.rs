use crate::error::CalcError;

/// The kinds of node an expression tree is built from.
///
/// Numeric literals and variables are leaves; the four arithmetic
/// operators always carry a left and a right operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum NodeType {
    /// Base-10 signed integer literal (e.g. `42`, `-7`)
    Integer,
    /// Decimal literal (e.g. `3.14`, `2.5e-4`)
    Decimal,
    /// Symbolic input whose value is not known to this crate
    Variable,
    /// a + b
    Addition,
    /// a - b
    Subtraction,
    /// a * b
    Multiplication,
    /// a / b
    Division,
}

/// Coarse classification used for dispatch by the evaluator and the optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    Literal,
    Symbol,
    Operator,
}

impl NodeType {
    pub fn class(self) -> NodeClass {
        match self {
            NodeType::Integer | NodeType::Decimal => NodeClass::Literal,
            NodeType::Variable => NodeClass::Symbol,
            NodeType::Addition
            | NodeType::Subtraction
            | NodeType::Multiplication
            | NodeType::Division => NodeClass::Operator,
        }
    }

    pub fn is_operator(self) -> bool {
        self.class() == NodeClass::Operator
    }

    /// Raw numeric tag used by the interchange format.
    pub fn tag(self) -> u8 {
        match self {
            NodeType::Integer => 0,
            NodeType::Decimal => 1,
            NodeType::Variable => 2,
            NodeType::Addition => 3,
            NodeType::Subtraction => 4,
            NodeType::Multiplication => 5,
            NodeType::Division => 6,
        }
    }
}

impl TryFrom<u8> for NodeType {
    type Error = CalcError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(NodeType::Integer),
            1 => Ok(NodeType::Decimal),
            2 => Ok(NodeType::Variable),
            3 => Ok(NodeType::Addition),
            4 => Ok(NodeType::Subtraction),
            5 => Ok(NodeType::Multiplication),
            6 => Ok(NodeType::Division),
            other => Err(CalcError::InvalidNodeType(format!("unknown tag {}", other))),
        }
    }
}

impl From<NodeType> for u8 {
    fn from(kind: NodeType) -> u8 {
        kind.tag()
    }
}

/// A node of the input tree as produced by the parser (or by an embedder).
///
/// `literal` is only meaningful for leaves and is decoded lazily, so a tree
/// holding `"12x"` as an integer literal is representable and only fails once
/// evaluated or optimized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: NodeType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub literal: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub left: Option<Box<Node>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub right: Option<Box<Node>>,
}

impl Node {
    /// Raw constructor without children. Nothing is validated here.
    pub fn new(kind: NodeType, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
            left: None,
            right: None,
        }
    }

    pub fn integer(literal: impl Into<String>) -> Self {
        Self::new(NodeType::Integer, literal)
    }

    pub fn decimal(literal: impl Into<String>) -> Self {
        Self::new(NodeType::Decimal, literal)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(NodeType::Variable, name)
    }

    pub fn binary(kind: NodeType, left: Node, right: Node) -> Self {
        Self {
            kind,
            literal: String::new(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.size()) + self.right.as_ref().map_or(0, |n| n.size())
    }
}

/// An expression tree with a single owned root.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ast {
    pub node: Node,
}

impl Ast {
    pub fn new(node: Node) -> Self {
        Self { node }
    }
}

impl From<Node> for Ast {
    fn from(node: Node) -> Self {
        Self { node }
    }
}
