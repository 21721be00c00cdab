use crate::arith::{apply, check_depth, decode_decimal, decode_integer};
use crate::ast::{Ast, Node, NodeClass, NodeType};
use crate::collect::collect_vars;
use crate::error::CalcError;
use crate::evaluator::{operands, reject_children};
use crate::resolver::VarResolver;
use log::{debug, trace};

/// Node of a partially evaluated tree.
///
/// A folded node (`is_optimized == true`) is always a childless `Decimal`
/// leaf holding its value. Everything else is either an unresolved variable,
/// which keeps its name in `old_value`, or an operator over two optimized
/// children.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedNode {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: NodeType,
    #[cfg_attr(feature = "serde", serde(with = "float_repr"))]
    pub value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub old_value: String,
    pub is_optimized: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub left: Option<Box<OptimizedNode>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub right: Option<Box<OptimizedNode>>,
}

impl OptimizedNode {
    pub fn folded(value: f64) -> Self {
        Self {
            kind: NodeType::Decimal,
            value,
            old_value: String::new(),
            is_optimized: true,
            left: None,
            right: None,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self {
            kind: NodeType::Variable,
            value: 0.0,
            old_value: name.into(),
            is_optimized: false,
            left: None,
            right: None,
        }
    }

    pub fn operator(kind: NodeType, left: OptimizedNode, right: OptimizedNode) -> Self {
        Self {
            kind,
            value: 0.0,
            old_value: String::new(),
            is_optimized: false,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn size(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.size()) + self.right.as_ref().map_or(0, |n| n.size())
    }

    fn evaluate_with<R>(
        &self,
        resolver: &R,
        depth: usize,
        max_depth: Option<usize>,
    ) -> Result<f64, CalcError>
    where
        R: VarResolver + ?Sized,
    {
        check_depth(depth, max_depth)?;
        if self.is_optimized {
            if self.kind != NodeType::Decimal || !self.is_leaf() {
                return Err(CalcError::InvalidNodeType(format!(
                    "folded node must be a Decimal leaf, found {:?}",
                    self.kind
                )));
            }
            return Ok(self.value);
        }
        match self.kind.class() {
            NodeClass::Literal => Err(CalcError::InvalidNodeType(format!(
                "unfolded {:?} literal",
                self.kind
            ))),
            NodeClass::Symbol => {
                if !self.is_leaf() {
                    return Err(CalcError::InvalidNodeType(
                        "Variable leaf must not have children".into(),
                    ));
                }
                resolver
                    .resolve(&self.old_value)
                    .map_err(|_| CalcError::InvalidVariable(self.old_value.clone()))
            }
            NodeClass::Operator => {
                let left = self.left.as_deref().ok_or(CalcError::MissingLeftChild)?;
                let right = self.right.as_deref().ok_or(CalcError::MissingRightChild)?;
                let l = left.evaluate_with(resolver, depth + 1, max_depth)?;
                let r = right.evaluate_with(resolver, depth + 1, max_depth)?;
                apply(self.kind, l, r)
            }
        }
    }
}

// Folds can overflow to +-inf (or produce NaN), which JSON numbers cannot
// hold. Non-finite values travel as their string spelling instead.
#[cfg(feature = "serde")]
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            s.serialize_f64(*value)
        } else {
            s.serialize_str(&value.to_string())
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Repr::deserialize(d)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => text
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid float value {:?}", text))),
        }
    }
}

/// A partially evaluated expression, ready to be evaluated repeatedly with
/// different variable bindings.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedAst {
    pub node: OptimizedNode,
}

impl OptimizedAst {
    /// True when the whole expression folded to a single value.
    pub fn is_constant(&self) -> bool {
        self.node.is_optimized
    }

    /// Distinct variable names in left-to-right first-appearance order.
    pub fn variables(&self) -> Vec<String> {
        collect_vars(&self.node)
    }

    /// Evaluates the tree, looking every remaining variable up in `resolver`.
    ///
    /// A variable the resolver cannot provide fails with
    /// [`CalcError::InvalidVariable`].
    pub fn evaluate_with<R>(&self, resolver: &R) -> Result<f64, CalcError>
    where
        R: VarResolver + ?Sized,
    {
        self.node.evaluate_with(resolver, 1, None)
    }

    pub(crate) fn evaluate_with_limit<R>(
        &self,
        resolver: &R,
        max_depth: Option<usize>,
    ) -> Result<f64, CalcError>
    where
        R: VarResolver + ?Sized,
    {
        self.node.evaluate_with(resolver, 1, max_depth)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Optimizer {
    pub(crate) max_depth: Option<usize>,
}

impl Optimizer {
    pub(crate) fn optimize(&self, ast: Option<&Ast>) -> Result<Option<OptimizedAst>, CalcError> {
        let Some(ast) = ast else {
            return Ok(None);
        };
        let node = self.optimize_node(&ast.node, 1)?;
        debug!(
            "optimized expression: {} nodes -> {} nodes (constant: {})",
            ast.node.size(),
            node.size(),
            node.is_optimized
        );
        Ok(Some(OptimizedAst { node }))
    }

    // Post-order: both children are settled before the parent decides to fold.
    pub(crate) fn optimize_node(
        &self,
        node: &Node,
        depth: usize,
    ) -> Result<OptimizedNode, CalcError> {
        check_depth(depth, self.max_depth)?;
        match node.kind.class() {
            NodeClass::Literal => {
                reject_children(node)?;
                let value = match node.kind {
                    NodeType::Integer => decode_integer(&node.literal)?,
                    _ => decode_decimal(&node.literal)?,
                };
                Ok(OptimizedNode::folded(value))
            }
            NodeClass::Symbol => {
                reject_children(node)?;
                Ok(OptimizedNode::variable(node.literal.clone()))
            }
            NodeClass::Operator => {
                let (left, right) = operands(node)?;
                let left = self.optimize_node(left, depth + 1)?;
                let right = self.optimize_node(right, depth + 1)?;
                if !left.is_optimized || !right.is_optimized {
                    return Ok(OptimizedNode::operator(node.kind, left, right));
                }
                let value = apply(node.kind, left.value, right.value)?;
                trace!("folded {} {:?} {} = {}", left.value, node.kind, right.value, value);
                Ok(OptimizedNode::folded(value))
            }
        }
    }
}
