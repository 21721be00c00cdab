use crate::arith::{apply, check_depth, decode_decimal, decode_integer};
use crate::ast::{Ast, Node, NodeClass, NodeType};
use crate::error::CalcError;

/// One-shot tree evaluator. Holds nothing but the nesting limit.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Evaluator {
    pub(crate) max_depth: Option<usize>,
}

impl Evaluator {
    pub(crate) fn evaluate_ast(&self, ast: &Ast) -> Result<f64, CalcError> {
        self.evaluate_node(&ast.node, 1)
    }

    pub(crate) fn evaluate_node(&self, node: &Node, depth: usize) -> Result<f64, CalcError> {
        check_depth(depth, self.max_depth)?;
        match node.kind.class() {
            NodeClass::Literal => {
                reject_children(node)?;
                match node.kind {
                    NodeType::Integer => decode_integer(&node.literal),
                    _ => decode_decimal(&node.literal),
                }
            }
            // No bindings here; variables are resolved on optimized trees.
            NodeClass::Symbol => Err(CalcError::InvalidNodeType(format!(
                "variable '{}' cannot be evaluated without bindings",
                node.literal
            ))),
            NodeClass::Operator => {
                let (left, right) = operands(node)?;
                let l = self.evaluate_node(left, depth + 1)?;
                let r = self.evaluate_node(right, depth + 1)?;
                apply(node.kind, l, r)
            }
        }
    }
}

/// Both children of an operator node, checked left first.
pub(crate) fn operands(node: &Node) -> Result<(&Node, &Node), CalcError> {
    let left = node.left.as_deref().ok_or(CalcError::MissingLeftChild)?;
    let right = node.right.as_deref().ok_or(CalcError::MissingRightChild)?;
    Ok((left, right))
}

pub(crate) fn reject_children(node: &Node) -> Result<(), CalcError> {
    if node.is_leaf() {
        Ok(())
    } else {
        Err(CalcError::InvalidNodeType(format!(
            "{:?} leaf must not have children",
            node.kind
        )))
    }
}
