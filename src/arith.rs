use crate::ast::NodeType;
use crate::error::CalcError;

// Literal decoding and operator semantics shared by every evaluation path.
// The evaluator, the optimizer's fold and bound evaluation of optimized trees
// all go through here, so they cannot disagree on a result or an error.

pub(crate) fn decode_integer(literal: &str) -> Result<f64, CalcError> {
    literal
        .parse::<i64>()
        .map(|v| v as f64)
        .map_err(|_| CalcError::InvalidInteger(literal.to_string()))
}

/// Decodes a decimal literal. Out-of-range text (`1e400`) and the `inf`/`nan`
/// spellings are rejected like any other malformed literal.
pub(crate) fn decode_decimal(literal: &str) -> Result<f64, CalcError> {
    match literal.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(CalcError::InvalidDecimal(literal.to_string())),
    }
}

pub(crate) fn apply(kind: NodeType, left: f64, right: f64) -> Result<f64, CalcError> {
    match kind {
        NodeType::Addition => Ok(left + right),
        NodeType::Subtraction => Ok(left - right),
        NodeType::Multiplication => Ok(left * right),
        NodeType::Division => {
            // -0.0 == 0.0, so both signed zeros are rejected
            if right == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            Ok(left / right)
        }
        NodeType::Integer | NodeType::Decimal | NodeType::Variable => Err(
            CalcError::InvalidNodeType(format!("{:?} is not an operator", kind)),
        ),
    }
}

/// Enforces the optional nesting limit. `depth` is the depth of the node
/// about to be visited, starting at 1 for the root.
pub(crate) fn check_depth(depth: usize, max_depth: Option<usize>) -> Result<(), CalcError> {
    match max_depth {
        Some(limit) if depth > limit => Err(CalcError::DepthLimitExceeded { limit }),
        _ => Ok(()),
    }
}
