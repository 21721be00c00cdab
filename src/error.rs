use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("missing left child of operator node")]
    MissingLeftChild,
    #[error("missing right child of operator node")]
    MissingRightChild,
    #[error("invalid node type: {0}")]
    InvalidNodeType(String),
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),
    #[error("invalid decimal: {0:?}")]
    InvalidDecimal(String),
    #[error("invalid variable: {0}")]
    InvalidVariable(String),
    #[error("parse error: {0}")]
    Parser(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("expression nesting exceeds depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
}

#[derive(Debug)]
pub enum VarResolveError {
    Unknown(String),
    Invalid(String),
}
