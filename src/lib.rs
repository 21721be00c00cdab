//! Evaluation and constant folding for arithmetic expression trees.
//!
//! An expression is either evaluated once to an `f64`, or optimized into an
//! [`OptimizedAst`] where every subtree without variables has been folded to
//! a single value. The optimized tree can then be evaluated many times with
//! different variable bindings.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let ast = calcula::parse("x * (2 + 3)").unwrap();
//! let optimized = calcula::optimize(Some(&ast)).unwrap().unwrap();
//! assert_eq!(optimized.variables(), vec!["x".to_string()]);
//!
//! let mut vars = HashMap::new();
//! vars.insert("x".to_string(), 4.0);
//! assert_eq!(optimized.evaluate_with(&vars).unwrap(), 20.0);
//! ```
mod arith;
mod ast;
mod collect;
mod engine;
mod error;
mod evaluator;
mod lexer;
mod optimizer;
mod parser;
mod resolver;

pub use ast::{Ast, Node, NodeClass, NodeType};
pub use engine::{Calcula, Limits};
pub use error::{CalcError, VarResolveError};
pub use optimizer::{OptimizedAst, OptimizedNode};
pub use parser::parse;
pub use resolver::{NoVars, VarResolver};

/// Parses and evaluates `expr` with default [`Limits`].
///
/// The empty string evaluates to `0.0`.
pub fn evaluate(expr: &str) -> Result<f64, Vec<CalcError>> {
    Calcula::new().evaluate(expr)
}

/// Evaluates an already parsed tree with default [`Limits`].
pub fn evaluate_ast(ast: &Ast) -> Result<f64, CalcError> {
    Calcula::new().evaluate_ast(ast)
}

/// Optimizes a tree with default [`Limits`]. `None` yields `Ok(None)`.
pub fn optimize(ast: Option<&Ast>) -> Result<Option<OptimizedAst>, CalcError> {
    Calcula::new().optimize(ast)
}
