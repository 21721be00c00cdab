use crate::ast::Ast;
use crate::error::CalcError;
use crate::evaluator::Evaluator;
use crate::optimizer::{OptimizedAst, Optimizer};
use crate::parser::parse_limited;
use crate::resolver::VarResolver;
use log::debug;

/// Resource limits applied while walking expression trees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth, the root counting as depth 1. `None` means
    /// recursion is bounded only by the input tree.
    pub max_depth: Option<usize>,
}

impl Limits {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

/// Entry point for evaluating and optimizing expressions under a fixed set
/// of [`Limits`]. Stateless between calls, so one value can be shared freely
/// across threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Calcula {
    limits: Limits,
}

impl Calcula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Parses and evaluates `expr`.
    ///
    /// The empty string evaluates to `0.0`. Any other input that fails to
    /// parse returns the parser's errors; an evaluation failure is returned
    /// as a single-element list.
    ///
    /// ```
    /// use calcula::Calcula;
    /// let calc = Calcula::new();
    /// assert_eq!(calc.evaluate("(1 + 2) * 3").unwrap(), 9.0);
    /// assert_eq!(calc.evaluate("1 + 2 * 3").unwrap(), 7.0);
    /// ```
    pub fn evaluate(&self, expr: &str) -> Result<f64, Vec<CalcError>> {
        if expr.is_empty() {
            return Ok(0.0);
        }
        let ast = parse_limited(expr, self.limits.max_depth)?;
        debug!("parsed {:?} into {} nodes", expr, ast.node.size());
        self.evaluate_ast(&ast).map_err(|e| vec![e])
    }

    pub fn evaluate_ast(&self, ast: &Ast) -> Result<f64, CalcError> {
        self.evaluator().evaluate_ast(ast)
    }

    /// Folds every variable-free subtree of `ast` into a single value.
    ///
    /// `None` passes through as `Ok(None)`.
    pub fn optimize(&self, ast: Option<&Ast>) -> Result<Option<OptimizedAst>, CalcError> {
        Optimizer {
            max_depth: self.limits.max_depth,
        }
        .optimize(ast)
    }

    /// Evaluates an optimized tree with variable bindings, under this
    /// engine's limits.
    pub fn evaluate_optimized<R>(
        &self,
        optimized: &OptimizedAst,
        resolver: &R,
    ) -> Result<f64, CalcError>
    where
        R: VarResolver + ?Sized,
    {
        optimized.evaluate_with_limit(resolver, self.limits.max_depth)
    }

    fn evaluator(&self) -> Evaluator {
        Evaluator {
            max_depth: self.limits.max_depth,
        }
    }
}
