use std::collections::{BTreeMap, HashMap};

use crate::error::VarResolveError;

/// A trait for looking up the value bound to a variable name.
///
/// Implement this trait to feed variable values from your application into
/// [`OptimizedAst::evaluate_with`](crate::OptimizedAst::evaluate_with).
pub trait VarResolver {
    /// Resolves a variable identifier to its current value.
    ///
    /// If the identifier is known, return `Ok(value)`. If it's unknown, return
    /// `Err(VarResolveError::Unknown)`.
    fn resolve(&self, ident: &str) -> Result<f64, VarResolveError>;
}

impl VarResolver for HashMap<String, f64> {
    fn resolve(&self, ident: &str) -> Result<f64, VarResolveError> {
        self.get(ident)
            .copied()
            .ok_or_else(|| VarResolveError::Unknown(ident.to_string()))
    }
}

impl VarResolver for BTreeMap<String, f64> {
    fn resolve(&self, ident: &str) -> Result<f64, VarResolveError> {
        self.get(ident)
            .copied()
            .ok_or_else(|| VarResolveError::Unknown(ident.to_string()))
    }
}

/// A resolver with no bindings at all. Only constant trees evaluate with it.
pub struct NoVars;
impl VarResolver for NoVars {
    fn resolve(&self, ident: &str) -> Result<f64, VarResolveError> {
        Err(VarResolveError::Unknown(ident.to_string()))
    }
}
