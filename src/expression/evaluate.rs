// expression/evaluate.rs
// Scalar evaluation for domain-free expressions and uniform fields

use super::{Expr, ExprKind};
use crate::error::{KineticsError, Result};
use std::collections::HashMap;

/// Values bound to symbol names for evaluation
pub type Bindings = HashMap<String, f64>;

impl Expr {
    /// Evaluate to a single number. A field symbol is treated as uniform
    /// over its domain and takes its bound value; a concatenation has no
    /// single value and fails.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64> {
        match self.kind() {
            ExprKind::Scalar(value) => Ok(*value),
            ExprKind::Variable { name, .. } => {
                bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| KineticsError::UnboundSymbol { name: name.clone() })
            }
            ExprKind::Broadcast { child, .. } => child.evaluate(bindings),
            ExprKind::Concatenation(_) => Err(KineticsError::NonUniformField {
                domains: self.domains().to_vec(),
            }),
            ExprKind::XAverage(child) => child.evaluate(bindings),
            ExprKind::Negate(child) => Ok(-child.evaluate(bindings)?),
            ExprKind::Binary { op, left, right } => {
                Ok(op.apply(left.evaluate(bindings)?, right.evaluate(bindings)?))
            }
            ExprKind::Function { func, arg } => Ok(func.apply(arg.evaluate(bindings)?)),
        }
    }
}
