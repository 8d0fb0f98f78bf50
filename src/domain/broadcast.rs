// domain/broadcast.rs
// Lifts domain-free values onto a field domain

use super::Domain;
use crate::error::Result;
use crate::expression::{Expr, ExprKind};

/// Field that is uniform over `domain`. Fails if `value` already lives on a
/// domain. Broadcasting zero keeps it a structural zero, so
/// `broadcast(0.0, d)?.x_average() == Expr::zero()`.
pub fn broadcast(value: impl Into<Expr>, domain: Domain) -> Result<Expr> {
    Expr::from_kind(ExprKind::Broadcast {
        child: value.into(),
        domain,
    })
}

/// Structural zero over `domain`
pub fn broadcast_zero(domain: Domain) -> Expr {
    Expr::with_domains(
        ExprKind::Broadcast {
            child: Expr::zero(),
            domain,
        },
        smallvec::smallvec![domain],
    )
}
