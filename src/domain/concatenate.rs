// domain/concatenate.rs
// Joins per-domain fields into one field spanning the whole cell

use super::CellTopology;
use crate::error::{KineticsError, Result};
use crate::expression::{Domains, Expr, ExprKind};

/// Concatenate `fields` into a whole-cell field for `topology`. The fields
/// must be given in spatial order and must cover exactly the topology's
/// domains, with no gaps or overlaps.
pub fn concatenate(topology: CellTopology, fields: &[Expr]) -> Result<Expr> {
    let found = spanned_domains(fields)?;
    if fields.iter().any(Expr::is_domain_free) || topology.domains() != &found[..] {
        return Err(KineticsError::DomainGap {
            expected: topology.domains().to_vec(),
            found: found.to_vec(),
        });
    }
    Expr::from_kind(ExprKind::Concatenation(fields.to_vec()))
}

/// Domains covered by `fields` in the order given. Fails if they are not
/// strictly increasing in spatial order (which also catches overlaps).
pub(crate) fn spanned_domains(fields: &[Expr]) -> Result<Domains> {
    let found: Domains = fields
        .iter()
        .flat_map(|field| field.domains().iter().copied())
        .collect();
    if found.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(KineticsError::DomainOrder {
            found: found.to_vec(),
        });
    }
    Ok(found)
}
