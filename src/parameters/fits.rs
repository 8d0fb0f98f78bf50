// parameters/fits.rs
// Closed-form curve fits of electrode material properties

use crate::expression::Expr;

/// LG M50 graphite entropic change in open-circuit potential [V.K-1] at
/// 298.15 K as a function of stoichiometry.
///
/// Fit from K. O'Regan et al. (2021). The `a1` tanh term is disabled by a
/// zero multiplier; changing the multiplier re-enables it.
pub fn graphite_lgm50_entropic_change_oregan2021(sto: &Expr) -> Expr {
    let a0 = -0.1112;
    let a1 = -0.09002 * 0.0; // fixed fit (see discussion on paper)
    let a2 = 0.3561;
    let b1 = 0.4955;
    let b2 = 0.08309;
    let c0 = 0.02914;
    let c1 = 0.1122;
    let c2 = 0.004616;
    let d1 = 63.9;

    let du_dt = a0 * sto
        + c0
        + a2 * (-(sto - b2).powf(2.0) / c2).exp()
        + a1 * ((d1 * (sto - (b1 - c1))).tanh() - (d1 * (sto - (b1 + c1))).tanh());

    du_dt / 1000.0 // fit in mV / K
}
