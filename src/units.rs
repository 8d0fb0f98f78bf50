//! Physical unit definitions and the unit suffixes used in variable names.
//!
//! Base units are SI throughout:
//! - Length: metre (m)
//! - Current: ampere (A)

/// Micrometre in metres.
pub const MICROMETRE: f64 = 1.0e-6;

/// Suffix for current per unit interface area.
pub const CURRENT_DENSITY_UNITS: &str = "[A.m-2]";
/// Suffix for current per unit electrode volume.
pub const VOLUMETRIC_CURRENT_UNITS: &str = "[A.m-3]";

/// Convert micrometres to metres.
pub fn micrometres(value: f64) -> f64 {
    value * MICROMETRE
}
