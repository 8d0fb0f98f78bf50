// chemistry.rs
// Cell chemistry tags and the chemistry-specific reaction coupling

use crate::domain::Electrode;
use crate::error::{KineticsError, Result};
use crate::expression::Expr;
use crate::reactions::Reaction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Chemistries the model assembly knows about. Lead-acid is recognised so
/// that configurations naming it fail loudly instead of falling through
/// to lithium-ion behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chemistry {
    #[serde(rename = "lithium-ion")]
    LithiumIon,
    #[serde(rename = "lead-acid")]
    LeadAcid,
}

impl Chemistry {
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "lithium-ion" => Ok(Chemistry::LithiumIon),
            "lead-acid" => Ok(Chemistry::LeadAcid),
            _ => Err(KineticsError::UnsupportedChemistry {
                chemistry: tag.to_string(),
            }),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Chemistry::LithiumIon => "lithium-ion",
            Chemistry::LeadAcid => "lead-acid",
        }
    }

    /// Stoichiometric coefficients `(s_n, s_p)` mapping each electrode's
    /// reaction current into the electrolyte source term.
    pub fn coupling_coefficients(&self, reaction: Reaction) -> Result<CouplingCoefficients> {
        match (self, reaction) {
            // Every lithium-ion reaction moves one Li+ per electron
            (Chemistry::LithiumIon, _) => Ok(CouplingCoefficients {
                negative: Expr::one(),
                positive: Expr::one(),
            }),
            (Chemistry::LeadAcid, _) => Err(KineticsError::UnsupportedChemistry {
                chemistry: self.tag().to_string(),
            }),
        }
    }
}

impl FromStr for Chemistry {
    type Err = KineticsError;

    fn from_str(tag: &str) -> Result<Self> {
        Chemistry::from_tag(tag)
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CouplingCoefficients {
    /// s_n
    pub negative: Expr,
    /// s_p
    pub positive: Expr,
}

impl CouplingCoefficients {
    pub fn electrode(&self, electrode: Electrode) -> &Expr {
        match electrode {
            Electrode::Negative => &self.negative,
            Electrode::Positive => &self.positive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lithium_ion_couples_every_reaction_with_unit_coefficients() {
        for reaction in [
            Reaction::Main,
            Reaction::Sei,
            Reaction::LithiumPlating,
            Reaction::Secondary,
        ] {
            let s = Chemistry::LithiumIon.coupling_coefficients(reaction).unwrap();
            assert_eq!(s.negative, Expr::one());
            assert_eq!(s.positive, Expr::one());
        }
    }

    #[test]
    fn lead_acid_is_recognised_but_unsupported() {
        let chemistry: Chemistry = "lead-acid".parse().unwrap();
        let err = chemistry.coupling_coefficients(Reaction::Main).unwrap_err();
        match err {
            KineticsError::UnsupportedChemistry { chemistry } => assert_eq!(chemistry, "lead-acid"),
            other => panic!("expected UnsupportedChemistry, got {other:?}"),
        }
    }

    #[test]
    fn unknown_tags_are_rejected() {
        assert!(matches!(
            Chemistry::from_tag("sodium-ion"),
            Err(KineticsError::UnsupportedChemistry { .. })
        ));
    }
}
