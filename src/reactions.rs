// reactions.rs
// Reaction and particle-phase channels, and the ordered list a chemistry uses

use crate::chemistry::Chemistry;
use crate::config::{ModelOptions, ParticlePhases};
use crate::error::{KineticsError, Result};
use serde::{Deserialize, Serialize};

/// Interfacial reaction channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Reaction {
    /// Intercalation (de)lithiation
    Main,
    /// Solid-electrolyte-interphase growth
    Sei,
    LithiumPlating,
    /// Main reaction in the secondary active material
    Secondary,
}

impl Reaction {
    /// Prefix inserted before the quantity in variable names
    pub fn prefix(&self) -> &'static str {
        match self {
            Reaction::Main => "",
            Reaction::Sei => "SEI ",
            Reaction::LithiumPlating => "lithium plating ",
            Reaction::Secondary => "secondary ",
        }
    }

    /// Side reactions have no exchange current density of their own.
    pub fn has_exchange_current(&self) -> bool {
        !matches!(self, Reaction::Sei | Reaction::LithiumPlating)
    }
}

/// Active material phase within an electrode particle
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    Primary,
    Secondary,
}

impl Phase {
    pub fn prefix(&self) -> &'static str {
        match self {
            Phase::Primary => "",
            Phase::Secondary => "secondary ",
        }
    }
}

/// Ordered reaction/phase channels, kept as two equal-length sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionPhases {
    reactions: Vec<Reaction>,
    phases: Vec<Phase>,
}

impl ReactionPhases {
    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Reaction, Phase)> + '_ {
        self.reactions
            .iter()
            .copied()
            .zip(self.phases.iter().copied())
    }

    fn push(&mut self, reaction: Reaction, phase: Phase) {
        self.reactions.push(reaction);
        self.phases.push(phase);
    }
}

/// Reaction/phase channels for `chemistry` under `options`. Pure function.
pub fn reaction_phases(chemistry: Chemistry, options: &ModelOptions) -> Result<ReactionPhases> {
    match chemistry {
        Chemistry::LithiumIon => {
            let mut list = ReactionPhases {
                reactions: Vec::with_capacity(4),
                phases: Vec::with_capacity(4),
            };
            list.push(Reaction::Main, Phase::Primary);
            list.push(Reaction::Sei, Phase::Primary);
            list.push(Reaction::LithiumPlating, Phase::Primary);
            if options.particle_phases != ParticlePhases::One {
                list.push(Reaction::Secondary, Phase::Secondary);
            }
            Ok(list)
        }
        Chemistry::LeadAcid => Err(KineticsError::UnsupportedChemistry {
            chemistry: chemistry.tag().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_phase_lithium_ion_has_three_channels() {
        let options = ModelOptions::default();
        let list = reaction_phases(Chemistry::LithiumIon, &options).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(
            list.reactions(),
            &[Reaction::Main, Reaction::Sei, Reaction::LithiumPlating]
        );
        assert!(list.phases().iter().all(|phase| *phase == Phase::Primary));
    }

    #[test]
    fn two_phases_append_secondary_channel() {
        let mut options = ModelOptions::default();
        options.set("particle phases", "2").unwrap();
        let list = reaction_phases(Chemistry::LithiumIon, &options).unwrap();
        assert_eq!(list.len(), 4);
        let last = list.iter().last().unwrap();
        assert_eq!(last, (Reaction::Secondary, Phase::Secondary));
        assert_eq!(
            (last.0.prefix(), last.1.prefix()),
            ("secondary ", "secondary ")
        );
    }

    #[test]
    fn prefixes_match_variable_names() {
        let prefixes: Vec<_> = [
            Reaction::Main,
            Reaction::Sei,
            Reaction::LithiumPlating,
            Reaction::Secondary,
        ]
        .iter()
        .map(Reaction::prefix)
        .collect();
        assert_eq!(prefixes, vec!["", "SEI ", "lithium plating ", "secondary "]);
    }

    #[test]
    fn side_reactions_have_no_exchange_current() {
        assert!(Reaction::Main.has_exchange_current());
        assert!(Reaction::Secondary.has_exchange_current());
        assert!(!Reaction::Sei.has_exchange_current());
        assert!(!Reaction::LithiumPlating.has_exchange_current());
    }

    #[test]
    fn lead_acid_enumeration_fails() {
        let err = reaction_phases(Chemistry::LeadAcid, &ModelOptions::default()).unwrap_err();
        assert!(matches!(err, KineticsError::UnsupportedChemistry { .. }));
    }
}
