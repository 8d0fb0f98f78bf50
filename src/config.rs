// Centralized configuration for kinetics aggregation

// ====================
// Chemistry
// ====================
/// Chemistry tag used when a configuration does not name one
pub const DEFAULT_CHEMISTRY: &str = "lithium-ion";

// ====================
// Cell Geometry (LG M50 cylindrical cell, unrolled)
// ====================
pub const TYPICAL_CURRENT_A: f64 = 5.0; // Nominal 1C current
pub const ELECTRODE_HEIGHT_M: f64 = 0.065;
pub const ELECTRODE_WIDTH_M: f64 = 1.58;
pub const NEGATIVE_ELECTRODE_THICKNESS_UM: f64 = 85.2;
pub const SEPARATOR_THICKNESS_UM: f64 = 12.0;
pub const POSITIVE_ELECTRODE_THICKNESS_UM: f64 = 75.6;

// ====================
// Active Material (primary phase)
// ====================
pub const NEGATIVE_PRIMARY_VOLUME_FRACTION: f64 = 0.75; // Graphite
pub const NEGATIVE_PRIMARY_PARTICLE_RADIUS_UM: f64 = 5.86;
pub const POSITIVE_PRIMARY_VOLUME_FRACTION: f64 = 0.665; // NMC811
pub const POSITIVE_PRIMARY_PARTICLE_RADIUS_UM: f64 = 5.22;

// ====================
// Active Material (secondary phase)
// ====================
/// Only read when "particle phases" is "2"
pub const NEGATIVE_SECONDARY_VOLUME_FRACTION: f64 = 0.015; // Silicon blend
pub const NEGATIVE_SECONDARY_PARTICLE_RADIUS_UM: f64 = 1.52;
pub const POSITIVE_SECONDARY_VOLUME_FRACTION: f64 = 0.05;
pub const POSITIVE_SECONDARY_PARTICLE_RADIUS_UM: f64 = 1.0;

use crate::chemistry::Chemistry;
use crate::domain::CellTopology;
use crate::error::{KineticsError, Result};
use crate::kinetics::TotalKinetics;
use crate::parameters::KineticsParameters;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Number of active material phases in each electrode particle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticlePhases {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Default for ParticlePhases {
    fn default() -> Self {
        ParticlePhases::One
    }
}

impl ParticlePhases {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticlePhases::One => "1",
            ParticlePhases::Two => "2",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "1" => Some(ParticlePhases::One),
            "2" => Some(ParticlePhases::Two),
            _ => None,
        }
    }
}

/// Which electrodes are modelled. "positive" is a half-cell against a
/// lithium counter electrode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkingElectrode {
    #[serde(rename = "both")]
    Both,
    #[serde(rename = "positive")]
    Positive,
}

impl Default for WorkingElectrode {
    fn default() -> Self {
        WorkingElectrode::Both
    }
}

impl WorkingElectrode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkingElectrode::Both => "both",
            WorkingElectrode::Positive => "positive",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "both" => Some(WorkingElectrode::Both),
            "positive" => Some(WorkingElectrode::Positive),
            _ => None,
        }
    }
}

/// Model options consumed by the kinetics aggregation. Field names follow
/// the option strings so TOML tables read like an options dictionary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelOptions {
    #[serde(rename = "particle phases")]
    pub particle_phases: ParticlePhases,
    #[serde(rename = "working electrode")]
    pub working_electrode: WorkingElectrode,
}

impl ModelOptions {
    pub const PARTICLE_PHASES: &'static str = "particle phases";
    pub const WORKING_ELECTRODE: &'static str = "working electrode";

    /// Set an option from its string name and value.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || KineticsError::InvalidOption {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            Self::PARTICLE_PHASES => {
                self.particle_phases = ParticlePhases::parse(value).ok_or_else(invalid)?;
            }
            Self::WORKING_ELECTRODE => {
                self.working_electrode = WorkingElectrode::parse(value).ok_or_else(invalid)?;
            }
            _ => {
                return Err(KineticsError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }

    /// Current value of an option as its string form
    pub fn get(&self, name: &str) -> Result<&'static str> {
        match name {
            Self::PARTICLE_PHASES => Ok(self.particle_phases.as_str()),
            Self::WORKING_ELECTRODE => Ok(self.working_electrode.as_str()),
            _ => Err(KineticsError::UnknownOption {
                name: name.to_string(),
            }),
        }
    }

    /// Builder-style variant of [`ModelOptions::set`]
    pub fn with(mut self, name: &str, value: &str) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn topology(&self) -> CellTopology {
        match self.working_electrode {
            WorkingElectrode::Both => CellTopology::TwoElectrode,
            WorkingElectrode::Positive => CellTopology::HalfCell,
        }
    }
}

/// Complete kinetics configuration, typically loaded from a TOML file:
///
/// ```toml
/// chemistry = "lithium-ion"
///
/// [options]
/// "particle phases" = "2"
/// "working electrode" = "both"
///
/// [parameters]
/// typical_current = 5.0
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsConfig {
    /// Kept as the raw tag so unknown chemistries surface as
    /// `UnsupportedChemistry` rather than a parse error
    pub chemistry: String,
    pub options: ModelOptions,
    pub parameters: KineticsParameters,
}

impl Default for KineticsConfig {
    fn default() -> Self {
        Self {
            chemistry: DEFAULT_CHEMISTRY.to_string(),
            options: ModelOptions::default(),
            parameters: KineticsParameters::default(),
        }
    }
}

impl KineticsConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn chemistry(&self) -> Result<Chemistry> {
        Chemistry::from_tag(&self.chemistry)
    }

    /// Resolve the chemistry, validate parameters and build the aggregator.
    pub fn build(&self) -> Result<TotalKinetics> {
        let chemistry = self.chemistry()?;
        self.parameters.validate()?;
        Ok(TotalKinetics::new(
            chemistry,
            self.options.clone(),
            self.parameters.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_single_phase_two_electrode() {
        let options = ModelOptions::default();
        assert_eq!(options.get(ModelOptions::PARTICLE_PHASES).unwrap(), "1");
        assert_eq!(options.get(ModelOptions::WORKING_ELECTRODE).unwrap(), "both");
        assert_eq!(options.topology(), CellTopology::TwoElectrode);
    }

    #[test]
    fn set_updates_options_from_strings() {
        let options = ModelOptions::default()
            .with("particle phases", "2")
            .and_then(|o| o.with("working electrode", "positive"))
            .unwrap();
        assert_eq!(options.particle_phases, ParticlePhases::Two);
        assert_eq!(options.topology(), CellTopology::HalfCell);
    }

    #[test]
    fn set_rejects_unknown_names_and_values() {
        let mut options = ModelOptions::default();
        assert!(matches!(
            options.set("thermal", "lumped"),
            Err(KineticsError::UnknownOption { .. })
        ));
        assert!(matches!(
            options.set("particle phases", "3"),
            Err(KineticsError::InvalidOption { .. })
        ));
        // Failed updates leave the options untouched
        assert_eq!(options, ModelOptions::default());
    }

    #[test]
    fn parses_toml_with_option_strings() {
        let config = KineticsConfig::from_toml_str(
            r#"
            chemistry = "lithium-ion"

            [options]
            "particle phases" = "2"
            "working electrode" = "positive"

            [parameters]
            typical_current = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.options.particle_phases, ParticlePhases::Two);
        assert_eq!(config.options.working_electrode, WorkingElectrode::Positive);
        assert_eq!(config.parameters.typical_current, 2.5);
        assert_eq!(
            config.parameters.separator_thickness,
            KineticsParameters::default().separator_thickness
        );
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config = KineticsConfig::from_toml_str("").unwrap();
        assert_eq!(config, KineticsConfig::default());
        assert_eq!(config.chemistry().unwrap(), Chemistry::LithiumIon);
    }

    #[test]
    fn misspelled_option_is_a_parse_error() {
        let err = KineticsConfig::from_toml_str("[options]\n\"particle phase\" = \"2\"\n").unwrap_err();
        assert!(matches!(err, KineticsError::Toml(_)));
    }

    #[test]
    fn build_rejects_unknown_chemistry() {
        let config = KineticsConfig {
            chemistry: "sodium-ion".to_string(),
            ..KineticsConfig::default()
        };
        assert!(matches!(
            config.build(),
            Err(KineticsError::UnsupportedChemistry { .. })
        ));
    }

    #[test]
    fn build_rejects_invalid_parameters() {
        let mut config = KineticsConfig::default();
        config.parameters.electrode_height = 0.0;
        assert!(matches!(
            config.build(),
            Err(KineticsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn load_from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "chemistry = \"lithium-ion\"").unwrap();
        writeln!(file, "[options]").unwrap();
        writeln!(file, "\"particle phases\" = \"2\"").unwrap();
        let config = KineticsConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.options.particle_phases, ParticlePhases::Two);
        assert!(config.build().is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = KineticsConfig::load_from_file("/nonexistent/kinetics.toml").unwrap_err();
        assert!(matches!(err, KineticsError::Io(_)));
    }
}
