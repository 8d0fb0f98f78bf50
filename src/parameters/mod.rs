// parameters/mod.rs
// Geometry and current scales that turn dimensionless current densities
// into dimensional and volumetric ones
//
// This module handles:
// - Electrode and active-material-phase geometry
// - Typical current density and cell thickness
// - Interfacial and volumetric current scales per electrode and phase
// - Closed-form parameter fits (fits.rs)

pub mod fits;

use crate::config;
use crate::domain::{CellTopology, Electrode};
use crate::error::{KineticsError, Result};
use crate::reactions::Phase;
use crate::units::micrometres;
use serde::{Deserialize, Serialize};

/// Geometry of one active material phase
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseGeometry {
    pub active_material_volume_fraction: f64,
    /// Particle radius [m]
    pub particle_radius: f64,
}

impl PhaseGeometry {
    /// Spherical particles: a = 3 ε / R [m-1]
    pub fn surface_area_to_volume_ratio(&self) -> f64 {
        3.0 * self.active_material_volume_fraction / self.particle_radius
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectrodeParameters {
    /// Electrode thickness [m]
    pub thickness: f64,
    pub primary: PhaseGeometry,
    pub secondary: PhaseGeometry,
}

impl ElectrodeParameters {
    pub fn phase(&self, phase: Phase) -> &PhaseGeometry {
        match phase {
            Phase::Primary => &self.primary,
            Phase::Secondary => &self.secondary,
        }
    }

    fn values(&self) -> [f64; 5] {
        [
            self.thickness,
            self.primary.active_material_volume_fraction,
            self.primary.particle_radius,
            self.secondary.active_material_volume_fraction,
            self.secondary.particle_radius,
        ]
    }
}

const NEGATIVE_NAMES: [&str; 5] = [
    "Negative electrode thickness [m]",
    "Primary: Negative electrode active material volume fraction",
    "Primary: Negative particle radius [m]",
    "Secondary: Negative electrode active material volume fraction",
    "Secondary: Negative particle radius [m]",
];

const POSITIVE_NAMES: [&str; 5] = [
    "Positive electrode thickness [m]",
    "Primary: Positive electrode active material volume fraction",
    "Primary: Positive particle radius [m]",
    "Secondary: Positive electrode active material volume fraction",
    "Secondary: Positive particle radius [m]",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticsParameters {
    /// Typical (1C) cell current [A]
    pub typical_current: f64,
    /// [m]
    pub electrode_height: f64,
    /// [m]
    pub electrode_width: f64,
    /// [m]
    pub separator_thickness: f64,
    pub negative: ElectrodeParameters,
    pub positive: ElectrodeParameters,
}

impl Default for KineticsParameters {
    fn default() -> Self {
        Self {
            typical_current: config::TYPICAL_CURRENT_A,
            electrode_height: config::ELECTRODE_HEIGHT_M,
            electrode_width: config::ELECTRODE_WIDTH_M,
            separator_thickness: micrometres(config::SEPARATOR_THICKNESS_UM),
            negative: ElectrodeParameters {
                thickness: micrometres(config::NEGATIVE_ELECTRODE_THICKNESS_UM),
                primary: PhaseGeometry {
                    active_material_volume_fraction: config::NEGATIVE_PRIMARY_VOLUME_FRACTION,
                    particle_radius: micrometres(config::NEGATIVE_PRIMARY_PARTICLE_RADIUS_UM),
                },
                secondary: PhaseGeometry {
                    active_material_volume_fraction: config::NEGATIVE_SECONDARY_VOLUME_FRACTION,
                    particle_radius: micrometres(config::NEGATIVE_SECONDARY_PARTICLE_RADIUS_UM),
                },
            },
            positive: ElectrodeParameters {
                thickness: micrometres(config::POSITIVE_ELECTRODE_THICKNESS_UM),
                primary: PhaseGeometry {
                    active_material_volume_fraction: config::POSITIVE_PRIMARY_VOLUME_FRACTION,
                    particle_radius: micrometres(config::POSITIVE_PRIMARY_PARTICLE_RADIUS_UM),
                },
                secondary: PhaseGeometry {
                    active_material_volume_fraction: config::POSITIVE_SECONDARY_VOLUME_FRACTION,
                    particle_radius: micrometres(config::POSITIVE_SECONDARY_PARTICLE_RADIUS_UM),
                },
            },
        }
    }
}

impl KineticsParameters {
    pub fn electrode(&self, electrode: Electrode) -> &ElectrodeParameters {
        match electrode {
            Electrode::Negative => &self.negative,
            Electrode::Positive => &self.positive,
        }
    }

    /// i_typ [A.m-2]
    pub fn typical_current_density(&self) -> f64 {
        self.typical_current / (self.electrode_height * self.electrode_width)
    }

    /// L_x [m]. A half-cell has no negative electrode to span.
    pub fn cell_thickness(&self, topology: CellTopology) -> f64 {
        let cell = self.separator_thickness + self.positive.thickness;
        match topology {
            CellTopology::TwoElectrode => self.negative.thickness + cell,
            CellTopology::HalfCell => cell,
        }
    }

    /// j_scale = i_typ / (a L_x) [A.m-2], converting a dimensionless
    /// interfacial current density of `phase` in `electrode` to A.m-2.
    pub fn interfacial_current_scale(
        &self,
        electrode: Electrode,
        phase: Phase,
        topology: CellTopology,
    ) -> f64 {
        let a = self
            .electrode(electrode)
            .phase(phase)
            .surface_area_to_volume_ratio();
        self.typical_current_density() / (a * self.cell_thickness(topology))
    }

    /// i_typ / L_x [A.m-3]
    pub fn volumetric_current_scale(&self, topology: CellTopology) -> f64 {
        self.typical_current_density() / self.cell_thickness(topology)
    }

    /// Every value must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        let cell = [
            ("Typical current [A]", self.typical_current),
            ("Electrode height [m]", self.electrode_height),
            ("Electrode width [m]", self.electrode_width),
            ("Separator thickness [m]", self.separator_thickness),
        ];
        let electrodes = NEGATIVE_NAMES
            .into_iter()
            .zip(self.negative.values())
            .chain(POSITIVE_NAMES.into_iter().zip(self.positive.values()));

        for (name, value) in cell.into_iter().chain(electrodes) {
            if !value.is_finite() || value <= 0.0 {
                return Err(KineticsError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        ((a - b) / b).abs() < 1e-12
    }

    #[test]
    fn defaults_are_valid() {
        assert!(KineticsParameters::default().validate().is_ok());
    }

    #[test]
    fn typical_current_density_uses_electrode_area() {
        let param = KineticsParameters::default();
        assert!(close(param.typical_current_density(), 5.0 / (0.065 * 1.58)));
    }

    #[test]
    fn half_cell_thickness_excludes_negative_electrode() {
        let param = KineticsParameters::default();
        let full = param.cell_thickness(CellTopology::TwoElectrode);
        let half = param.cell_thickness(CellTopology::HalfCell);
        assert!(close(full - half, param.negative.thickness));
        assert!(close(full, (85.2 + 12.0 + 75.6) * 1e-6));
    }

    #[test]
    fn interfacial_scale_matches_definition() {
        let param = KineticsParameters::default();
        let topology = CellTopology::TwoElectrode;
        let a_n = 3.0 * 0.75 / 5.86e-6;
        let expected = param.typical_current_density() / (a_n * param.cell_thickness(topology));
        let scale = param.interfacial_current_scale(Electrode::Negative, Phase::Primary, topology);
        assert!(close(scale, expected));

        // Secondary phase has its own geometry, so its scale differs
        let secondary =
            param.interfacial_current_scale(Electrode::Negative, Phase::Secondary, topology);
        assert!(!close(secondary, scale));
    }

    #[test]
    fn volumetric_scale_is_current_density_over_thickness() {
        let param = KineticsParameters::default();
        let topology = CellTopology::HalfCell;
        assert!(close(
            param.volumetric_current_scale(topology),
            param.typical_current_density() / param.cell_thickness(topology)
        ));
    }

    #[test]
    fn validate_names_the_offending_parameter() {
        let mut param = KineticsParameters::default();
        param.positive.secondary.particle_radius = f64::NAN;
        match param.validate() {
            Err(KineticsError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "Secondary: Positive particle radius [m]")
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn negative_values_are_rejected() {
        let mut param = KineticsParameters::default();
        param.separator_thickness = -1.0e-6;
        assert!(matches!(
            param.validate(),
            Err(KineticsError::InvalidParameter {
                name: "Separator thickness [m]",
                ..
            })
        ));
    }
}
