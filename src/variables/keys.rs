// variables/keys.rs
// Typed names for every variable the kinetics aggregation reads or writes

use crate::domain::{CellTopology, Electrode};
use crate::reactions::{Phase, Reaction};
use crate::units::{CURRENT_DENSITY_UNITS, VOLUMETRIC_CURRENT_UNITS};
use std::fmt;

/// Whether a per-electrode quantity is the local field or its x-average
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Averaging {
    Local,
    XAveraged,
}

/// Dimensionless, per unit area, or per unit volume
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Form {
    Dimensionless,
    Dimensional,
    PerVolume,
}

impl Form {
    fn suffix(&self) -> String {
        match self {
            Form::Dimensionless => String::new(),
            Form::Dimensional => format!(" {CURRENT_DENSITY_UNITS}"),
            Form::PerVolume => format!(" per volume {VOLUMETRIC_CURRENT_UNITS}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CurrentKind {
    Interfacial,
    Exchange,
}

impl CurrentKind {
    fn word(&self) -> &'static str {
        match self {
            CurrentKind::Interfacial => "interfacial",
            CurrentKind::Exchange => "exchange",
        }
    }
}

/// Region a summary quantity is accumulated over
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SumScope {
    WholeCell,
    Electrode(Electrode),
    XAveraged(Electrode),
}

impl SumScope {
    pub fn electrode(&self) -> Option<Electrode> {
        match self {
            SumScope::WholeCell => None,
            SumScope::Electrode(electrode) | SumScope::XAveraged(electrode) => Some(*electrode),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SumQuantity {
    /// a * s * j, the species source term seen by the electrolyte
    ElectrolyteSource,
    InterfacialCurrent,
}

/// Name of a "Sum of ..." accumulator
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SumKey {
    pub quantity: SumQuantity,
    pub scope: SumScope,
}

impl SumKey {
    pub fn new(quantity: SumQuantity, scope: SumScope) -> Self {
        Self { quantity, scope }
    }

    /// Every accumulator a cell of `topology` publishes. A half-cell has no
    /// negative-electrode accumulators.
    pub fn for_topology(topology: CellTopology) -> Vec<SumKey> {
        let mut keys = Vec::with_capacity(10);
        for quantity in [SumQuantity::ElectrolyteSource, SumQuantity::InterfacialCurrent] {
            keys.push(SumKey::new(quantity, SumScope::WholeCell));
            for &electrode in topology.electrodes() {
                keys.push(SumKey::new(quantity, SumScope::Electrode(electrode)));
                keys.push(SumKey::new(quantity, SumScope::XAveraged(electrode)));
            }
        }
        keys
    }
}

impl fmt::Display for SumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantity = match self.quantity {
            SumQuantity::ElectrolyteSource => "electrolyte reaction source terms",
            SumQuantity::InterfacialCurrent => "interfacial current densities",
        };
        match self.scope {
            SumScope::WholeCell => write!(f, "Sum of {quantity}"),
            SumScope::Electrode(electrode) => write!(f, "Sum of {} {quantity}", electrode.name()),
            SumScope::XAveraged(electrode) => {
                write!(f, "Sum of x-averaged {} {quantity}", electrode.name())
            }
        }
    }
}

/// Typed variable name. `Display` renders the exact namespace key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VariableKey {
    /// Published upstream by each reaction's interface submodel
    InterfacialCurrentDensity {
        electrode: Electrode,
        reaction: Reaction,
        averaging: Averaging,
    },
    /// Published upstream; absent for side reactions
    ExchangeCurrentDensity {
        electrode: Electrode,
        reaction: Reaction,
    },
    /// Published upstream by the particle geometry submodel
    SurfaceAreaToVolumeRatio {
        electrode: Electrode,
        phase: Phase,
    },
    /// Whole-cell current density of one reaction, published here
    CellCurrentDensity {
        kind: CurrentKind,
        reaction: Reaction,
        form: Form,
    },
    Sum(SumKey),
}

impl VariableKey {
    pub fn interfacial(electrode: Electrode, reaction: Reaction) -> Self {
        VariableKey::InterfacialCurrentDensity {
            electrode,
            reaction,
            averaging: Averaging::Local,
        }
    }

    pub fn x_averaged_interfacial(electrode: Electrode, reaction: Reaction) -> Self {
        VariableKey::InterfacialCurrentDensity {
            electrode,
            reaction,
            averaging: Averaging::XAveraged,
        }
    }

    pub fn exchange(electrode: Electrode, reaction: Reaction) -> Self {
        VariableKey::ExchangeCurrentDensity {
            electrode,
            reaction,
        }
    }

    pub fn surface_area_to_volume(electrode: Electrode, phase: Phase) -> Self {
        VariableKey::SurfaceAreaToVolumeRatio { electrode, phase }
    }

    pub fn cell(kind: CurrentKind, reaction: Reaction, form: Form) -> Self {
        VariableKey::CellCurrentDensity {
            kind,
            reaction,
            form,
        }
    }
}

impl From<SumKey> for VariableKey {
    fn from(key: SumKey) -> Self {
        VariableKey::Sum(key)
    }
}

/// Upper-case the first character only, so "SEI " stays "SEI ".
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for VariableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableKey::InterfacialCurrentDensity {
                electrode,
                reaction,
                averaging: Averaging::Local,
            } => write!(
                f,
                "{} {}interfacial current density",
                electrode.title(),
                reaction.prefix()
            ),
            VariableKey::InterfacialCurrentDensity {
                electrode,
                reaction,
                averaging: Averaging::XAveraged,
            } => write!(
                f,
                "X-averaged {} {}interfacial current density",
                electrode.name(),
                reaction.prefix()
            ),
            VariableKey::ExchangeCurrentDensity {
                electrode,
                reaction,
            } => write!(
                f,
                "{} {}exchange current density",
                electrode.title(),
                reaction.prefix()
            ),
            VariableKey::SurfaceAreaToVolumeRatio { electrode, phase } => write!(
                f,
                "{} {}surface area to volume ratio",
                electrode.title(),
                phase.prefix()
            ),
            VariableKey::CellCurrentDensity {
                kind,
                reaction,
                form,
            } => {
                let stem = capitalize_first(&format!("{}{} ", reaction.prefix(), kind.word()));
                write!(f, "{stem}current density{}", form.suffix())
            }
            VariableKey::Sum(key) => write!(f, "{key}"),
        }
    }
}
