// domain/mod.rs
// Spatial domains of a cell and the topology that fixes which of them exist
//
// This module handles:
// - The through-cell domains and their canonical spatial order
// - Electrode roles and the name fragments used in variable keys
// - Lifting domain-free values onto a domain (broadcast)
// - Joining per-domain fields into whole-cell fields (concatenate)

pub mod broadcast;
pub mod concatenate;

pub use broadcast::*;
pub use concatenate::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Through-cell spatial region. Declaration order is the spatial order,
/// so the derived `Ord` is what concatenation validates against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Domain {
    #[serde(rename = "negative electrode")]
    NegativeElectrode,
    #[serde(rename = "separator")]
    Separator,
    #[serde(rename = "positive electrode")]
    PositiveElectrode,
}

impl Domain {
    pub fn name(&self) -> &'static str {
        match self {
            Domain::NegativeElectrode => "negative electrode",
            Domain::Separator => "separator",
            Domain::PositiveElectrode => "positive electrode",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role of an electrode in the cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Electrode {
    Negative,
    Positive,
}

impl Electrode {
    pub fn domain(&self) -> Domain {
        match self {
            Electrode::Negative => Domain::NegativeElectrode,
            Electrode::Positive => Domain::PositiveElectrode,
        }
    }

    /// Lower-case name as it appears mid-sentence ("x-averaged negative electrode")
    pub fn name(&self) -> &'static str {
        self.domain().name()
    }

    /// Name as it appears at the start of a variable key
    pub fn title(&self) -> &'static str {
        match self {
            Electrode::Negative => "Negative electrode",
            Electrode::Positive => "Positive electrode",
        }
    }
}

const TWO_ELECTRODE_DOMAINS: &[Domain] = &[
    Domain::NegativeElectrode,
    Domain::Separator,
    Domain::PositiveElectrode,
];
const HALF_CELL_DOMAINS: &[Domain] = &[Domain::Separator, Domain::PositiveElectrode];

const TWO_ELECTRODE_ELECTRODES: &[Electrode] = &[Electrode::Negative, Electrode::Positive];
const HALF_CELL_ELECTRODES: &[Electrode] = &[Electrode::Positive];

/// Cell topology. A half-cell has no negative electrode domain at all
/// (the counter electrode is a lithium foil outside the model).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellTopology {
    TwoElectrode,
    HalfCell,
}

impl CellTopology {
    /// Whole-cell domains in spatial order
    pub fn domains(&self) -> &'static [Domain] {
        match self {
            CellTopology::TwoElectrode => TWO_ELECTRODE_DOMAINS,
            CellTopology::HalfCell => HALF_CELL_DOMAINS,
        }
    }

    pub fn electrodes(&self) -> &'static [Electrode] {
        match self {
            CellTopology::TwoElectrode => TWO_ELECTRODE_ELECTRODES,
            CellTopology::HalfCell => HALF_CELL_ELECTRODES,
        }
    }

    pub fn is_half_cell(&self) -> bool {
        matches!(self, CellTopology::HalfCell)
    }
}
