// kinetics/contribution.rs
// One reaction/phase channel: its per-electrode terms and whole-cell fields

use crate::chemistry::CouplingCoefficients;
use crate::domain::{broadcast, broadcast_zero, concatenate, CellTopology, Domain, Electrode};
use crate::error::{KineticsError, Result};
use crate::expression::Expr;
use crate::parameters::KineticsParameters;
use crate::reactions::{Phase, Reaction};
use crate::variables::{VariableKey, Variables};
use tracing::trace;

/// Terms one electrode contributes for a single reaction/phase channel
#[derive(Clone, Debug)]
pub struct ElectrodeTerms {
    pub electrode: Electrode,
    /// Local interfacial current density j
    pub current: Expr,
    /// x-averaged interfacial current density
    pub x_averaged_current: Expr,
    /// Present only for reactions with an exchange current
    pub exchange_current: Option<Expr>,
    /// Effective surface area to volume ratio a. Equal to `current` itself
    /// when the current is structurally zero.
    pub area: Expr,
    /// Coupling coefficient s, domain-free
    pub coupling: Expr,
    /// j_scale [A.m-2]
    pub current_scale: f64,
}

impl ElectrodeTerms {
    fn gather(
        variables: &Variables,
        topology: CellTopology,
        electrode: Electrode,
        reaction: Reaction,
        phase: Phase,
        coupling: &CouplingCoefficients,
        param: &KineticsParameters,
    ) -> Result<Self> {
        let current = variables
            .require(&VariableKey::interfacial(electrode, reaction))?
            .clone();
        let x_averaged_current = variables
            .require(&VariableKey::x_averaged_interfacial(electrode, reaction))?
            .clone();
        let exchange_current = if reaction.has_exchange_current() {
            Some(
                variables
                    .require(&VariableKey::exchange(electrode, reaction))?
                    .clone(),
            )
        } else {
            None
        };
        let area = effective_area(variables, electrode, phase, &current)?;

        Ok(Self {
            electrode,
            current: current.with_print_name(format!("j_{}", short_name(electrode))),
            x_averaged_current,
            exchange_current,
            area,
            coupling: coupling.electrode(electrode).clone(),
            current_scale: param.interfacial_current_scale(electrode, phase, topology),
        })
    }

    /// a * s * j on this electrode's domain
    pub fn electrolyte_source(&self) -> Result<Expr> {
        self.area.try_mul(&self.coupling)?.try_mul(&self.current)
    }
}

fn short_name(electrode: Electrode) -> &'static str {
    match electrode {
        Electrode::Negative => "n",
        Electrode::Positive => "p",
    }
}

/// Area term for one electrode. A structurally zero current reuses itself
/// as the area so no area variable is needed for an absent reaction.
fn effective_area(
    variables: &Variables,
    electrode: Electrode,
    phase: Phase,
    current: &Expr,
) -> Result<Expr> {
    if current.x_average().id() == Expr::zero().id() {
        trace!(
            electrode = electrode.name(),
            "structurally zero current, reusing it as the area term"
        );
        return Ok(current.clone());
    }
    let area = variables.require(&VariableKey::surface_area_to_volume(electrode, phase))?;
    if area.is_domain_free() {
        broadcast(area.clone(), electrode.domain())
    } else {
        Ok(area.clone())
    }
}

/// Everything one reaction/phase channel adds to the cell, gathered from
/// the namespace and assembled into whole-cell fields.
#[derive(Clone, Debug)]
pub struct ReactionContribution {
    pub reaction: Reaction,
    pub phase: Phase,
    pub topology: CellTopology,
    /// In spatial order: negative (two-electrode only) then positive
    pub electrodes: Vec<ElectrodeTerms>,
    /// Whole-cell interfacial current density J
    pub current: Expr,
    pub current_dimensional: Expr,
    /// Whole-cell exchange current density and its dimensional form
    pub exchange: Option<(Expr, Expr)>,
    /// Whole-cell area a
    pub area: Expr,
    /// Whole-cell coupling s
    pub coupling: Expr,
}

impl ReactionContribution {
    pub fn gather(
        variables: &Variables,
        topology: CellTopology,
        reaction: Reaction,
        phase: Phase,
        coupling: &CouplingCoefficients,
        param: &KineticsParameters,
    ) -> Result<Self> {
        let electrodes = topology
            .electrodes()
            .iter()
            .map(|&electrode| {
                ElectrodeTerms::gather(
                    variables, topology, electrode, reaction, phase, coupling, param,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let current =
            whole_cell_field(topology, &electrodes, |terms| Ok(terms.current.clone()))?;
        let current_dimensional = whole_cell_field(topology, &electrodes, |terms| {
            Expr::scalar(terms.current_scale).try_mul(&terms.current)
        })?;

        let exchange = if reaction.has_exchange_current() {
            let exchange_of = |terms: &ElectrodeTerms| match &terms.exchange_current {
                Some(j0) => Ok(j0.clone()),
                None => Err(KineticsError::MissingVariable {
                    name: VariableKey::exchange(terms.electrode, reaction).to_string(),
                }),
            };
            let j0 = whole_cell_field(topology, &electrodes, |terms| exchange_of(terms))?;
            let j0_dimensional = whole_cell_field(topology, &electrodes, |terms| {
                Expr::scalar(terms.current_scale).try_mul(&exchange_of(terms)?)
            })?;
            Some((j0, j0_dimensional))
        } else {
            None
        };

        let area = whole_cell_field(topology, &electrodes, |terms| Ok(terms.area.clone()))?;
        let coupling = whole_cell_field(topology, &electrodes, |terms| {
            broadcast(terms.coupling.clone(), terms.electrode.domain())
        })?;

        Ok(Self {
            reaction,
            phase,
            topology,
            electrodes,
            current,
            current_dimensional,
            exchange,
            area,
            coupling,
        })
    }

    pub fn electrode(&self, electrode: Electrode) -> Option<&ElectrodeTerms> {
        self.electrodes
            .iter()
            .find(|terms| terms.electrode == electrode)
    }

    /// a * s * J over the whole cell
    pub fn electrolyte_source(&self) -> Result<Expr> {
        let area = self.area.with_print_name("a");
        let current = self.current.with_print_name("J");
        area.try_mul(&self.coupling)?.try_mul(&current)
    }
}

/// Join per-electrode fields with a zero separator in spatial order.
fn whole_cell_field<F>(
    topology: CellTopology,
    electrodes: &[ElectrodeTerms],
    field: F,
) -> Result<Expr>
where
    F: Fn(&ElectrodeTerms) -> Result<Expr>,
{
    let mut fields = Vec::with_capacity(3);
    for terms in electrodes {
        if terms.electrode == Electrode::Positive {
            fields.push(broadcast_zero(Domain::Separator));
        }
        fields.push(field(terms)?);
    }
    concatenate(topology, &fields)
}
