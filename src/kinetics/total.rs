// kinetics/total.rs
// Sums interfacial currents from every reaction/phase channel over the whole cell

use super::contribution::ReactionContribution;
use super::sums::Accumulators;
use crate::chemistry::Chemistry;
use crate::config::ModelOptions;
use crate::domain::CellTopology;
use crate::error::Result;
use crate::expression::Expr;
use crate::parameters::KineticsParameters;
use crate::profile_scope;
use crate::reactions::{reaction_phases, ReactionPhases};
use crate::variables::{CurrentKind, Form, VariableKey, Variables};
use tracing::debug;

/// Whole-cell kinetics aggregation for one chemistry and set of options.
///
/// Reads the per-electrode, per-reaction current densities that interface
/// submodels have already published, and publishes whole-cell per-reaction
/// fields together with the `Sum of ...` totals that the electrolyte and
/// charge-conservation submodels consume.
#[derive(Clone, Debug)]
pub struct TotalKinetics {
    chemistry: Chemistry,
    options: ModelOptions,
    param: KineticsParameters,
}

impl TotalKinetics {
    pub fn new(chemistry: Chemistry, options: ModelOptions, param: KineticsParameters) -> Self {
        Self {
            chemistry,
            options,
            param,
        }
    }

    pub fn chemistry(&self) -> Chemistry {
        self.chemistry
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn parameters(&self) -> &KineticsParameters {
        &self.param
    }

    pub fn topology(&self) -> CellTopology {
        self.options.topology()
    }

    pub fn reaction_phases(&self) -> Result<ReactionPhases> {
        reaction_phases(self.chemistry, &self.options)
    }

    /// Aggregate in place. On error `variables` is left exactly as it was;
    /// on success every per-reaction output and every sum is visible at once.
    pub fn aggregate(&self, variables: &mut Variables) -> Result<()> {
        profile_scope!("total_kinetics");
        let before = variables.len();
        let staged = self.aggregated(variables)?;
        *variables = staged;
        debug!(
            chemistry = %self.chemistry,
            added = variables.len() - before,
            total = variables.len(),
            "committed whole-cell kinetics"
        );
        Ok(())
    }

    /// Aggregated copy of `variables`. The input is never modified.
    pub fn aggregated(&self, variables: &Variables) -> Result<Variables> {
        let topology = self.topology();
        let channels = self.reaction_phases()?;
        let mut staged = variables.clone();
        let mut sums = Accumulators::new(topology);

        for (reaction, phase) in channels.iter() {
            profile_scope!("total_kinetics_reaction");
            let coupling = self.chemistry.coupling_coefficients(reaction)?;
            let contribution = ReactionContribution::gather(
                &staged, topology, reaction, phase, &coupling, &self.param,
            )?;
            self.publish_reaction(&mut staged, &contribution)?;
            sums.add_contribution(&contribution)?;
            debug!(
                reaction = ?reaction,
                phase = ?phase,
                exchange = contribution.exchange.is_some(),
                "added reaction contribution"
            );
        }

        sums.publish_into(&mut staged);
        Ok(staged)
    }

    /// Whole-cell current density of one channel in its three forms, and the
    /// same for exchange current density when the reaction has one.
    fn publish_reaction(
        &self,
        staged: &mut Variables,
        contribution: &ReactionContribution,
    ) -> Result<()> {
        let reaction = contribution.reaction;
        let per_volume = Expr::scalar(self.param.volumetric_current_scale(contribution.topology));

        let mut outputs = vec![(
            CurrentKind::Interfacial,
            &contribution.current,
            &contribution.current_dimensional,
        )];
        if let Some((j0, j0_dimensional)) = &contribution.exchange {
            outputs.push((CurrentKind::Exchange, j0, j0_dimensional));
        }

        for (kind, field, dimensional) in outputs {
            staged.publish(
                &VariableKey::cell(kind, reaction, Form::Dimensionless),
                field.clone(),
            );
            staged.publish(
                &VariableKey::cell(kind, reaction, Form::Dimensional),
                dimensional.clone(),
            );
            staged.publish(
                &VariableKey::cell(kind, reaction, Form::PerVolume),
                per_volume.try_mul(field)?,
            );
        }
        Ok(())
    }
}
