// kinetics/sums.rs
// Zero-initialised "Sum of ..." accumulators, owned by one aggregation pass

use super::contribution::ReactionContribution;
use crate::domain::CellTopology;
use crate::error::{KineticsError, Result};
use crate::expression::Expr;
use crate::variables::{SumKey, SumQuantity, SumScope, VariableKey, Variables};
use std::collections::BTreeMap;

/// Running sums for one pass. Never published until every reaction/phase
/// channel has been added.
#[derive(Clone, Debug)]
pub struct Accumulators {
    sums: BTreeMap<SumKey, Expr>,
}

impl Accumulators {
    /// Every accumulator for `topology`, starting at the additive identity
    pub fn new(topology: CellTopology) -> Self {
        Self {
            sums: SumKey::for_topology(topology)
                .into_iter()
                .map(|key| (key, Expr::zero()))
                .collect(),
        }
    }

    pub fn get(&self, key: &SumKey) -> Option<&Expr> {
        self.sums.get(key)
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }

    /// Only accumulators listed for the topology exist; anything else is an error.
    fn add(&mut self, quantity: SumQuantity, scope: SumScope, term: &Expr) -> Result<()> {
        let key = SumKey::new(quantity, scope);
        let sum = self
            .sums
            .get_mut(&key)
            .ok_or_else(|| KineticsError::UnexpectedAccumulator {
                name: key.to_string(),
            })?;
        *sum = sum.try_add(term)?;
        Ok(())
    }

    /// Fold one channel into every applicable accumulator.
    pub fn add_contribution(&mut self, contribution: &ReactionContribution) -> Result<()> {
        use crate::variables::SumQuantity::{ElectrolyteSource, InterfacialCurrent};

        let whole_cell = contribution.current.with_print_name("J");
        self.add(
            ElectrolyteSource,
            SumScope::WholeCell,
            &contribution.electrolyte_source()?,
        )?;
        self.add(InterfacialCurrent, SumScope::WholeCell, &whole_cell)?;

        for terms in &contribution.electrodes {
            let source = terms.electrolyte_source()?;
            let electrode = terms.electrode;
            self.add(ElectrolyteSource, SumScope::Electrode(electrode), &source)?;
            self.add(
                ElectrolyteSource,
                SumScope::XAveraged(electrode),
                &source.x_average(),
            )?;
            self.add(
                InterfacialCurrent,
                SumScope::Electrode(electrode),
                &terms.current,
            )?;
            self.add(
                InterfacialCurrent,
                SumScope::XAveraged(electrode),
                &terms.x_averaged_current,
            )?;
        }
        Ok(())
    }

    /// Write every sum into `variables`, consuming the accumulators.
    pub fn publish_into(self, variables: &mut Variables) {
        for (key, sum) in self.sums {
            variables.publish(&VariableKey::Sum(key), sum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Electrode;

    #[test]
    fn accumulators_start_at_zero_for_the_topology() {
        let half = Accumulators::new(CellTopology::HalfCell);
        assert_eq!(half.len(), 6);
        let full = Accumulators::new(CellTopology::TwoElectrode);
        assert_eq!(full.len(), 10);
        for key in SumKey::for_topology(CellTopology::TwoElectrode) {
            assert_eq!(full.get(&key), Some(&Expr::zero()));
        }
    }

    #[test]
    fn adding_to_an_unlisted_accumulator_fails() {
        let mut half = Accumulators::new(CellTopology::HalfCell);
        let term = Expr::variable("j_n", crate::domain::Domain::NegativeElectrode);
        let err = half
            .add(
                SumQuantity::InterfacialCurrent,
                SumScope::Electrode(Electrode::Negative),
                &term,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            KineticsError::UnexpectedAccumulator { ref name }
                if name == "Sum of negative electrode interfacial current densities"
        ));
        assert_eq!(half.len(), 6);

        let positive = Expr::variable("j_p", crate::domain::Domain::PositiveElectrode);
        half.add(
            SumQuantity::InterfacialCurrent,
            SumScope::Electrode(Electrode::Positive),
            &positive,
        )
        .unwrap();
        let key = SumKey::new(
            SumQuantity::InterfacialCurrent,
            SumScope::Electrode(Electrode::Positive),
        );
        assert_eq!(half.get(&key), Some(&positive));
    }

    #[test]
    fn publishing_writes_every_sum() {
        let mut variables = Variables::new();
        Accumulators::new(CellTopology::HalfCell).publish_into(&mut variables);
        assert_eq!(variables.len(), 6);
        assert_eq!(
            variables.get("Sum of electrolyte reaction source terms"),
            Some(&Expr::zero())
        );
    }
}
