// kinetics/mod.rs
// Whole-cell kinetics aggregation
//
// This module handles:
// - Gathering each reaction/phase channel's fields from the namespace
// - Degenerate area substitution for structurally zero currents
// - Zero-initialised accumulators for every "Sum of ..." quantity
// - Staging all writes and committing them in one step

pub mod contribution;
pub mod sums;
pub mod total;

pub use contribution::{ElectrodeTerms, ReactionContribution};
pub use sums::Accumulators;
pub use total::TotalKinetics;
