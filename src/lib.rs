pub mod chemistry;
pub mod config;
pub mod domain;
pub mod error;
pub mod expression;
pub mod kinetics;
pub mod parameters;
pub mod profiler;
pub mod reactions;
pub mod units;
pub mod variables;

pub use chemistry::Chemistry;
pub use config::{KineticsConfig, ModelOptions};
pub use domain::{CellTopology, Domain, Electrode};
pub use error::{KineticsError, Result};
pub use expression::Expr;
pub use kinetics::TotalKinetics;
pub use parameters::KineticsParameters;
pub use reactions::{reaction_phases, Phase, Reaction, ReactionPhases};
pub use variables::{VariableKey, Variables};

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
