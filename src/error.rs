// error.rs
// Error taxonomy for expression assembly and kinetics aggregation

use crate::domain::Domain;
use thiserror::Error as ThisError;

pub type Result<T, E = KineticsError> = std::result::Result<T, E>;

/// Every failure in this crate is a configuration or assembly bug, never a
/// transient condition, so nothing here is retried.
#[derive(Debug, ThisError)]
pub enum KineticsError {
    /// Chemistry tag unknown, or known but without an implementation.
    #[error("unsupported chemistry '{chemistry}'")]
    UnsupportedChemistry { chemistry: String },

    /// A key that an upstream submodel should have published is absent.
    #[error("variable '{name}' is missing from the namespace")]
    MissingVariable { name: String },

    #[error("concatenation domains are out of spatial order: {found:?}")]
    DomainOrder { found: Vec<Domain> },

    #[error("concatenation domains {found:?} do not tile the cell {expected:?}")]
    DomainGap {
        expected: Vec<Domain>,
        found: Vec<Domain>,
    },

    #[error("cannot combine expressions on {left:?} and {right:?}")]
    DomainMismatch {
        left: Vec<Domain>,
        right: Vec<Domain>,
    },

    #[error("broadcast source already lives on {domains:?}")]
    NotDomainIndependent { domains: Vec<Domain> },

    #[error("no value bound for symbol '{name}'")]
    UnboundSymbol { name: String },

    #[error("field spanning {domains:?} has no single value")]
    NonUniformField { domains: Vec<Domain> },

    #[error("unknown model option '{name}'")]
    UnknownOption { name: String },

    #[error("accumulator '{name}' is not published for this cell topology")]
    UnexpectedAccumulator { name: String },

    #[error("invalid value '{value}' for model option '{name}'")]
    InvalidOption { name: String, value: String },

    #[error("parameter '{name}' must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
