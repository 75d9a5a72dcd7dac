use std::fmt;
use thiserror::Error;

/// Numeric domain of a representation or tangent-plane origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Binary fixed point (`i32` slots).
    Int,
    /// Floating point (`f64` slots).
    Float,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Int => write!(f, "fixed-point"),
            Domain::Float => write!(f, "floating-point"),
        }
    }
}

/// Errors surfaced by the state getters.
///
/// Both variants are caller sequencing errors: the estimator layer must
/// establish the tangent-plane origin before any local-frame query crosses
/// frames, and must write each group once before the first read. Neither is
/// ever silently defaulted; a made-up zero position or attitude is a flight
/// hazard.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// A derivation needed the local tangent-plane origin of the given
    /// numeric domain before it was initialized.
    #[error("local tangent-plane origin not initialized for the {0} domain")]
    OriginUninitialized(Domain),

    /// The group has never received an authoritative write, so no
    /// derivation path exists.
    #[error("no valid representation in the {0} group")]
    NoValidRepresentation(&'static str),
}

pub type StateResult<T> = Result<T, StateError>;
