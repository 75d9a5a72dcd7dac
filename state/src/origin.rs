//! The local tangent-plane origin shared by the position, speed and
//! acceleration groups.
//!
//! The origin exists independently in both numeric domains; each must be
//! explicitly established before local-frame derivations in that domain
//! succeed. Re-anchoring does not touch any group's validity set: the
//! estimator anchors once before it starts writing NED-relative data.

use crate::error::{Domain, StateError, StateResult};
use geomath::{LtpDef, LtpDefI};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalOrigin {
    int: Option<LtpDefI>,
    float: Option<LtpDef>,
}

impl LocalOrigin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_int(&mut self, def: LtpDefI) {
        self.int = Some(def);
    }

    pub fn set_float(&mut self, def: LtpDef) {
        self.float = Some(def);
    }

    /// The integer-domain definition, or the precondition failure that the
    /// caller never anchored it.
    pub fn int(&self) -> StateResult<&LtpDefI> {
        self.int
            .as_ref()
            .ok_or(StateError::OriginUninitialized(Domain::Int))
    }

    pub fn float(&self) -> StateResult<&LtpDef> {
        self.float
            .as_ref()
            .ok_or(StateError::OriginUninitialized(Domain::Float))
    }

    pub fn is_initialized(&self, domain: Domain) -> bool {
        match domain {
            Domain::Int => self.int.is_some(),
            Domain::Float => self.float.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomath::LlaCoor;

    #[test]
    fn uninitialized_origin_is_a_precondition_failure() {
        let origin = LocalOrigin::new();
        assert_eq!(
            origin.float().unwrap_err(),
            StateError::OriginUninitialized(Domain::Float)
        );
        assert_eq!(
            origin.int().unwrap_err(),
            StateError::OriginUninitialized(Domain::Int)
        );
    }

    #[test]
    fn domains_initialize_independently() {
        let mut origin = LocalOrigin::new();
        origin.set_float(LtpDef::from_lla(LlaCoor::new(0.9, 0.2, 100.0)));
        assert!(origin.is_initialized(Domain::Float));
        assert!(!origin.is_initialized(Domain::Int));
        assert!(origin.float().is_ok());
        assert!(origin.int().is_err());
    }
}
