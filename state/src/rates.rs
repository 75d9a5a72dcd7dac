//! Angular rate group: body rates in the two numeric domains.
//!
//! The smallest group, one representation per domain, so the only
//! derivation is the domain cast.

use crate::error::StateError::NoValidRepresentation;
use crate::error::StateResult;
use crate::status::{Repr, ReprSet};
use geomath::algebra::BodyRates;
use geomath::algebra_int::{rates_f_of_i, rates_i_of_f, Int32Rates};

const GROUP: &str = "angular rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRepr {
    RatesI,
    RatesF,
}

impl Repr for RateRepr {
    fn bit(self) -> u8 {
        match self {
            RateRepr::RatesI => 0,
            RateRepr::RatesF => 1,
        }
    }
}

/// rad/s; the integer slot is Q19.12.
#[derive(Debug, Clone, Default)]
pub struct RateState {
    valid: ReprSet<RateRepr>,
    rates_i: Int32Rates,
    rates_f: BodyRates,
    saturations: u32,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, r: RateRepr) -> bool {
        self.valid.contains(r)
    }

    pub fn saturation_count(&self) -> u32 {
        self.saturations
    }

    pub fn set_rates_i(&mut self, rates: Int32Rates) {
        self.rates_i = rates;
        self.valid = ReprSet::only(RateRepr::RatesI);
    }

    pub fn set_rates_f(&mut self, rates: BodyRates) {
        self.rates_f = rates;
        self.valid = ReprSet::only(RateRepr::RatesF);
    }

    pub fn rates_i(&mut self) -> StateResult<Int32Rates> {
        if !self.valid.contains(RateRepr::RatesI) {
            if !self.valid.contains(RateRepr::RatesF) {
                return Err(NoValidRepresentation(GROUP));
            }
            self.rates_i = crate::accept(
                rates_i_of_f(&self.rates_f),
                &mut self.saturations,
                GROUP,
            );
            self.valid.insert(RateRepr::RatesI);
        }
        Ok(self.rates_i)
    }

    pub fn rates_f(&mut self) -> StateResult<BodyRates> {
        if !self.valid.contains(RateRepr::RatesF) {
            if !self.valid.contains(RateRepr::RatesI) {
                return Err(NoValidRepresentation(GROUP));
            }
            self.rates_f = rates_f_of_i(&self.rates_i);
            self.valid.insert(RateRepr::RatesF);
        }
        Ok(self.rates_f)
    }
}
