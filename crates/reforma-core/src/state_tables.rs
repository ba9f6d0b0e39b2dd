//! Modal internal ICMS rates by federative unit (2025 reference values).
//!
//! Read-only lookup table standing in for the per-state rate tables the
//! projector consumes through [`IcmsRateSource`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::simulation::IcmsRateSource;
use crate::types::Rate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRateTable {
    rates: BTreeMap<String, Rate>,
}

const REFERENCE_RATES: [(&str, Decimal); 27] = [
    ("AC", dec!(0.19)),
    ("AL", dec!(0.19)),
    ("AM", dec!(0.20)),
    ("AP", dec!(0.18)),
    ("BA", dec!(0.205)),
    ("CE", dec!(0.20)),
    ("DF", dec!(0.20)),
    ("ES", dec!(0.17)),
    ("GO", dec!(0.19)),
    ("MA", dec!(0.23)),
    ("MG", dec!(0.18)),
    ("MS", dec!(0.17)),
    ("MT", dec!(0.17)),
    ("PA", dec!(0.19)),
    ("PB", dec!(0.20)),
    ("PE", dec!(0.205)),
    ("PI", dec!(0.225)),
    ("PR", dec!(0.195)),
    ("RJ", dec!(0.22)),
    ("RN", dec!(0.20)),
    ("RO", dec!(0.195)),
    ("RR", dec!(0.20)),
    ("RS", dec!(0.17)),
    ("SC", dec!(0.17)),
    ("SE", dec!(0.20)),
    ("SP", dec!(0.18)),
    ("TO", dec!(0.20)),
];

impl StateRateTable {
    /// The 27 federative units at their modal internal rates.
    pub fn reference() -> Self {
        Self::from_rates(REFERENCE_RATES.iter().map(|(uf, r)| (uf.to_string(), *r)))
    }

    pub fn from_rates(rates: impl IntoIterator<Item = (String, Rate)>) -> Self {
        StateRateTable {
            rates: rates
                .into_iter()
                .map(|(uf, r)| (uf.trim().to_uppercase(), r))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rate)> {
        self.rates.iter().map(|(uf, r)| (uf.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for StateRateTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl IcmsRateSource for StateRateTable {
    fn icms_rate(&self, state_code: &str) -> Option<Rate> {
        self.rates.get(&state_code.trim().to_uppercase()).copied()
    }
}
