//! Reference parameters of the projection.
//!
//! Every rate, ratio, schedule and rule table used by the projector lives
//! in [`ReformConfig`]. `ReformConfig::default()` carries the legislated
//! reference values (EC 132/2023, LC 214/2025); a different schedule can
//! be loaded from JSON/YAML without touching code. Missing fields fall
//! back to the reference values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::classification::activity::{reference_activity_rules, ActivityRule, CreditRatios};
use crate::classification::sector::{general_sector, reference_sector_rules, SectorBenefit, SectorRule};
use crate::error::ReformaError;
use crate::transition::timeline::{reference_timeline, validate_timeline, TransitionPhase};
use crate::types::Rate;
use crate::ReformaResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReformConfig {
    /// CBS reference rate (federal)
    pub cbs_reference_rate: Rate,
    /// IBS reference rate (state + municipal)
    pub ibs_reference_rate: Rate,
    /// CBS charged during the testing year
    pub test_cbs_rate: Rate,
    /// IBS charged during the testing year
    pub test_ibs_rate: Rate,

    /// Cumulative PIS (Lucro Presumido)
    pub presumido_pis_rate: Rate,
    /// Cumulative COFINS (Lucro Presumido)
    pub presumido_cofins_rate: Rate,
    /// Non-cumulative PIS (Lucro Real)
    pub real_pis_rate: Rate,
    /// Non-cumulative COFINS (Lucro Real)
    pub real_cofins_rate: Rate,
    /// Share of revenue assumed creditable under Lucro Real PIS/COFINS
    pub real_credit_assumption: Rate,
    /// Effective ICMS incidence relative to the nominal state rate
    pub icms_effective_incidence: Rate,
    /// Presumption percentage at or above which revenue is treated as services
    pub service_presumption_threshold: Rate,
    /// ISS rate assumed when the caller supplies none
    pub default_iss_rate: Rate,

    pub credit_ratios: CreditRatios,

    /// Final-year delta above which the projection is flagged as a danger
    pub danger_delta_threshold: Rate,
    /// Final-year delta below which the projection is flagged as a saving
    pub success_delta_threshold: Rate,

    pub timeline: Vec<TransitionPhase>,
    pub sector_rules: Vec<SectorRule>,
    pub default_sector: SectorBenefit,
    pub activity_rules: Vec<ActivityRule>,
}

impl Default for ReformConfig {
    fn default() -> Self {
        ReformConfig {
            cbs_reference_rate: dec!(0.088),
            ibs_reference_rate: dec!(0.177),
            test_cbs_rate: dec!(0.009),
            test_ibs_rate: dec!(0.001),
            presumido_pis_rate: dec!(0.0065),
            presumido_cofins_rate: dec!(0.03),
            real_pis_rate: dec!(0.0165),
            real_cofins_rate: dec!(0.076),
            real_credit_assumption: dec!(0.30),
            icms_effective_incidence: dec!(0.30),
            service_presumption_threshold: dec!(0.32),
            default_iss_rate: dec!(0.05),
            credit_ratios: CreditRatios::default(),
            danger_delta_threshold: dec!(0.10),
            success_delta_threshold: dec!(-0.05),
            timeline: reference_timeline(),
            sector_rules: reference_sector_rules(),
            default_sector: general_sector(),
            activity_rules: reference_activity_rules(),
        }
    }
}

impl ReformConfig {
    /// Parse a configuration from JSON; absent fields keep their reference values.
    pub fn from_json(json: &str) -> ReformaResult<Self> {
        let config: ReformConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReformaResult<()> {
        let unit_rates = [
            ("cbs_reference_rate", self.cbs_reference_rate),
            ("ibs_reference_rate", self.ibs_reference_rate),
            ("test_cbs_rate", self.test_cbs_rate),
            ("test_ibs_rate", self.test_ibs_rate),
            ("presumido_pis_rate", self.presumido_pis_rate),
            ("presumido_cofins_rate", self.presumido_cofins_rate),
            ("real_pis_rate", self.real_pis_rate),
            ("real_cofins_rate", self.real_cofins_rate),
            ("real_credit_assumption", self.real_credit_assumption),
            ("icms_effective_incidence", self.icms_effective_incidence),
            ("service_presumption_threshold", self.service_presumption_threshold),
            ("default_iss_rate", self.default_iss_rate),
            ("credit_ratios.commerce", self.credit_ratios.commerce),
            ("credit_ratios.industry", self.credit_ratios.industry),
            ("credit_ratios.service", self.credit_ratios.service),
            ("credit_ratios.agriculture", self.credit_ratios.agriculture),
            ("default_sector.reduction_factor", self.default_sector.reduction_factor),
        ];
        for (name, value) in unit_rates {
            check_unit(name, value)?;
        }

        for rule in &self.sector_rules {
            check_unit(
                &format!("sector_rules[{}].reduction_factor", rule.key),
                rule.benefit.reduction_factor,
            )?;
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ReformaError::InvalidConfig(format!(
                    "sector rule '{}' has no keywords",
                    rule.key
                )));
            }
        }

        if self.success_delta_threshold > self.danger_delta_threshold {
            return Err(ReformaError::InvalidConfig(format!(
                "success_delta_threshold ({}) exceeds danger_delta_threshold ({})",
                self.success_delta_threshold, self.danger_delta_threshold
            )));
        }

        validate_timeline(&self.timeline)
    }
}

fn check_unit(name: &str, value: Decimal) -> ReformaResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ReformaError::InvalidConfig(format!(
            "{name} = {value} is outside [0, 1]"
        )));
    }
    Ok(())
}
