use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::baseline::{compute_baseline_for_activity, LiabilityBreakdown};
use super::profile::FiscalProfile;
use super::timeline::TransitionPhase;
use crate::classification::activity::classify_activity_type;
use crate::classification::sector::{classify_sector, SectorBenefit};
use crate::config::ReformConfig;
use crate::types::{ActivityType, Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// CBS/IBS rates and credit ratio actually applied to the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveRates {
    /// Sector reduction (0.60 = 60% off the reference rates)
    pub reduction_factor: Rate,
    /// 1 - reduction_factor
    pub effective_rate_factor: Rate,
    pub cbs_effective: Rate,
    pub ibs_effective: Rate,
    /// Share of revenue treated as creditable input
    pub credit_ratio: Rate,
}

/// Monthly liability in one year of the transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilitySnapshot {
    pub year: i32,
    pub phase_name: String,
    pub legacy_pis_cofins_amount: Money,
    pub legacy_icms_iss_amount: Money,
    pub cbs_amount: Money,
    pub ibs_amount: Money,
    pub testing_surcharge: Money,
    pub total: Money,
    /// (total - baseline) / baseline, zero when there is no baseline
    pub delta_vs_baseline: Rate,
    /// Simples Nacional: not decomposed, no computed delta
    pub simples_unified: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub baseline: LiabilityBreakdown,
    pub effective_rates: EffectiveRates,
    pub snapshots: Vec<LiabilitySnapshot>,
}

impl Projection {
    pub fn final_snapshot(&self) -> Option<&LiabilitySnapshot> {
        self.snapshots.last()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the monthly liability across every phase of the configured timeline.
///
/// Returns `None` for non-positive revenue: there is nothing to project.
pub fn project(profile: &FiscalProfile, config: &ReformConfig) -> Option<Projection> {
    let sector = classify_sector(
        &profile.activity_description,
        &profile.activity_category,
        config,
    );
    let activity = classify_activity_type(&profile.activity_category, config);
    project_classified(profile, &sector, activity, config)
}

/// [`project`] with sector and activity type already classified.
pub fn project_classified(
    profile: &FiscalProfile,
    sector: &SectorBenefit,
    activity: ActivityType,
    config: &ReformConfig,
) -> Option<Projection> {
    if profile.monthly_revenue <= Decimal::ZERO {
        tracing::warn!(
            revenue = %profile.monthly_revenue,
            "non-positive monthly revenue; skipping projection"
        );
        return None;
    }

    let baseline = compute_baseline_for_activity(profile, activity, config);
    let rates = effective_rates(sector, activity, config);

    let snapshots: Vec<LiabilitySnapshot> = if baseline.is_simples {
        config
            .timeline
            .iter()
            .map(|phase| simples_snapshot(phase, &baseline))
            .collect()
    } else {
        config
            .timeline
            .iter()
            .map(|phase| snapshot(profile.monthly_revenue, phase, &baseline, &rates, config))
            .collect()
    };

    tracing::debug!(
        regime = %profile.regime,
        baseline = %baseline.total,
        phases = snapshots.len(),
        "projection complete"
    );

    Some(Projection {
        baseline,
        effective_rates: rates,
        snapshots,
    })
}

/// Reference rates scaled by the sector reduction, plus the activity's credit ratio.
pub fn effective_rates(
    sector: &SectorBenefit,
    activity: ActivityType,
    config: &ReformConfig,
) -> EffectiveRates {
    let effective_rate_factor = Decimal::ONE - sector.reduction_factor;
    EffectiveRates {
        reduction_factor: sector.reduction_factor,
        effective_rate_factor,
        cbs_effective: config.cbs_reference_rate * effective_rate_factor,
        ibs_effective: config.ibs_reference_rate * effective_rate_factor,
        credit_ratio: config.credit_ratios.for_activity(activity),
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn snapshot(
    revenue: Money,
    phase: &TransitionPhase,
    baseline: &LiabilityBreakdown,
    rates: &EffectiveRates,
    config: &ReformConfig,
) -> LiabilitySnapshot {
    let legacy_pis_cofins_amount = baseline.pis_cofins() * phase.legacy_pis_cofins_fraction;
    let legacy_icms_iss_amount = baseline.icms_iss() * phase.legacy_icms_iss_fraction;

    let cbs_amount = net_of_credit(revenue, rates.cbs_effective, phase.cbs_fraction, rates.credit_ratio);
    let ibs_amount = net_of_credit(revenue, rates.ibs_effective, phase.ibs_fraction, rates.credit_ratio);

    let testing_surcharge = if phase.is_testing_year {
        revenue * (config.test_cbs_rate + config.test_ibs_rate)
    } else {
        Decimal::ZERO
    };

    let total = legacy_pis_cofins_amount
        + cbs_amount
        + legacy_icms_iss_amount
        + ibs_amount
        + testing_surcharge;

    LiabilitySnapshot {
        year: phase.year,
        phase_name: phase.phase_name.clone(),
        legacy_pis_cofins_amount,
        legacy_icms_iss_amount,
        cbs_amount,
        ibs_amount,
        testing_surcharge,
        total,
        delta_vs_baseline: delta(total, baseline.total),
        simples_unified: false,
    }
}

/// Gross tax minus input credit, floored at zero.
fn net_of_credit(revenue: Money, effective_rate: Rate, phase_fraction: Rate, credit_ratio: Rate) -> Money {
    let gross = revenue * effective_rate * phase_fraction;
    let credit = revenue * credit_ratio * effective_rate * phase_fraction;
    (gross - credit).max(Decimal::ZERO)
}

fn delta(total: Money, baseline_total: Money) -> Rate {
    if baseline_total > Decimal::ZERO {
        (total - baseline_total) / baseline_total
    } else {
        Decimal::ZERO
    }
}

fn simples_snapshot(phase: &TransitionPhase, baseline: &LiabilityBreakdown) -> LiabilitySnapshot {
    LiabilitySnapshot {
        year: phase.year,
        phase_name: phase.phase_name.clone(),
        legacy_pis_cofins_amount: Decimal::ZERO,
        legacy_icms_iss_amount: Decimal::ZERO,
        cbs_amount: Decimal::ZERO,
        ibs_amount: Decimal::ZERO,
        testing_surcharge: Decimal::ZERO,
        total: baseline.total,
        delta_vs_baseline: Decimal::ZERO,
        simples_unified: true,
    }
}
