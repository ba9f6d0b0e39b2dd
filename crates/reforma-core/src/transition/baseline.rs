use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::profile::FiscalProfile;
use crate::classification::activity::classify_activity_type;
use crate::config::ReformConfig;
use crate::types::{ActivityType, Money, Rate, Regime, SimplesAnexo};

/// Current-law monthly consumption-tax liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityBreakdown {
    pub pis: Money,
    pub cofins: Money,
    pub icms: Money,
    pub iss: Money,
    pub total: Money,
    /// Simples Nacional: taxes are collected together in the DAS and not decomposed
    pub is_simples: bool,
}

impl LiabilityBreakdown {
    fn simples() -> Self {
        LiabilityBreakdown {
            pis: Decimal::ZERO,
            cofins: Decimal::ZERO,
            icms: Decimal::ZERO,
            iss: Decimal::ZERO,
            total: Decimal::ZERO,
            is_simples: true,
        }
    }

    pub fn pis_cofins(&self) -> Money {
        self.pis + self.cofins
    }

    pub fn icms_iss(&self) -> Money {
        self.icms + self.iss
    }
}

/// Decide whether revenue is taxed by ISS (services) or ICMS (goods).
///
/// The Simples anexo wins when supplied, then the presumption percentage,
/// then the activity type.
pub fn is_service_activity(
    activity: ActivityType,
    presumption_rate: Option<Rate>,
    anexo: Option<SimplesAnexo>,
    config: &ReformConfig,
) -> bool {
    if let Some(anexo) = anexo {
        return anexo.is_service();
    }
    if let Some(presumption) = presumption_rate {
        return presumption >= config.service_presumption_threshold;
    }
    activity == ActivityType::Service
}

/// Compute the pre-reform monthly liability for the profile.
///
/// Revenue is not validated here; callers short-circuit non-positive revenue.
pub fn compute_baseline(profile: &FiscalProfile, config: &ReformConfig) -> LiabilityBreakdown {
    let activity = classify_activity_type(&profile.activity_category, config);
    compute_baseline_for_activity(profile, activity, config)
}

/// [`compute_baseline`] with the activity type already classified.
pub fn compute_baseline_for_activity(
    profile: &FiscalProfile,
    activity: ActivityType,
    config: &ReformConfig,
) -> LiabilityBreakdown {
    if profile.regime == Regime::Simples {
        return LiabilityBreakdown::simples();
    }

    let revenue = profile.monthly_revenue;

    let (pis, cofins) = match profile.regime {
        Regime::Presumido => (
            revenue * config.presumido_pis_rate,
            revenue * config.presumido_cofins_rate,
        ),
        _ => {
            let non_credited = Decimal::ONE - config.real_credit_assumption;
            (
                (revenue * config.real_pis_rate * non_credited).max(Decimal::ZERO),
                (revenue * config.real_cofins_rate * non_credited).max(Decimal::ZERO),
            )
        }
    };

    let service = is_service_activity(
        activity,
        profile.presumption_rate,
        profile.simples_anexo,
        config,
    );

    let (icms, iss) = if service {
        (Decimal::ZERO, revenue * profile.iss_rate)
    } else {
        (
            revenue * profile.state_icms_rate * config.icms_effective_incidence,
            Decimal::ZERO,
        )
    };

    LiabilityBreakdown {
        pis,
        cofins,
        icms,
        iss,
        total: pis + cofins + icms + iss,
        is_simples: false,
    }
}
