use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::classification::activity::classify_activity_type;
use crate::classification::sector::{resolve_sector, SectorBenefit};
use crate::config::ReformConfig;
use crate::error::ReformaError;
use crate::transition::alerts::{generate_alerts, Alert};
use crate::transition::baseline::is_service_activity;
use crate::transition::profile::FiscalProfile;
use crate::transition::projection::{project_classified, Projection};
use crate::transition::summary::{summarize, ProjectionSummary};
use crate::types::{with_metadata, ActivityType, ComputationOutput, Money, Rate, Regime, SimplesAnexo};
use crate::ReformaResult;

/// Read-only lookup of the nominal internal ICMS rate by state code.
pub trait IcmsRateSource {
    fn icms_rate(&self, state_code: &str) -> Option<Rate>;
}

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Caller-facing simulation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub monthly_revenue: Money,
    pub regime: Regime,
    #[serde(default)]
    pub activity_description: String,
    #[serde(default)]
    pub activity_category: String,
    #[serde(default)]
    pub state_code: String,
    /// Municipal ISS rate; the configured reference ceiling when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss_rate: Option<Rate>,
    /// Overrides the state table lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icms_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presumption_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simples_anexo: Option<SimplesAnexo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub sector_key: String,
    pub sector: SectorBenefit,
    pub activity_type: ActivityType,
    pub credit_ratio: Rate,
    /// Revenue taxed by ISS rather than ICMS
    pub service_activity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub classification: Classification,
    /// Absent when monthly revenue is zero or negative
    pub projection: Option<Projection>,
    pub summary: Option<ProjectionSummary>,
    pub alerts: Vec<Alert>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify an activity without projecting it.
pub fn classify(description: &str, category: &str, config: &ReformConfig) -> Classification {
    let activity_type = classify_activity_type(category, config);
    let service_activity = is_service_activity(activity_type, None, None, config);
    classification_of(description, category, activity_type, service_activity, config)
}

/// Run the full simulation: classify, compute the baseline, project every
/// phase of the timeline and derive alerts and a summary.
///
/// Zero or negative revenue is not an error: the output carries no
/// projection and a warning.
pub fn simulate(
    input: &SimulationInput,
    config: &ReformConfig,
    rates: &dyn IcmsRateSource,
) -> ReformaResult<ComputationOutput<SimulationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;

    let (profile, activity_type, service_activity) =
        resolve_profile(input, config, rates, &mut warnings)?;
    let classification = classification_of(
        &profile.activity_description,
        &profile.activity_category,
        activity_type,
        service_activity,
        config,
    );

    let projection = project_classified(&profile, &classification.sector, activity_type, config);

    let (summary, alerts) = match &projection {
        Some(p) => (
            summarize(p),
            generate_alerts(activity_type, &classification.sector, p, config),
        ),
        None => {
            warnings.push(
                "Monthly revenue is zero or negative; no projection was computed".into(),
            );
            (None, Vec::new())
        }
    };

    if input.regime == Regime::Simples && projection.is_some() {
        warnings.push(
            "Simples Nacional liabilities are not decomposed; every phase reports the \
             zero baseline with no computed delta"
                .into(),
        );
    }

    let output = SimulationOutput {
        classification,
        projection,
        summary,
        alerts,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "CBS/IBS transition projection (EC 132/2023, LC 214/2025 reference schedule)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Resolve a request into a [`FiscalProfile`]: default the ISS rate and
/// look up the state ICMS rate.
pub fn build_profile(
    input: &SimulationInput,
    config: &ReformConfig,
    rates: &dyn IcmsRateSource,
    warnings: &mut Vec<String>,
) -> ReformaResult<FiscalProfile> {
    resolve_profile(input, config, rates, warnings).map(|(profile, _, _)| profile)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// The profile together with the activity type and service incidence
/// resolved while building it.
fn resolve_profile(
    input: &SimulationInput,
    config: &ReformConfig,
    rates: &dyn IcmsRateSource,
    warnings: &mut Vec<String>,
) -> ReformaResult<(FiscalProfile, ActivityType, bool)> {
    validate_simulation_input(input)?;

    let activity_type = classify_activity_type(&input.activity_category, config);
    let service_activity = is_service_activity(
        activity_type,
        input.presumption_rate,
        input.simples_anexo,
        config,
    );

    let iss_rate = match input.iss_rate {
        Some(r) => r,
        None => {
            if service_activity && input.regime != Regime::Simples {
                warnings.push(format!(
                    "ISS rate not supplied; using the {} reference ceiling",
                    config.default_iss_rate
                ));
            }
            config.default_iss_rate
        }
    };

    let state_icms_rate = resolve_icms_rate(input, service_activity, rates)?;

    let profile = FiscalProfile {
        monthly_revenue: input.monthly_revenue,
        regime: input.regime,
        activity_description: input.activity_description.clone(),
        activity_category: input.activity_category.clone(),
        state_code: input.state_code.trim().to_uppercase(),
        iss_rate,
        state_icms_rate,
        presumption_rate: input.presumption_rate,
        simples_anexo: input.simples_anexo,
    };
    Ok((profile, activity_type, service_activity))
}

fn classification_of(
    description: &str,
    category: &str,
    activity_type: ActivityType,
    service_activity: bool,
    config: &ReformConfig,
) -> Classification {
    let (sector_key, sector) = resolve_sector(description, category, config);
    Classification {
        sector_key,
        sector,
        activity_type,
        credit_ratio: config.credit_ratios.for_activity(activity_type),
        service_activity,
    }
}

fn validate_simulation_input(input: &SimulationInput) -> ReformaResult<()> {
    let optional_rates = [
        ("iss_rate", input.iss_rate),
        ("icms_rate", input.icms_rate),
        ("presumption_rate", input.presumption_rate),
    ];
    for (field, value) in optional_rates {
        if let Some(v) = value {
            if v < Decimal::ZERO || v > Decimal::ONE {
                return Err(ReformaError::InvalidInput {
                    field: field.into(),
                    reason: format!("must be between 0 and 1, got {v}"),
                });
            }
        }
    }
    Ok(())
}

/// The ICMS rate only matters when the revenue is ICMS-taxed; an unknown
/// state is an error then and resolves to zero otherwise.
fn resolve_icms_rate(
    input: &SimulationInput,
    service_activity: bool,
    rates: &dyn IcmsRateSource,
) -> ReformaResult<Rate> {
    if let Some(rate) = input.icms_rate {
        return Ok(rate);
    }
    let state_code = input.state_code.trim().to_uppercase();
    match rates.icms_rate(&state_code) {
        Some(rate) => Ok(rate),
        None if service_activity || input.regime == Regime::Simples => Ok(Decimal::ZERO),
        None => Err(ReformaError::UnknownState(state_code)),
    }
}
