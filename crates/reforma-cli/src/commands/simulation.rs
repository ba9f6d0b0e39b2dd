use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use reforma_core::simulation::{self, build_profile, SimulationInput};
use reforma_core::state_tables::StateRateTable;
use reforma_core::transition::baseline::compute_baseline;
use reforma_core::{ReformConfig, Regime, SimplesAnexo};

use crate::input;

/// Taxpayer profile flags shared by `simulate` and `baseline`
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ProfileArgs {
    /// Gross monthly revenue in BRL
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Tax regime: simples, presumido or real
    #[arg(long)]
    pub regime: Option<String>,

    /// Free-text description of the business (e.g. "Clínica odontológica")
    #[arg(long, default_value = "")]
    pub description: String,

    /// Broad activity category (comércio, indústria, serviços, agropecuária)
    #[arg(long, default_value = "")]
    pub category: String,

    /// Two-letter state code (UF), e.g. SP
    #[arg(long, default_value = "")]
    pub state: String,

    /// Municipal ISS rate (e.g. 0.03 for 3%); defaults to the 5% ceiling
    #[arg(long)]
    pub iss_rate: Option<Decimal>,

    /// Internal ICMS rate, bypassing the state table
    #[arg(long)]
    pub icms_rate: Option<Decimal>,

    /// IRPJ presumption percentage (e.g. 0.32 for services)
    #[arg(long)]
    pub presumption_rate: Option<Decimal>,

    /// Simples Nacional annex (I to V)
    #[arg(long, value_parser = parse_anexo)]
    pub anexo: Option<SimplesAnexo>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the transition projection
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

/// Arguments for the current-law baseline
#[derive(Args)]
pub struct BaselineArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,
}

pub fn run_simulate(
    args: SimulateArgs,
    config: &ReformConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input = read_input(args.profile)?;
    let result = simulation::simulate(&sim_input, config, &StateRateTable::reference())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_baseline(
    args: BaselineArgs,
    config: &ReformConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sim_input = read_input(args.profile)?;
    baseline(&sim_input, config)
}

fn baseline(
    sim_input: &SimulationInput,
    config: &ReformConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut warnings = Vec::new();
    let profile = build_profile(sim_input, config, &StateRateTable::reference(), &mut warnings)?;
    let breakdown = if profile.monthly_revenue <= Decimal::ZERO {
        warnings.push("Monthly revenue is zero or negative; no baseline was computed".to_string());
        None
    } else {
        Some(compute_baseline(&profile, config))
    };
    Ok(json!({
        "result": breakdown,
        "methodology": "Current-law monthly liability (PIS, COFINS, ICMS, ISS)",
        "warnings": warnings,
    }))
}

fn read_input(args: ProfileArgs) -> Result<SimulationInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(data);
    }
    Ok(SimulationInput {
        monthly_revenue: args
            .revenue
            .ok_or("--revenue is required (or provide --input)")?,
        regime: args
            .regime
            .ok_or("--regime is required (or provide --input)")?
            .parse::<Regime>()?,
        activity_description: args.description,
        activity_category: args.category,
        state_code: args.state,
        iss_rate: args.iss_rate,
        icms_rate: args.icms_rate,
        presumption_rate: args.presumption_rate,
        simples_anexo: args.anexo,
    })
}

fn parse_anexo(s: &str) -> Result<SimplesAnexo, String> {
    match s.trim().to_uppercase().as_str() {
        "I" | "1" => Ok(SimplesAnexo::I),
        "II" | "2" => Ok(SimplesAnexo::II),
        "III" | "3" => Ok(SimplesAnexo::III),
        "IV" | "4" => Ok(SimplesAnexo::IV),
        "V" | "5" => Ok(SimplesAnexo::V),
        other => Err(format!("'{other}' is not a Simples annex (expected I to V)")),
    }
}
