use clap::Args;
use serde_json::{json, Value};

use reforma_core::simulation::IcmsRateSource;
use reforma_core::state_tables::StateRateTable;
use reforma_core::transition::timeline::phase_for_year;
use reforma_core::ReformConfig;

/// Arguments for the transition schedule
#[derive(Args)]
pub struct TimelineArgs {
    /// Print a single calendar year instead of the whole schedule
    #[arg(long)]
    pub year: Option<i32>,
}

/// Arguments for the state ICMS table
#[derive(Args)]
pub struct StatesArgs {
    /// Print a single state (UF) instead of the whole table
    #[arg(long)]
    pub state: Option<String>,
}

pub fn run_timeline(
    args: TimelineArgs,
    config: &ReformConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    match args.year {
        Some(year) => {
            let phase = phase_for_year(&config.timeline, year)
                .ok_or_else(|| format!("{year} is outside the transition schedule"))?;
            Ok(json!({ "result": phase }))
        }
        None => Ok(json!({ "results": config.timeline })),
    }
}

pub fn run_states(args: StatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let table = StateRateTable::reference();
    match args.state {
        Some(state) => {
            let rate = table
                .icms_rate(&state)
                .ok_or_else(|| format!("Unknown state code: {}", state.trim().to_uppercase()))?;
            Ok(json!({
                "result": { "state_code": state.trim().to_uppercase(), "icms_rate": rate }
            }))
        }
        None => {
            let rows: Vec<Value> = table
                .iter()
                .map(|(uf, rate)| json!({ "state_code": uf, "icms_rate": rate }))
                .collect();
            Ok(json!({ "results": rows }))
        }
    }
}
