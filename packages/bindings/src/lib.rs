use napi::Result as NapiResult;
use napi_derive::napi;

use reforma_core::simulation::{self, SimulationInput};
use reforma_core::state_tables::StateRateTable;
use reforma_core::ReformConfig;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_config(config_json: Option<String>) -> NapiResult<ReformConfig> {
    match config_json {
        Some(json) => {
            let config = ReformConfig::from_json(&json).map_err(to_napi_error)?;
            config.validate().map_err(to_napi_error)?;
            Ok(config)
        }
        None => Ok(ReformConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_reform(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let input: SimulationInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let output = simulation::simulate(&input, &config, &StateRateTable::reference())
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_activity(
    description: String,
    category: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let classification = simulation::classify(&description, &category, &config);
    serde_json::to_string(&classification).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn transition_timeline(config_json: Option<String>) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    serde_json::to_string(&config.timeline).map_err(to_napi_error)
}

#[napi]
pub fn state_icms_rates() -> NapiResult<String> {
    serde_json::to_string(&StateRateTable::reference()).map_err(to_napi_error)
}
