use clap::Args;
use serde::Deserialize;
use serde_json::{json, Value};

use reforma_core::simulation;
use reforma_core::ReformConfig;

use crate::input;

/// Arguments for activity classification
#[derive(Args)]
pub struct ClassifyArgs {
    /// Free-text description of the business
    #[arg(long)]
    pub description: Option<String>,

    /// Broad activity category
    #[arg(long, default_value = "")]
    pub category: String,

    /// Path to JSON input file with `activity_description` / `activity_category`
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClassifyInput {
    #[serde(default)]
    activity_description: String,
    #[serde(default)]
    activity_category: String,
}

pub fn run_classify(
    args: ClassifyArgs,
    config: &ReformConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ClassifyInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        ClassifyInput {
            activity_description: args
                .description
                .ok_or("--description is required (or provide --input)")?,
            activity_category: args.category,
        }
    };

    let classification = simulation::classify(
        &request.activity_description,
        &request.activity_category,
        config,
    );
    Ok(json!({ "result": classification }))
}
