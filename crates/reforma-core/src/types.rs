use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ReformaError;

/// All monetary values (BRL). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.088 = 8.8%). Never as percentages.
pub type Rate = Decimal;

/// Federal tax regime of the taxpayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Simples Nacional: unified collection through the monthly DAS.
    Simples,
    /// Lucro Presumido: cumulative PIS/COFINS, no credits.
    Presumido,
    /// Lucro Real: non-cumulative PIS/COFINS with input credits.
    Real,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Simples => "simples",
            Regime::Presumido => "presumido",
            Regime::Real => "real",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = ReformaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simples" => Ok(Regime::Simples),
            "presumido" => Ok(Regime::Presumido),
            "real" => Ok(Regime::Real),
            other => Err(ReformaError::InvalidInput {
                field: "regime".into(),
                reason: format!(
                    "'{other}' is not a recognised regime (expected simples, presumido or real)"
                ),
            }),
        }
    }
}

/// Coarse activity type; selects the share of revenue treated as creditable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Commerce,
    Industry,
    Service,
    Agriculture,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActivityType::Commerce => "commerce",
            ActivityType::Industry => "industry",
            ActivityType::Service => "service",
            ActivityType::Agriculture => "agriculture",
        };
        f.write_str(s)
    }
}

/// Simples Nacional annex (Anexos I–V of LC 123/2006).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimplesAnexo {
    /// Commerce
    I,
    /// Industry
    II,
    /// Services (general)
    III,
    /// Services (construction, cleaning, law)
    IV,
    /// Services (intellectual, technical)
    V,
}

impl SimplesAnexo {
    /// Annexes III, IV and V tax service revenue.
    pub fn is_service(&self) -> bool {
        matches!(self, SimplesAnexo::III | SimplesAnexo::IV | SimplesAnexo::V)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regime_parses_case_insensitively() {
        assert_eq!("Presumido".parse::<Regime>().unwrap(), Regime::Presumido);
        assert_eq!(" real ".parse::<Regime>().unwrap(), Regime::Real);
        assert_eq!("SIMPLES".parse::<Regime>().unwrap(), Regime::Simples);
    }

    #[test]
    fn test_unknown_regime_is_rejected() {
        let err = "mei".parse::<Regime>().unwrap_err();
        match err {
            ReformaError::InvalidInput { field, .. } => assert_eq!(field, "regime"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_regime_fails_deserialization() {
        let parsed: Result<Regime, _> = serde_json::from_str("\"arbitrado\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_regime_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Regime::Real).unwrap(), "\"real\"");
    }

    #[test]
    fn test_service_anexos() {
        assert!(!SimplesAnexo::I.is_service());
        assert!(!SimplesAnexo::II.is_service());
        assert!(SimplesAnexo::III.is_service());
        assert!(SimplesAnexo::V.is_service());
    }
}
