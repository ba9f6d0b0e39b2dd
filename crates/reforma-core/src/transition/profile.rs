use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate, Regime, SimplesAnexo};

/// Taxpayer profile for one simulation, with the state ICMS rate already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiscalProfile {
    /// Gross monthly revenue
    pub monthly_revenue: Money,
    pub regime: Regime,
    /// Free-text activity description (e.g. CNAE description)
    pub activity_description: String,
    /// Free-text activity category (e.g. "comércio", "serviços")
    pub activity_category: String,
    /// Two-letter state abbreviation (UF)
    pub state_code: String,
    /// Municipal ISS rate
    pub iss_rate: Rate,
    /// Nominal internal ICMS rate of the state
    pub state_icms_rate: Rate,
    /// Lucro Presumido presumption percentage (8% goods, 32% services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presumption_rate: Option<Rate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simples_anexo: Option<SimplesAnexo>,
}
