use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::projection::Projection;
use crate::classification::sector::SectorBenefit;
use crate::config::ReformConfig;
use crate::types::ActivityType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Alert {
            severity,
            message: message.into(),
        }
    }
}

const SIMPLES_OPT_OUT_NOTE: &str = "Empresas do Simples Nacional poderão optar por recolher \
    CBS e IBS fora do DAS, pelo regime regular, para gerar créditos aos clientes \
    contribuintes. Avalie o perfil da sua clientela antes de decidir.";

const SPLIT_PAYMENT_NOTE: &str = "Com o split payment, CBS e IBS serão retidos \
    automaticamente no momento do pagamento eletrônico, o que altera o fluxo de \
    caixa: o imposto deixa de transitar pelo caixa da empresa.";

/// Rule-based observations on a projection, in display order.
///
/// 1. Net impact of the final phase against the baseline
/// 2. Sector benefit, when the sector has a reduction
/// 3. Credit structure of the activity type (services / commerce)
/// 4. Two fixed notes: Simples opt-out of the DAS, split payment
pub fn generate_alerts(
    activity: ActivityType,
    sector: &SectorBenefit,
    projection: &Projection,
    config: &ReformConfig,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let final_delta = projection
        .final_snapshot()
        .map(|s| s.delta_vs_baseline)
        .unwrap_or(Decimal::ZERO);
    alerts.push(impact_alert(final_delta, projection, config));

    if sector.reduction_factor > Decimal::ZERO {
        alerts.push(Alert::new(
            Severity::Success,
            format!(
                "Setor {}: redução de {}% nas alíquotas de CBS e IBS. {}",
                sector.label,
                percent(sector.reduction_factor),
                sector.rationale
            ),
        ));
    }

    match activity {
        ActivityType::Service => alerts.push(Alert::new(
            Severity::Warning,
            "Prestadores de serviço têm poucos insumos creditáveis: a folha de \
             salários não gera crédito de CBS/IBS, o que tende a elevar a carga efetiva.",
        )),
        ActivityType::Commerce => alerts.push(Alert::new(
            Severity::Info,
            "No comércio, o custo das mercadorias adquiridas gera crédito integral \
             de CBS/IBS, reduzindo a carga líquida sobre a margem.",
        )),
        ActivityType::Industry | ActivityType::Agriculture => {}
    }

    alerts.push(Alert::new(Severity::Info, SIMPLES_OPT_OUT_NOTE));
    alerts.push(Alert::new(Severity::Info, SPLIT_PAYMENT_NOTE));

    alerts
}

fn impact_alert(final_delta: Decimal, projection: &Projection, config: &ReformConfig) -> Alert {
    let year = projection
        .final_snapshot()
        .map(|s| s.year.to_string())
        .unwrap_or_else(|| "o fim da transição".into());

    if projection.baseline.is_simples {
        return Alert::new(
            Severity::Info,
            "Simples Nacional: a transição é aplicada dentro das tabelas do DAS e \
             não é decomposta nesta simulação; nenhuma variação foi calculada.",
        );
    }

    if final_delta > config.danger_delta_threshold {
        Alert::new(
            Severity::Danger,
            format!(
                "Aumento estimado de {}% na carga sobre o consumo em {year} em relação ao sistema atual.",
                percent(final_delta)
            ),
        )
    } else if final_delta < config.success_delta_threshold {
        Alert::new(
            Severity::Success,
            format!(
                "Redução estimada de {}% na carga sobre o consumo em {year} em relação ao sistema atual.",
                percent(final_delta.abs())
            ),
        )
    } else {
        Alert::new(
            Severity::Info,
            format!(
                "Impacto estimado moderado ({}%) em {year}: carga semelhante à do sistema atual.",
                percent(final_delta)
            ),
        )
    }
}

fn percent(rate: Decimal) -> Decimal {
    (rate * dec!(100)).round_dp(1).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::sector::general_sector;
    use crate::transition::baseline::LiabilityBreakdown;
    use crate::transition::projection::{EffectiveRates, LiabilitySnapshot};

    fn projection_with_final_delta(delta: Decimal, is_simples: bool) -> Projection {
        Projection {
            baseline: LiabilityBreakdown {
                pis: dec!(650),
                cofins: dec!(3000),
                icms: dec!(5400),
                iss: Decimal::ZERO,
                total: dec!(9050),
                is_simples,
            },
            effective_rates: EffectiveRates {
                reduction_factor: Decimal::ZERO,
                effective_rate_factor: Decimal::ONE,
                cbs_effective: dec!(0.088),
                ibs_effective: dec!(0.177),
                credit_ratio: dec!(0.65),
            },
            snapshots: vec![LiabilitySnapshot {
                year: 2033,
                phase_name: "Vigência plena do IVA dual".into(),
                legacy_pis_cofins_amount: Decimal::ZERO,
                legacy_icms_iss_amount: Decimal::ZERO,
                cbs_amount: Decimal::ZERO,
                ibs_amount: Decimal::ZERO,
                testing_surcharge: Decimal::ZERO,
                total: Decimal::ZERO,
                delta_vs_baseline: delta,
                simples_unified: is_simples,
            }],
        }
    }

    fn first_severity(delta: Decimal) -> Severity {
        let p = projection_with_final_delta(delta, false);
        generate_alerts(ActivityType::Industry, &general_sector(), &p, &ReformConfig::default())[0]
            .severity
    }

    #[test]
    fn test_impact_thresholds() {
        assert_eq!(first_severity(dec!(0.25)), Severity::Danger);
        assert_eq!(first_severity(dec!(0.10)), Severity::Info);
        assert_eq!(first_severity(dec!(0.0)), Severity::Info);
        assert_eq!(first_severity(dec!(-0.05)), Severity::Info);
        assert_eq!(first_severity(dec!(-0.051)), Severity::Success);
    }

    #[test]
    fn test_general_industry_gets_impact_plus_fixed_notes() {
        let p = projection_with_final_delta(dec!(0.02), false);
        let alerts =
            generate_alerts(ActivityType::Industry, &general_sector(), &p, &ReformConfig::default());
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[1].message, SIMPLES_OPT_OUT_NOTE);
        assert_eq!(alerts[2].message, SPLIT_PAYMENT_NOTE);
    }

    #[test]
    fn test_sector_and_service_notes() {
        let sector = SectorBenefit {
            reduction_factor: dec!(0.60),
            label: "Saúde".into(),
            rationale: "Serviços de saúde.".into(),
        };
        let p = projection_with_final_delta(dec!(-0.20), false);
        let alerts = generate_alerts(ActivityType::Service, &sector, &p, &ReformConfig::default());
        assert_eq!(alerts.len(), 5);
        assert_eq!(alerts[0].severity, Severity::Success);
        assert_eq!(alerts[1].severity, Severity::Success);
        assert!(alerts[1].message.contains("60%"));
        assert_eq!(alerts[2].severity, Severity::Warning);
    }

    #[test]
    fn test_commerce_note() {
        let p = projection_with_final_delta(dec!(0.0), false);
        let alerts =
            generate_alerts(ActivityType::Commerce, &general_sector(), &p, &ReformConfig::default());
        assert_eq!(alerts.len(), 4);
        assert!(alerts[1].message.contains("mercadorias"));
    }

    #[test]
    fn test_simples_impact_is_informational() {
        let p = projection_with_final_delta(Decimal::ZERO, true);
        let alerts =
            generate_alerts(ActivityType::Commerce, &general_sector(), &p, &ReformConfig::default());
        assert_eq!(alerts[0].severity, Severity::Info);
        assert!(alerts[0].message.contains("Simples Nacional"));
    }

    #[test]
    fn test_alerts_are_deterministic() {
        let p = projection_with_final_delta(dec!(0.3), false);
        let cfg = ReformConfig::default();
        let a = generate_alerts(ActivityType::Service, &general_sector(), &p, &cfg);
        let b = generate_alerts(ActivityType::Service, &general_sector(), &p, &cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(dec!(0.60)).to_string(), "60");
        assert_eq!(percent(dec!(0.1234)).to_string(), "12.3");
    }
}
