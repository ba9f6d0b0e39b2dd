use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::normalize::{contains_keyword, normalize};
use crate::config::ReformConfig;
use crate::types::Rate;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Rate reduction granted to a sector under LC 214/2025.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorBenefit {
    /// Share of the reference CBS/IBS rates waived (0.60 = 60% reduction)
    pub reduction_factor: Rate,
    pub label: String,
    pub rationale: String,
}

/// One entry of the ordered sector rule table.
///
/// A rule matches when any of its keywords occurs in the normalized
/// activity description or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRule {
    pub key: String,
    pub keywords: Vec<String>,
    pub benefit: SectorBenefit,
}

impl SectorRule {
    pub fn matches(&self, description: &str, category: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| contains_keyword(description, k) || contains_keyword(category, k))
    }
}

/// Key reported when no rule matches.
pub const GENERAL_SECTOR_KEY: &str = "general";

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find the first rule, in declaration order, matching the activity text.
///
/// Not a best-match search: "Hospital veterinário" resolves to health
/// because the health rule is declared before the veterinary one.
pub fn match_sector<'a>(
    rules: &'a [SectorRule],
    description: &str,
    category: &str,
) -> Option<&'a SectorRule> {
    let description = normalize(description);
    let category = normalize(category);
    rules.iter().find(|r| r.matches(&description, &category))
}

/// Sector key and benefit of the activity, falling back to
/// [`GENERAL_SECTOR_KEY`] and the configured general sector.
pub fn resolve_sector(
    description: &str,
    category: &str,
    config: &ReformConfig,
) -> (String, SectorBenefit) {
    match match_sector(&config.sector_rules, description, category) {
        Some(rule) => {
            tracing::debug!(sector = %rule.key, "sector rule matched");
            (rule.key.clone(), rule.benefit.clone())
        }
        None => {
            tracing::debug!("no sector rule matched; using general sector");
            (GENERAL_SECTOR_KEY.to_string(), config.default_sector.clone())
        }
    }
}

/// Classify an activity into its benefit sector (no reduction when
/// nothing matches).
pub fn classify_sector(description: &str, category: &str, config: &ReformConfig) -> SectorBenefit {
    resolve_sector(description, category, config).1
}

/// Sector key for the activity text, `"general"` when nothing matches.
pub fn sector_key(description: &str, category: &str, config: &ReformConfig) -> String {
    resolve_sector(description, category, config).0
}

// ---------------------------------------------------------------------------
// Reference table
// ---------------------------------------------------------------------------

const REDUCTION_60: Decimal = dec!(0.60);
const REDUCTION_30: Decimal = dec!(0.30);

pub fn general_sector() -> SectorBenefit {
    SectorBenefit {
        reduction_factor: Decimal::ZERO,
        label: "Geral".into(),
        rationale: "Atividade sujeita às alíquotas de referência integrais de CBS e IBS.".into(),
    }
}

fn rule(key: &str, keywords: &[&str], reduction: Decimal, label: &str, rationale: &str) -> SectorRule {
    SectorRule {
        key: key.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        benefit: SectorBenefit {
            reduction_factor: reduction,
            label: label.into(),
            rationale: rationale.into(),
        },
    }
}

/// Sector rules in matching order (LC 214/2025 reduced-rate regimes).
pub fn reference_sector_rules() -> Vec<SectorRule> {
    vec![
        rule(
            "health",
            &[
                "medico",
                "medica",
                "clinica medica",
                "hospital",
                "ambulatori",
                "saude",
                "laboratorio",
                "diagnostic",
                "enfermag",
            ],
            REDUCTION_60,
            "Saúde",
            "Serviços de saúde têm redução de 60% das alíquotas de CBS e IBS.",
        ),
        rule(
            "dentistry",
            &["odontolog", "dentist", "dentari"],
            REDUCTION_60,
            "Odontologia",
            "Serviços odontológicos são serviços de saúde com redução de 60%.",
        ),
        rule(
            "psychology",
            &["psicolog", "psicoterap"],
            REDUCTION_60,
            "Psicologia",
            "Serviços de psicologia são serviços de saúde com redução de 60%.",
        ),
        rule(
            "physiotherapy",
            &["fisioterap", "terapia ocupacional"],
            REDUCTION_60,
            "Fisioterapia",
            "Serviços de fisioterapia são serviços de saúde com redução de 60%.",
        ),
        rule(
            "nutrition",
            &["nutricion", "nutricao"],
            REDUCTION_60,
            "Nutrição",
            "Serviços de nutrição são serviços de saúde com redução de 60%.",
        ),
        rule(
            "veterinary",
            &["veterinar", "zootecn"],
            REDUCTION_30,
            "Medicina veterinária",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "education",
            &["educacao", "ensino", "escola", "faculdade", "creche", "curso"],
            REDUCTION_60,
            "Educação",
            "Serviços de educação têm redução de 60% das alíquotas de CBS e IBS.",
        ),
        rule(
            "law",
            &["advocacia", "advogad", "juridic"],
            REDUCTION_30,
            "Advocacia",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "engineering",
            &["engenharia", "engenheir"],
            REDUCTION_30,
            "Engenharia",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "architecture",
            &["arquitet", "urbanis"],
            REDUCTION_30,
            "Arquitetura e urbanismo",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "accounting",
            &["contabil", "contador", "auditoria"],
            REDUCTION_30,
            "Contabilidade",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "agriculture",
            &["agricult", "agropecuar", "pecuaria", "cultivo", "rural", "agronom"],
            REDUCTION_60,
            "Agropecuária",
            "Produtos agropecuários e insumos agrícolas têm redução de 60%.",
        ),
        rule(
            "public_transport",
            &["transporte coletivo", "transporte publico", "metroviario", "transporte de passageiros"],
            REDUCTION_60,
            "Transporte público coletivo",
            "Transporte coletivo de passageiros tem redução de 60%.",
        ),
        rule(
            "environmental",
            &["ambiental", "biolog"],
            REDUCTION_30,
            "Serviços ambientais",
            "Profissão intelectual regulamentada (biólogos) com redução de 30%.",
        ),
        rule(
            "surveying",
            &["agrimensura", "topograf", "geodes"],
            REDUCTION_30,
            "Agrimensura",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "culture",
            &["cultural", "artistic", "audiovisual", "jornalis", "espetacul"],
            REDUCTION_60,
            "Cultura",
            "Produções artísticas, culturais, jornalísticas e audiovisuais têm redução de 60%.",
        ),
        rule(
            "economics",
            &["economia", "economist"],
            REDUCTION_30,
            "Economia",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
        rule(
            "administration",
            &["administracao", "administrador"],
            REDUCTION_30,
            "Administração",
            "Profissão intelectual regulamentada com redução de 30%.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ReformConfig {
        ReformConfig::default()
    }

    #[test]
    fn test_clinica_medica_is_health() {
        let benefit = classify_sector("Clínica médica ambulatorial", "serviços", &config());
        assert_eq!(benefit.reduction_factor, dec!(0.60));
        assert_eq!(benefit.label, "Saúde");
    }

    #[test]
    fn test_match_on_category_only() {
        let key = sector_key("", "Escritório de Advocacia", &config());
        assert_eq!(key, "law");
    }

    #[test]
    fn test_unmatched_falls_back_to_general() {
        let benefit = classify_sector("Revenda de peças automotivas", "comércio", &config());
        assert_eq!(benefit.reduction_factor, Decimal::ZERO);
        assert_eq!(sector_key("Revenda de peças", "comércio", &config()), GENERAL_SECTOR_KEY);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        // "hospital" (health) is declared before "veterinar" (veterinary)
        let key = sector_key("Hospital veterinário", "", &config());
        assert_eq!(key, "health");

        let key = sector_key("Consultório veterinário", "", &config());
        assert_eq!(key, "veterinary");
    }

    #[test]
    fn test_clinic_wording_does_not_shadow_health_professions() {
        let cases = [
            ("Medicina veterinária", "veterinary", dec!(0.30)),
            ("Clínica veterinária", "veterinary", dec!(0.30)),
            ("Psicologia clínica", "psychology", dec!(0.60)),
            ("Clínica de fisioterapia", "physiotherapy", dec!(0.60)),
            ("Clínica odontológica", "dentistry", dec!(0.60)),
        ];
        for (desc, key, reduction) in cases {
            let (k, benefit) = resolve_sector(desc, "serviços", &config());
            assert_eq!(k, key, "{desc}");
            assert_eq!(benefit.reduction_factor, reduction, "{desc}");
        }
        assert_eq!(classify_sector("Medicina veterinária", "", &config()).label, "Medicina veterinária");
    }

    #[test]
    fn test_custom_rule_order_is_respected() {
        let mut cfg = config();
        cfg.sector_rules.reverse();
        // administration is now first; "administracao hospitalar" hits it before health
        let key = sector_key("Administração hospitalar", "", &cfg);
        assert_eq!(key, "administration");
    }

    #[test]
    fn test_profession_rules_grant_thirty_percent() {
        for desc in ["Engenharia civil", "Escritório de contabilidade", "Arquitetura de interiores"] {
            let benefit = classify_sector(desc, "", &config());
            assert_eq!(benefit.reduction_factor, dec!(0.30), "{desc}");
        }
    }

    #[test]
    fn test_reference_rules_reduction_values() {
        for r in reference_sector_rules() {
            let f = r.benefit.reduction_factor;
            assert!(
                f == Decimal::ZERO || f == dec!(0.30) || f == dec!(0.60),
                "{} has unexpected reduction {}",
                r.key,
                f
            );
        }
    }

    #[test]
    fn test_reference_rule_order() {
        let keys: Vec<String> = reference_sector_rules().into_iter().map(|r| r.key).collect();
        assert_eq!(keys.first().map(String::as_str), Some("health"));
        assert_eq!(keys.last().map(String::as_str), Some("administration"));
        assert_eq!(keys.len(), 18);
    }
}
