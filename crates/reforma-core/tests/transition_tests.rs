use pretty_assertions::assert_eq;
use reforma_core::classification::sector::classify_sector;
use reforma_core::simulation::{simulate, SimulationInput};
use reforma_core::state_tables::StateRateTable;
use reforma_core::transition::baseline::compute_baseline;
use reforma_core::transition::profile::FiscalProfile;
use reforma_core::transition::projection::project;
use reforma_core::transition::timeline::reference_timeline;
use reforma_core::{ReformConfig, Regime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn profile(regime: Regime, description: &str, category: &str, revenue: Decimal) -> FiscalProfile {
    FiscalProfile {
        monthly_revenue: revenue,
        regime,
        activity_description: description.into(),
        activity_category: category.into(),
        state_code: "SP".into(),
        iss_rate: dec!(0.05),
        state_icms_rate: dec!(0.18),
        presumption_rate: None,
        simples_anexo: None,
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_presumido_commerce_general_baseline() {
    let mut p = profile(Regime::Presumido, "", "comércio", dec!(100_000));
    p.iss_rate = Decimal::ZERO;
    let b = compute_baseline(&p, &ReformConfig::default());
    assert_eq!(b.pis, dec!(650));
    assert_eq!(b.cofins, dec!(3000));
    assert_eq!(b.icms, dec!(5400));
    assert_eq!(b.iss, Decimal::ZERO);
    assert_eq!(b.total, dec!(9050));
}

#[test]
fn test_real_service_health_effective_rates() {
    let p = profile(Regime::Real, "Clínica médica e ambulatorial", "serviços", dec!(80_000));
    let projection = project(&p, &ReformConfig::default()).unwrap();
    assert_eq!(projection.effective_rates.cbs_effective, dec!(0.0352));
    assert_eq!(projection.effective_rates.ibs_effective, dec!(0.0708));
}

#[test]
fn test_final_phase_equals_full_dual_vat_net_of_credit() {
    let config = ReformConfig::default();
    for (regime, category) in [
        (Regime::Presumido, "serviços"),
        (Regime::Real, "serviços"),
        (Regime::Real, "indústria"),
        (Regime::Presumido, "agropecuária"),
    ] {
        let revenue = dec!(250_000);
        let p = project(&profile(regime, "", category, revenue), &config).unwrap();
        let r = &p.effective_rates;
        let last = p.snapshots.last().unwrap();
        assert_eq!(last.year, 2033);
        assert_eq!(
            last.total,
            revenue * (r.cbs_effective + r.ibs_effective) * (Decimal::ONE - r.credit_ratio),
            "{regime} / {category}"
        );
    }
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_projection_is_deterministic() {
    let config = ReformConfig::default();
    let p = profile(Regime::Real, "Escritório de engenharia", "serviços", dec!(123_456.78));
    let first = project(&p, &config).unwrap();
    for _ in 0..5 {
        assert_eq!(project(&p, &config).unwrap(), first);
    }
}

#[test]
fn test_new_taxes_never_negative() {
    let config = ReformConfig::default();
    for category in ["comércio", "indústria", "serviços", "agropecuária"] {
        for regime in [Regime::Presumido, Regime::Real] {
            let p = project(&profile(regime, "", category, dec!(50_000)), &config).unwrap();
            for s in &p.snapshots {
                assert!(s.cbs_amount >= Decimal::ZERO);
                assert!(s.ibs_amount >= Decimal::ZERO);
                assert!(s.total >= Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_sector_reduction_law() {
    let config = ReformConfig::default();
    for description in [
        "Consultório odontológico",
        "Escritório de advocacia",
        "Escola de ensino fundamental",
        "Comércio de roupas",
    ] {
        let sector = classify_sector(description, "", &config);
        let p = project(&profile(Regime::Real, description, "serviços", dec!(10_000)), &config)
            .unwrap();
        let factor = Decimal::ONE - sector.reduction_factor;
        assert_eq!(p.effective_rates.cbs_effective, config.cbs_reference_rate * factor);
        assert_eq!(p.effective_rates.ibs_effective, config.ibs_reference_rate * factor);
    }
}

#[test]
fn test_simples_invariance() {
    let p = project(
        &profile(Regime::Simples, "Padaria", "comércio", dec!(40_000)),
        &ReformConfig::default(),
    )
    .unwrap();
    assert_eq!(p.baseline.total, Decimal::ZERO);
    assert_eq!(p.snapshots.len(), 9);
    for s in &p.snapshots {
        assert_eq!(s.total, Decimal::ZERO);
        assert_eq!(s.delta_vs_baseline, Decimal::ZERO);
    }
}

#[test]
fn test_zero_baseline_safety() {
    let mut config = ReformConfig::default();
    config.real_credit_assumption = Decimal::ONE;
    let mut p = profile(Regime::Real, "", "serviços", dec!(30_000));
    p.iss_rate = Decimal::ZERO;
    let projection = project(&p, &config).unwrap();
    assert_eq!(projection.baseline.total, Decimal::ZERO);
    assert!(projection
        .snapshots
        .iter()
        .all(|s| s.delta_vs_baseline == Decimal::ZERO));
}

#[test]
fn test_timeline_monotonic() {
    let t = reference_timeline();
    for w in t.windows(2) {
        assert!(w[1].legacy_pis_cofins_fraction <= w[0].legacy_pis_cofins_fraction);
        assert!(w[1].legacy_icms_iss_fraction <= w[0].legacy_icms_iss_fraction);
        assert!(w[1].cbs_fraction >= w[0].cbs_fraction);
        assert!(w[1].ibs_fraction >= w[0].ibs_fraction);
    }
}

// ===========================================================================
// End-to-end simulation
// ===========================================================================

#[test]
fn test_simulate_from_json_with_state_table() {
    let json = r#"{
        "monthly_revenue": "100000",
        "regime": "presumido",
        "activity_description": "Comércio varejista",
        "activity_category": "comércio",
        "state_code": "sp",
        "iss_rate": "0"
    }"#;
    let input: SimulationInput = serde_json::from_str(json).unwrap();
    let out = simulate(&input, &ReformConfig::default(), &StateRateTable::reference()).unwrap();
    let projection = out.result.projection.unwrap();
    assert_eq!(projection.baseline.total, dec!(9050));

    let totals: Vec<Decimal> = projection.snapshots.iter().map(|s| s.total).collect();
    assert_eq!(
        totals,
        vec![
            dec!(9050),
            dec!(10050),
            dec!(8480),
            dec!(8480),
            dec!(8559.5),
            dec!(8639),
            dec!(8718.5),
            dec!(8798),
            dec!(9275),
        ]
    );
}

#[test]
fn test_simulation_output_serializes() {
    let input = SimulationInput {
        monthly_revenue: dec!(20_000),
        regime: Regime::Real,
        activity_description: "Psicologia clínica".into(),
        activity_category: "serviços".into(),
        state_code: "MG".into(),
        iss_rate: Some(dec!(0.03)),
        icms_rate: None,
        presumption_rate: None,
        simples_anexo: None,
    };
    let out = simulate(&input, &ReformConfig::default(), &StateRateTable::reference()).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["classification"]["sector_key"], "psychology");
    assert_eq!(value["result"]["projection"]["snapshots"].as_array().unwrap().len(), 9);
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
}
