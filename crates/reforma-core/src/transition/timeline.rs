use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ReformaError;
use crate::types::Rate;
use crate::ReformaResult;

/// One year of the EC 132/2023 transition schedule.
///
/// The legacy and new-tax fractions are independent tracks: PIS/COFINS
/// phase out against CBS, ICMS/ISS phase out against IBS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionPhase {
    pub year: i32,
    pub phase_name: String,
    /// Share of baseline PIS/COFINS still owed
    pub legacy_pis_cofins_fraction: Rate,
    /// Share of baseline ICMS/ISS still owed
    pub legacy_icms_iss_fraction: Rate,
    /// Share of the effective CBS rate in force
    pub cbs_fraction: Rate,
    /// Share of the effective IBS rate in force
    pub ibs_fraction: Rate,
    /// Test year: CBS 0.9% + IBS 0.1% charged on top of the legacy taxes
    pub is_testing_year: bool,
}

fn phase(
    year: i32,
    phase_name: &str,
    legacy_pis_cofins_fraction: Decimal,
    legacy_icms_iss_fraction: Decimal,
    cbs_fraction: Decimal,
    ibs_fraction: Decimal,
    is_testing_year: bool,
) -> TransitionPhase {
    TransitionPhase {
        year,
        phase_name: phase_name.into(),
        legacy_pis_cofins_fraction,
        legacy_icms_iss_fraction,
        cbs_fraction,
        ibs_fraction,
        is_testing_year,
    }
}

/// The legislated 2025–2033 schedule.
pub fn reference_timeline() -> Vec<TransitionPhase> {
    let one = Decimal::ONE;
    let zero = Decimal::ZERO;
    vec![
        phase(2025, "Sistema atual", one, one, zero, zero, false),
        phase(2026, "Ano de teste (CBS 0,9% + IBS 0,1%)", one, one, zero, zero, true),
        phase(2027, "CBS plena, extinção de PIS/COFINS", zero, one, one, zero, false),
        phase(2028, "CBS plena", zero, one, one, zero, false),
        phase(2029, "ICMS/ISS 90%, IBS 10%", zero, dec!(0.90), one, dec!(0.10), false),
        phase(2030, "ICMS/ISS 80%, IBS 20%", zero, dec!(0.80), one, dec!(0.20), false),
        phase(2031, "ICMS/ISS 70%, IBS 30%", zero, dec!(0.70), one, dec!(0.30), false),
        phase(2032, "ICMS/ISS 60%, IBS 40%", zero, dec!(0.60), one, dec!(0.40), false),
        phase(2033, "Vigência plena do IVA dual", zero, zero, one, one, false),
    ]
}

/// Check a schedule: fractions in [0,1], strictly chronological years,
/// legacy tracks non-increasing, new-tax tracks non-decreasing.
pub fn validate_timeline(timeline: &[TransitionPhase]) -> ReformaResult<()> {
    if timeline.is_empty() {
        return Err(ReformaError::InvalidConfig(
            "timeline must contain at least one phase".into(),
        ));
    }

    for p in timeline {
        for (name, value) in [
            ("legacy_pis_cofins_fraction", p.legacy_pis_cofins_fraction),
            ("legacy_icms_iss_fraction", p.legacy_icms_iss_fraction),
            ("cbs_fraction", p.cbs_fraction),
            ("ibs_fraction", p.ibs_fraction),
        ] {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ReformaError::InvalidConfig(format!(
                    "{} {name} = {value} is outside [0, 1]",
                    p.year
                )));
            }
        }
    }

    for pair in timeline.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.year <= prev.year {
            return Err(ReformaError::InvalidConfig(format!(
                "timeline years must be strictly increasing ({} follows {})",
                next.year, prev.year
            )));
        }
        if next.legacy_pis_cofins_fraction > prev.legacy_pis_cofins_fraction
            || next.legacy_icms_iss_fraction > prev.legacy_icms_iss_fraction
        {
            return Err(ReformaError::InvalidConfig(format!(
                "legacy fractions increase from {} to {}",
                prev.year, next.year
            )));
        }
        if next.cbs_fraction < prev.cbs_fraction || next.ibs_fraction < prev.ibs_fraction {
            return Err(ReformaError::InvalidConfig(format!(
                "CBS/IBS fractions decrease from {} to {}",
                prev.year, next.year
            )));
        }
    }

    Ok(())
}

/// Phase in force for a calendar year, if the schedule covers it.
pub fn phase_for_year(timeline: &[TransitionPhase], year: i32) -> Option<&TransitionPhase> {
    timeline.iter().find(|p| p.year == year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_timeline_shape() {
        let t = reference_timeline();
        assert_eq!(t.len(), 9);
        assert_eq!(t.first().unwrap().year, 2025);
        assert_eq!(t.last().unwrap().year, 2033);
        assert!(validate_timeline(&t).is_ok());
    }

    #[test]
    fn test_only_2026_is_testing_year() {
        let testing: Vec<i32> = reference_timeline()
            .iter()
            .filter(|p| p.is_testing_year)
            .map(|p| p.year)
            .collect();
        assert_eq!(testing, vec![2026]);
    }

    #[test]
    fn test_monotonic_phase_out() {
        let t = reference_timeline();
        for i in 0..t.len() {
            for j in i + 1..t.len() {
                assert!(t[j].legacy_pis_cofins_fraction <= t[i].legacy_pis_cofins_fraction);
                assert!(t[j].legacy_icms_iss_fraction <= t[i].legacy_icms_iss_fraction);
                assert!(t[j].cbs_fraction >= t[i].cbs_fraction);
                assert!(t[j].ibs_fraction >= t[i].ibs_fraction);
            }
        }
    }

    #[test]
    fn test_final_phase_is_full_effect() {
        let t = reference_timeline();
        let last = t.last().unwrap();
        assert_eq!(last.legacy_pis_cofins_fraction, Decimal::ZERO);
        assert_eq!(last.legacy_icms_iss_fraction, Decimal::ZERO);
        assert_eq!(last.cbs_fraction, Decimal::ONE);
        assert_eq!(last.ibs_fraction, Decimal::ONE);
    }

    #[test]
    fn test_icms_iss_steps() {
        let t = reference_timeline();
        let p2030 = phase_for_year(&t, 2030).unwrap();
        assert_eq!(p2030.legacy_icms_iss_fraction, dec!(0.80));
        assert_eq!(p2030.ibs_fraction, dec!(0.20));
        assert!(phase_for_year(&t, 2040).is_none());
    }

    #[test]
    fn test_rejects_empty_timeline() {
        assert!(validate_timeline(&[]).is_err());
    }

    #[test]
    fn test_rejects_out_of_order_years() {
        let mut t = reference_timeline();
        t.swap(0, 1);
        assert!(validate_timeline(&t).is_err());
    }

    #[test]
    fn test_rejects_rising_legacy_fraction() {
        let mut t = reference_timeline();
        t[3].legacy_pis_cofins_fraction = dec!(0.5);
        assert!(validate_timeline(&t).is_err());
    }

    #[test]
    fn test_rejects_fraction_above_one() {
        let mut t = reference_timeline();
        t[8].ibs_fraction = dec!(1.2);
        assert!(validate_timeline(&t).is_err());
    }
}
