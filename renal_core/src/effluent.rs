//! Effluent dose and filtration fraction for continuous therapy.
//!
//! Total effluent is the sum of the five volumetric circuit flows. The
//! filtration fraction compares the ultrafiltrate produced across the
//! membrane with the plasma flow reaching it; values above 25% predict
//! filter clotting.

use crate::types::finite;
use crate::Advisory;
use serde::{Deserialize, Serialize};

/// Filtration fraction above this value triggers a clotting-risk warning (%)
pub const FILTRATION_FRACTION_WARNING_PCT: f64 = 25.0;

/// Circuit flows and patient measurements for one effluent calculation.
///
/// An absent flow contributes nothing to the totals (an unconfigured pump
/// delivers no volume), while an absent weight, blood flow, or hematocrit
/// leaves its dependent outputs undefined.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EffluentInputs {
    /// Pre-blood-pump replacement rate (mL/h)
    pub pre_blood_pump_ml_h: Option<f64>,
    /// Pre-filter replacement rate (mL/h)
    pub pre_filter_ml_h: Option<f64>,
    /// Dialysate rate (mL/h)
    pub dialysate_ml_h: Option<f64>,
    /// Post-filter replacement rate (mL/h)
    pub post_filter_ml_h: Option<f64>,
    /// Net ultrafiltration rate (mL/h)
    pub ultrafiltration_ml_h: Option<f64>,
    /// Blood-pump flow (mL/min)
    pub blood_flow_ml_min: Option<f64>,
    /// Hematocrit (%)
    pub hematocrit_pct: Option<f64>,
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
}

/// Derived effluent quantities
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EffluentResult {
    /// Sum of the five circuit flows (mL/h)
    pub total_effluent_ml_h: f64,
    /// Effluent dose (mL/kg/h); undefined without a positive weight
    pub dose_ml_kg_h: Option<f64>,
    /// Filtration fraction (%); undefined without blood flow and hematocrit
    pub filtration_fraction_pct: Option<f64>,
    pub advisories: Vec<Advisory>,
}

/// Compute total effluent, effluent dose, and filtration fraction
pub fn compute_effluent(inputs: &EffluentInputs) -> EffluentResult {
    let pre_blood_pump = finite(inputs.pre_blood_pump_ml_h).unwrap_or(0.0);
    let pre_filter = finite(inputs.pre_filter_ml_h).unwrap_or(0.0);
    let dialysate = finite(inputs.dialysate_ml_h).unwrap_or(0.0);
    let post_filter = finite(inputs.post_filter_ml_h).unwrap_or(0.0);
    let uf = finite(inputs.ultrafiltration_ml_h).unwrap_or(0.0);

    let total_effluent_ml_h = pre_blood_pump + pre_filter + dialysate + post_filter + uf;

    let dose_ml_kg_h = finite(inputs.weight_kg)
        .filter(|w| *w > 0.0)
        .map(|w| total_effluent_ml_h / w);

    let filtration_fraction_pct =
        filtration_fraction(inputs, pre_blood_pump, pre_filter, post_filter, uf);

    let mut advisories = Vec::new();
    if let Some(ff) = filtration_fraction_pct {
        if ff > FILTRATION_FRACTION_WARNING_PCT {
            tracing::debug!("Filtration fraction {:.1}% exceeds warning threshold", ff);
            advisories.push(Advisory::warning(format!(
                "Filtration fraction {:.1}% exceeds {:.0}%: elevated filter clotting risk; \
                 consider more pre-dilution or a higher blood flow",
                ff, FILTRATION_FRACTION_WARNING_PCT
            )));
        }
    }

    EffluentResult {
        total_effluent_ml_h,
        dose_ml_kg_h,
        filtration_fraction_pct,
        advisories,
    }
}

/// FF = 100 × Quf / (plasma flow + pre-dilution), where Quf excludes the
/// dialysate (it never crosses the membrane). Undefined when the plasma-flow
/// denominator is not positive.
fn filtration_fraction(
    inputs: &EffluentInputs,
    pre_blood_pump: f64,
    pre_filter: f64,
    post_filter: f64,
    uf: f64,
) -> Option<f64> {
    let blood_flow = finite(inputs.blood_flow_ml_min).filter(|qb| *qb >= 0.0)?;
    let hematocrit = finite(inputs.hematocrit_pct).filter(|h| (0.0..100.0).contains(h))?;

    let quf = pre_blood_pump + uf + pre_filter + post_filter;
    let plasma_flow_ml_h = blood_flow * 60.0 * (1.0 - hematocrit / 100.0);
    let denom = plasma_flow_ml_h + (pre_blood_pump + pre_filter);

    if denom > 0.0 {
        Some(quf / denom * 100.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    fn base_inputs() -> EffluentInputs {
        EffluentInputs {
            pre_blood_pump_ml_h: Some(1000.0),
            pre_filter_ml_h: Some(500.0),
            dialysate_ml_h: Some(1000.0),
            post_filter_ml_h: Some(200.0),
            ultrafiltration_ml_h: Some(100.0),
            blood_flow_ml_min: Some(150.0),
            hematocrit_pct: Some(30.0),
            weight_kg: Some(70.0),
        }
    }

    #[test]
    fn test_total_is_sum_of_five_flows() {
        let result = compute_effluent(&base_inputs());
        assert_eq!(result.total_effluent_ml_h, 2800.0);
        assert_eq!(result.dose_ml_kg_h, Some(2800.0 / 70.0));
    }

    #[test]
    fn test_all_zero_flows_with_weight_give_zero_dose() {
        let inputs = EffluentInputs {
            weight_kg: Some(70.0),
            ..Default::default()
        };
        let result = compute_effluent(&inputs);
        assert_eq!(result.total_effluent_ml_h, 0.0);
        // Zero is a defined dose, not an undefined one, since weight > 0
        assert_eq!(result.dose_ml_kg_h, Some(0.0));
    }

    #[test]
    fn test_dose_undefined_without_positive_weight() {
        let mut inputs = base_inputs();
        inputs.weight_kg = None;
        assert_eq!(compute_effluent(&inputs).dose_ml_kg_h, None);

        inputs.weight_kg = Some(0.0);
        assert_eq!(compute_effluent(&inputs).dose_ml_kg_h, None);

        inputs.weight_kg = Some(-4.0);
        assert_eq!(compute_effluent(&inputs).dose_ml_kg_h, None);
    }

    #[test]
    fn test_filtration_fraction_closed_form() {
        let result = compute_effluent(&base_inputs());
        // Quf = 1000 + 100 + 500 + 200 = 1800
        // denom = 150*60*(1-0.30) + (1000+500) = 6300 + 1500 = 7800
        let expected = 1800.0 / 7800.0 * 100.0;
        let ff = result.filtration_fraction_pct.unwrap();
        assert!((ff - expected).abs() < 1e-9);
    }

    #[test]
    fn test_filtration_fraction_undefined_without_blood_flow() {
        let mut inputs = base_inputs();
        inputs.blood_flow_ml_min = None;
        assert_eq!(compute_effluent(&inputs).filtration_fraction_pct, None);
    }

    #[test]
    fn test_filtration_fraction_undefined_when_denominator_not_positive() {
        let inputs = EffluentInputs {
            ultrafiltration_ml_h: Some(100.0),
            blood_flow_ml_min: Some(0.0),
            hematocrit_pct: Some(30.0),
            ..Default::default()
        };
        assert_eq!(compute_effluent(&inputs).filtration_fraction_pct, None);
    }

    #[test]
    fn test_warning_emitted_only_above_threshold() {
        // High UF against a low blood flow pushes FF above 25%
        let inputs = EffluentInputs {
            ultrafiltration_ml_h: Some(2000.0),
            blood_flow_ml_min: Some(100.0),
            hematocrit_pct: Some(30.0),
            weight_kg: Some(70.0),
            ..Default::default()
        };
        let result = compute_effluent(&inputs);
        assert!(result.filtration_fraction_pct.unwrap() > 25.0);
        assert_eq!(result.advisories.len(), 1);
        assert_eq!(result.advisories[0].severity, Severity::Warning);

        let calm = compute_effluent(&base_inputs());
        assert!(calm.filtration_fraction_pct.unwrap() <= 25.0);
        assert!(calm.advisories.is_empty());
    }

    #[test]
    fn test_nan_input_does_not_poison_result() {
        let mut inputs = base_inputs();
        inputs.dialysate_ml_h = Some(f64::NAN);
        let result = compute_effluent(&inputs);
        // NaN flow is treated as not provided
        assert_eq!(result.total_effluent_ml_h, 1800.0);
        assert!(result.filtration_fraction_pct.is_some());
    }
}
