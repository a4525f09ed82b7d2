//! SLED (sustained low-efficiency dialysis) session dosing.
//!
//! Estimates the dialysate flow from the blood flow, derives the delivered
//! dose (Kt/V, urea removal), the ultrafiltration rates, the bath-vs-patient
//! sodium gradient, the bicarbonate load, and tiered advisory commentary.

use crate::adequacy::{
    self, distribution_volume_l, kt_liters, urea_removal_pct, Modality,
};
use crate::types::finite;
use crate::Advisory;
use serde::{Deserialize, Serialize};

/// Dialysate flow is estimated as this multiple of the blood flow...
pub const SLED_QD_RATIO: f64 = 1.5;
/// ...clamped into the machine's SLED window (mL/min)
pub const SLED_QD_MIN_ML_MIN: f64 = 100.0;
pub const SLED_QD_MAX_ML_MIN: f64 = 300.0;

/// Session and bath parameters for one SLED dosing calculation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SledInputs {
    /// Blood-pump flow (mL/min)
    pub blood_flow_ml_min: Option<f64>,
    /// Session duration (h)
    pub duration_h: Option<f64>,
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Planned total ultrafiltration (mL)
    pub total_uf_ml: Option<f64>,
    /// Bath sodium (mEq/L)
    pub bath_sodium_meq_l: Option<f64>,
    /// Patient sodium (mEq/L)
    pub patient_sodium_meq_l: Option<f64>,
    /// Bath bicarbonate (mmol/L)
    pub bath_bicarbonate_mmol_l: Option<f64>,
    /// Patient bicarbonate (mmol/L)
    pub patient_bicarbonate_mmol_l: Option<f64>,
    /// Patient potassium (mmol/L)
    pub patient_potassium_mmol_l: Option<f64>,
}

/// Direction of the bath-vs-patient sodium gradient
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SodiumTrend {
    /// Bath above patient: sodium loading, favours hemodynamic stability
    Positive,
    /// Bath below patient: net sodium removal
    Negative,
    Isonatremic,
}

/// Derived SLED session quantities; undefined inputs propagate as `None`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SledResult {
    /// Estimated dialysate flow (mL/min)
    pub qd_ml_min: Option<f64>,
    pub kt_l: Option<f64>,
    pub distribution_volume_l: Option<f64>,
    pub ktv: Option<f64>,
    pub urea_removal_pct: Option<f64>,
    pub uf_ml_h: Option<f64>,
    pub uf_ml_kg_h: Option<f64>,
    /// Bath minus patient sodium (mEq/L)
    pub sodium_gradient_meq_l: Option<f64>,
    pub sodium_trend: Option<SodiumTrend>,
    /// Bicarbonate transferred over the session (mmol)
    pub bicarbonate_load_mmol: Option<f64>,
    pub advisories: Vec<Advisory>,
}

/// Compute the dose and commentary for one SLED session
pub fn compute_sled(inputs: &SledInputs) -> SledResult {
    let blood_flow = finite(inputs.blood_flow_ml_min).filter(|qb| *qb > 0.0);
    let duration = finite(inputs.duration_h).filter(|d| *d > 0.0);
    let weight = finite(inputs.weight_kg).filter(|w| *w > 0.0);
    let total_uf = finite(inputs.total_uf_ml);

    let qd_ml_min = blood_flow
        .map(|qb| (qb * SLED_QD_RATIO).clamp(SLED_QD_MIN_ML_MIN, SLED_QD_MAX_ML_MIN));

    let kt_l = match (qd_ml_min, duration) {
        (Some(qd), Some(d)) => Some(kt_liters(qd, d)),
        _ => None,
    };
    let v_l = weight.map(distribution_volume_l);
    let ktv = match (kt_l, v_l) {
        (Some(kt), Some(v)) => adequacy::ktv(kt, v),
        _ => None,
    };
    let removal = ktv.map(urea_removal_pct);

    let uf_ml_h = match (total_uf, duration) {
        (Some(uf), Some(d)) => Some(uf / d),
        _ => None,
    };
    let uf_ml_kg_h = match (uf_ml_h, weight) {
        (Some(rate), Some(w)) => Some(rate / w),
        _ => None,
    };

    let bath_na = finite(inputs.bath_sodium_meq_l);
    let patient_na = finite(inputs.patient_sodium_meq_l);
    let sodium_gradient_meq_l = match (bath_na, patient_na) {
        (Some(bath), Some(patient)) => Some(bath - patient),
        _ => None,
    };
    let sodium_trend = sodium_gradient_meq_l.map(|g| {
        if g > 0.0 {
            SodiumTrend::Positive
        } else if g < 0.0 {
            SodiumTrend::Negative
        } else {
            SodiumTrend::Isonatremic
        }
    });

    // (bath − patient) HCO3 × Qd in L/h × duration -> mmol over the session
    let bicarbonate_load_mmol = match (
        finite(inputs.bath_bicarbonate_mmol_l),
        finite(inputs.patient_bicarbonate_mmol_l),
        qd_ml_min,
        duration,
    ) {
        (Some(bath), Some(patient), Some(qd), Some(d)) => {
            Some((bath - patient) * (qd * 60.0 / 1000.0) * d)
        }
        _ => None,
    };

    let mut advisories = Vec::new();
    if let Some(rate) = uf_ml_kg_h {
        advisories.push(adequacy::uf_commentary(Modality::Sled, rate));
    }
    if let Some(ktv) = ktv {
        advisories.push(adequacy::ktv_commentary(Modality::Sled, ktv));
    }
    if let Some(trend) = sodium_trend {
        advisories.push(sodium_commentary(trend));
    }
    if let Some(k) = finite(inputs.patient_potassium_mmol_l) {
        advisories.push(potassium_commentary(k));
    }

    SledResult {
        qd_ml_min,
        kt_l,
        distribution_volume_l: v_l,
        ktv,
        urea_removal_pct: removal,
        uf_ml_h,
        uf_ml_kg_h,
        sodium_gradient_meq_l,
        sodium_trend,
        bicarbonate_load_mmol,
        advisories,
    }
}

fn sodium_commentary(trend: SodiumTrend) -> Advisory {
    match trend {
        SodiumTrend::Positive => Advisory::info(
            "Bath sodium above patient: positive gradient, favours intradialytic stability",
        ),
        SodiumTrend::Negative => Advisory::info(
            "Bath sodium below patient: net sodium removal, watch blood pressure",
        ),
        SodiumTrend::Isonatremic => Advisory::info("Bath is isonatric with the patient"),
    }
}

/// Fixed potassium-bath tiers on the patient's potassium
fn potassium_commentary(patient_k_mmol_l: f64) -> Advisory {
    if patient_k_mmol_l > 5.5 {
        Advisory::info("Hyperkalemia: use a 2 mmol/L potassium bath")
    } else if patient_k_mmol_l >= 3.5 {
        Advisory::info("Normokalemia: a 3 mmol/L potassium bath is appropriate")
    } else {
        Advisory::warning(
            "Hypokalemia: use a 4 mmol/L potassium bath and monitor potassium closely",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    fn base_inputs() -> SledInputs {
        SledInputs {
            blood_flow_ml_min: Some(150.0),
            duration_h: Some(8.0),
            weight_kg: Some(70.0),
            total_uf_ml: Some(2000.0),
            bath_sodium_meq_l: Some(140.0),
            patient_sodium_meq_l: Some(132.0),
            bath_bicarbonate_mmol_l: Some(32.0),
            patient_bicarbonate_mmol_l: Some(18.0),
            patient_potassium_mmol_l: Some(4.2),
        }
    }

    #[test]
    fn test_qd_ratio_and_clamps() {
        let result = compute_sled(&base_inputs());
        // 150 × 1.5 = 225, inside the window
        assert_eq!(result.qd_ml_min, Some(225.0));

        let mut low = base_inputs();
        low.blood_flow_ml_min = Some(50.0);
        assert_eq!(compute_sled(&low).qd_ml_min, Some(SLED_QD_MIN_ML_MIN));

        let mut high = base_inputs();
        high.blood_flow_ml_min = Some(400.0);
        assert_eq!(compute_sled(&high).qd_ml_min, Some(SLED_QD_MAX_ML_MIN));
    }

    #[test]
    fn test_dose_chain() {
        let result = compute_sled(&base_inputs());
        // Kt = 225 × 60 × 8 / 1000 = 108 L; V = 38.5 L
        assert!((result.kt_l.unwrap() - 108.0).abs() < 1e-9);
        assert!((result.distribution_volume_l.unwrap() - 38.5).abs() < 1e-9);
        let ktv = result.ktv.unwrap();
        assert!((ktv - 108.0 / 38.5).abs() < 1e-9);
        let removal = result.urea_removal_pct.unwrap();
        assert!((removal - (1.0 - (-ktv).exp()) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_uf_rates() {
        let result = compute_sled(&base_inputs());
        assert!((result.uf_ml_h.unwrap() - 250.0).abs() < 1e-9);
        assert!((result.uf_ml_kg_h.unwrap() - 250.0 / 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_sodium_gradient_and_trend() {
        let result = compute_sled(&base_inputs());
        assert_eq!(result.sodium_gradient_meq_l, Some(8.0));
        assert_eq!(result.sodium_trend, Some(SodiumTrend::Positive));

        let mut removal = base_inputs();
        removal.bath_sodium_meq_l = Some(135.0);
        removal.patient_sodium_meq_l = Some(140.0);
        assert_eq!(
            compute_sled(&removal).sodium_trend,
            Some(SodiumTrend::Negative)
        );
    }

    #[test]
    fn test_bicarbonate_load() {
        let result = compute_sled(&base_inputs());
        // (32 − 18) × (225 × 60 / 1000) L/h × 8 h = 14 × 13.5 × 8
        let expected = 14.0 * 13.5 * 8.0;
        assert!((result.bicarbonate_load_mmol.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_missing_weight_propagates() {
        let mut inputs = base_inputs();
        inputs.weight_kg = None;
        let result = compute_sled(&inputs);
        // Kt is still defined, everything downstream of V is not
        assert!(result.kt_l.is_some());
        assert!(result.distribution_volume_l.is_none());
        assert!(result.ktv.is_none());
        assert!(result.urea_removal_pct.is_none());
        assert!(result.uf_ml_kg_h.is_none());
    }

    #[test]
    fn test_missing_duration_propagates() {
        let mut inputs = base_inputs();
        inputs.duration_h = None;
        let result = compute_sled(&inputs);
        assert!(result.kt_l.is_none());
        assert!(result.ktv.is_none());
        assert!(result.uf_ml_h.is_none());
        assert!(result.bicarbonate_load_mmol.is_none());
    }

    #[test]
    fn test_potassium_tiers() {
        let mut inputs = base_inputs();

        inputs.patient_potassium_mmol_l = Some(6.0);
        let high = compute_sled(&inputs);
        assert!(high.advisories.iter().any(|a| a.text.contains("2 mmol/L")));

        inputs.patient_potassium_mmol_l = Some(3.0);
        let low = compute_sled(&inputs);
        assert!(low
            .advisories
            .iter()
            .any(|a| a.severity == Severity::Warning && a.text.contains("4 mmol/L")));
    }
}
