//! Conventional intermittent hemodialysis session dosing.
//!
//! Same dose chain as SLED but judged against conventional-HD thresholds,
//! with the dialysate flow taken from the prescription when available and
//! otherwise estimated from the blood flow.

use crate::adequacy::{
    self, distribution_volume_l, kt_liters, urea_removal_pct, Modality,
};
use crate::types::finite;
use crate::Advisory;
use serde::{Deserialize, Serialize};

/// Dialysate flow heuristic when Qd is not prescribed: this multiple of the
/// blood flow...
pub const HD_QD_RATIO: f64 = 1.5;
/// ...clamped into the conventional window (mL/min)
pub const HD_QD_MIN_ML_MIN: f64 = 300.0;
pub const HD_QD_MAX_ML_MIN: f64 = 500.0;

/// Session parameters for one conventional-HD dosing calculation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HemodialysisInputs {
    /// Blood-pump flow (mL/min)
    pub blood_flow_ml_min: Option<f64>,
    /// Prescribed dialysate flow (mL/min); estimated from blood flow when
    /// absent
    pub dialysate_flow_ml_min: Option<f64>,
    /// Session duration (h)
    pub duration_h: Option<f64>,
    /// Body weight (kg)
    pub weight_kg: Option<f64>,
    /// Planned total ultrafiltration (mL)
    pub total_uf_ml: Option<f64>,
}

/// Derived conventional-HD session quantities
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HemodialysisResult {
    /// Dialysate flow used for the dose (mL/min)
    pub qd_ml_min: Option<f64>,
    /// Whether the dialysate flow was estimated rather than prescribed
    pub qd_estimated: bool,
    pub kt_l: Option<f64>,
    pub distribution_volume_l: Option<f64>,
    pub ktv: Option<f64>,
    pub urea_removal_pct: Option<f64>,
    pub uf_ml_h: Option<f64>,
    pub uf_ml_kg_h: Option<f64>,
    pub advisories: Vec<Advisory>,
}

/// Compute the dose and commentary for one conventional-HD session
pub fn compute_hemodialysis(inputs: &HemodialysisInputs) -> HemodialysisResult {
    let duration = finite(inputs.duration_h).filter(|d| *d > 0.0);
    let weight = finite(inputs.weight_kg).filter(|w| *w > 0.0);
    let total_uf = finite(inputs.total_uf_ml);

    let prescribed_qd = finite(inputs.dialysate_flow_ml_min).filter(|qd| *qd > 0.0);
    let estimated_qd = finite(inputs.blood_flow_ml_min)
        .filter(|qb| *qb > 0.0)
        .map(|qb| (qb * HD_QD_RATIO).clamp(HD_QD_MIN_ML_MIN, HD_QD_MAX_ML_MIN));
    let qd_estimated = prescribed_qd.is_none();
    let qd_ml_min = prescribed_qd.or(estimated_qd);
    if qd_estimated {
        if let Some(qd) = qd_ml_min {
            tracing::debug!("Dialysate flow estimated from blood flow: {} mL/min", qd);
        }
    }

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

    let mut advisories = Vec::new();
    if let Some(rate) = uf_ml_kg_h {
        advisories.push(adequacy::uf_commentary(Modality::Hemodialysis, rate));
    }
    if let Some(ktv) = ktv {
        advisories.push(adequacy::ktv_commentary(Modality::Hemodialysis, ktv));
    }

    HemodialysisResult {
        qd_ml_min,
        qd_estimated,
        kt_l,
        distribution_volume_l: v_l,
        ktv,
        urea_removal_pct: removal,
        uf_ml_h,
        uf_ml_kg_h,
        advisories,
    }
}
