//! Shared dialysis-dose math for intermittent modalities.
//!
//! Clearance is approximated by the dialysate flow, so the delivered dose
//! reduces to Kt/V with V estimated from body weight, and fractional urea
//! removal follows from the single-pool exponential. SLED and conventional
//! HD judge the same numbers against different clinical thresholds; the two
//! tier tables are deliberately separate.

use crate::Advisory;
use serde::{Deserialize, Serialize};

/// Urea distribution volume fraction of body weight (L/kg)
pub const DISTRIBUTION_VOLUME_L_PER_KG: f64 = 0.55;

/// UF below this is well tolerated (mL/kg/h)
pub const UF_WELL_TOLERATED_MAX: f64 = 10.0;
/// UF between the tolerated maximum and this is borderline (mL/kg/h)
pub const UF_UPPER_LIMIT_MAX: f64 = 13.0;

// SLED tolerates lower per-session doses than conventional HD; the two
// threshold sets must not be unified.
pub const SLED_KTV_LOW: f64 = 1.2;
pub const SLED_KTV_VERY_HIGH: f64 = 3.0;

pub const HD_KTV_LOW: f64 = 1.0;
pub const HD_KTV_BORDERLINE: f64 = 1.2;
pub const HD_KTV_HIGH: f64 = 1.6;

/// Intermittent dialysis modality
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Sled,
    Hemodialysis,
}

/// Urea distribution volume (L) from body weight (kg)
pub fn distribution_volume_l(weight_kg: f64) -> f64 {
    DISTRIBUTION_VOLUME_L_PER_KG * weight_kg
}

/// Total clearance Kt (L): K ≈ Qd, integrated over the session
pub fn kt_liters(qd_ml_min: f64, duration_h: f64) -> f64 {
    qd_ml_min * 60.0 * duration_h / 1000.0
}

/// Kt/V; undefined for a non-positive distribution volume
pub fn ktv(kt_l: f64, v_l: f64) -> Option<f64> {
    if v_l > 0.0 {
        Some(kt_l / v_l)
    } else {
        None
    }
}

/// Fractional urea removal (%) from Kt/V: 1 − e^(−Kt/V)
pub fn urea_removal_pct(ktv: f64) -> f64 {
    (1.0 - (-ktv).exp()) * 100.0
}

/// Tiered commentary on the ultrafiltration rate (mL/kg/h)
pub fn uf_commentary(modality: Modality, uf_ml_kg_h: f64) -> Advisory {
    if uf_ml_kg_h <= UF_WELL_TOLERATED_MAX {
        Advisory::info(format!(
            "UF {:.1} mL/kg/h is usually well tolerated",
            uf_ml_kg_h
        ))
    } else if uf_ml_kg_h <= UF_UPPER_LIMIT_MAX {
        Advisory::warning(format!(
            "UF {:.1} mL/kg/h is at the upper limit: monitor hemodynamics closely",
            uf_ml_kg_h
        ))
    } else {
        match modality {
            Modality::Sled => Advisory::warning(format!(
                "UF {:.1} mL/kg/h is excessive: reduce the target or prolong the session",
                uf_ml_kg_h
            )),
            Modality::Hemodialysis => Advisory::warning(format!(
                "UF {:.1} mL/kg/h increases intradialytic hypotension risk",
                uf_ml_kg_h
            )),
        }
    }
}

/// Tiered commentary on the delivered Kt/V, per modality
pub fn ktv_commentary(modality: Modality, ktv: f64) -> Advisory {
    match modality {
        Modality::Sled => {
            if ktv < SLED_KTV_LOW {
                Advisory::warning(format!(
                    "Kt/V {:.2} is low for a SLED session: extend duration or raise flows",
                    ktv
                ))
            } else if ktv <= SLED_KTV_VERY_HIGH {
                Advisory::info(format!("Kt/V {:.2} is adequate for an extended session", ktv))
            } else {
                Advisory::warning(format!(
                    "Kt/V {:.2} is very high: check inputs and watch for disequilibrium",
                    ktv
                ))
            }
        }
        Modality::Hemodialysis => {
            if ktv < HD_KTV_LOW {
                Advisory::warning(format!("Kt/V {:.2} is low: the session underdoses", ktv))
            } else if ktv < HD_KTV_BORDERLINE {
                Advisory::warning(format!(
                    "Kt/V {:.2} is borderline-low: consider a longer session",
                    ktv
                ))
            } else if ktv <= HD_KTV_HIGH {
                Advisory::info(format!("Kt/V {:.2} is adequate", ktv))
            } else {
                Advisory::info(format!("Kt/V {:.2} is high", ktv))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;

    #[test]
    fn test_reference_ktv_and_urea_removal() {
        // Kt = 10 L, V = 40 L -> Kt/V = 0.25, removal ≈ 22.1%
        let ktv = ktv(10.0, 40.0).unwrap();
        assert!((ktv - 0.25).abs() < 1e-12);
        let removal = urea_removal_pct(ktv);
        assert!((removal - 22.119921692859512).abs() < 1e-9);
    }

    #[test]
    fn test_zero_ktv_removes_nothing() {
        assert_eq!(urea_removal_pct(0.0), 0.0);
    }

    #[test]
    fn test_ktv_undefined_without_volume() {
        assert!(ktv(10.0, 0.0).is_none());
        assert!(ktv(10.0, -5.0).is_none());
    }

    #[test]
    fn test_kt_integration() {
        // 200 mL/min for 4 h = 48 L
        assert!((kt_liters(200.0, 4.0) - 48.0).abs() < 1e-9);
        assert!((distribution_volume_l(70.0) - 38.5).abs() < 1e-9);
    }

    #[test]
    fn test_uf_tiers() {
        for modality in [Modality::Sled, Modality::Hemodialysis] {
            assert_eq!(uf_commentary(modality, 8.0).severity, Severity::Info);
            assert_eq!(uf_commentary(modality, 10.0).severity, Severity::Info);
            assert_eq!(uf_commentary(modality, 12.0).severity, Severity::Warning);
            assert_eq!(uf_commentary(modality, 14.0).severity, Severity::Warning);
        }
        // Wording differs per modality above the upper limit
        assert!(uf_commentary(Modality::Sled, 14.0).text.contains("prolong"));
        assert!(uf_commentary(Modality::Hemodialysis, 14.0)
            .text
            .contains("hypotension"));
    }

    #[test]
    fn test_sled_and_hd_ktv_thresholds_differ() {
        // 1.1 is low for HD thresholds but also low for SLED; 1.3 separates them
        let sled = ktv_commentary(Modality::Sled, 1.3);
        assert_eq!(sled.severity, Severity::Info);

        let hd = ktv_commentary(Modality::Hemodialysis, 1.1);
        assert_eq!(hd.severity, Severity::Warning);
        assert!(hd.text.contains("borderline"));

        // Very high only exists for SLED; HD calls 1.7 merely high
        assert_eq!(ktv_commentary(Modality::Sled, 3.5).severity, Severity::Warning);
        assert_eq!(
            ktv_commentary(Modality::Hemodialysis, 1.7).severity,
            Severity::Info
        );
    }
}
