//! Weight-indexed starting prescriptions per anticoagulation strategy.
//!
//! Citrate circuits start from a fixed nine-row table indexed by body
//! weight; heparin and no-anticoagulation circuits scale linearly from
//! weight.

use crate::config::{DosingConfig, HeparinConfig};
use serde::{Deserialize, Serialize};

/// One row of the citrate starting-prescription table
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightPrescriptionRow {
    pub weight_kg: f64,
    pub blood_flow_ml_min: f64,
    pub dialysate_ml_h: f64,
    pub post_filter_ml_h: f64,
    pub effluent_dose_ml_kg_h: f64,
}

/// Lowest weight the citrate table covers (kg); below it there is no
/// prescription, extrapolation is not attempted
pub const CITRATE_TABLE_MIN_WEIGHT_KG: f64 = 50.0;

/// Citrate starting prescriptions, ordered by weight ascending
pub const CITRATE_TABLE: [WeightPrescriptionRow; 9] = [
    WeightPrescriptionRow { weight_kg: 50.0, blood_flow_ml_min: 100.0, dialysate_ml_h: 1000.0, post_filter_ml_h: 200.0, effluent_dose_ml_kg_h: 28.0 },
    WeightPrescriptionRow { weight_kg: 60.0, blood_flow_ml_min: 110.0, dialysate_ml_h: 1200.0, post_filter_ml_h: 250.0, effluent_dose_ml_kg_h: 27.0 },
    WeightPrescriptionRow { weight_kg: 70.0, blood_flow_ml_min: 120.0, dialysate_ml_h: 1400.0, post_filter_ml_h: 300.0, effluent_dose_ml_kg_h: 26.0 },
    WeightPrescriptionRow { weight_kg: 80.0, blood_flow_ml_min: 130.0, dialysate_ml_h: 1600.0, post_filter_ml_h: 350.0, effluent_dose_ml_kg_h: 25.0 },
    WeightPrescriptionRow { weight_kg: 90.0, blood_flow_ml_min: 140.0, dialysate_ml_h: 1800.0, post_filter_ml_h: 400.0, effluent_dose_ml_kg_h: 25.0 },
    WeightPrescriptionRow { weight_kg: 100.0, blood_flow_ml_min: 150.0, dialysate_ml_h: 2000.0, post_filter_ml_h: 450.0, effluent_dose_ml_kg_h: 24.0 },
    WeightPrescriptionRow { weight_kg: 110.0, blood_flow_ml_min: 160.0, dialysate_ml_h: 2200.0, post_filter_ml_h: 500.0, effluent_dose_ml_kg_h: 24.0 },
    WeightPrescriptionRow { weight_kg: 120.0, blood_flow_ml_min: 170.0, dialysate_ml_h: 2400.0, post_filter_ml_h: 550.0, effluent_dose_ml_kg_h: 23.0 },
    WeightPrescriptionRow { weight_kg: 130.0, blood_flow_ml_min: 180.0, dialysate_ml_h: 2600.0, post_filter_ml_h: 600.0, effluent_dose_ml_kg_h: 23.0 },
];

/// Result of a citrate table lookup
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "status", content = "row")]
pub enum CitrateLookup {
    Matched(WeightPrescriptionRow),
    /// Weight below the table minimum; no extrapolation
    OutOfRange,
}

/// Select the citrate table row nearest to the given weight.
///
/// Ties go to the smaller weight (the first row encountered in ascending
/// order). Weights above the last row still match it; weights below the
/// table minimum are out of range.
pub fn citrate_prescription(weight_kg: f64) -> CitrateLookup {
    if !weight_kg.is_finite() || weight_kg < CITRATE_TABLE_MIN_WEIGHT_KG {
        tracing::debug!("Weight {} below citrate table range", weight_kg);
        return CitrateLookup::OutOfRange;
    }

    let mut best = CITRATE_TABLE[0];
    for row in CITRATE_TABLE.iter().skip(1) {
        // Strict comparison keeps the earlier (lighter) row on ties
        if (row.weight_kg - weight_kg).abs() < (best.weight_kg - weight_kg).abs() {
            best = *row;
        }
    }
    CitrateLookup::Matched(best)
}

/// A dose expressed as a clinical range
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DoseRange {
    pub min: f64,
    pub max: f64,
}

/// Weight-scaled starting prescription for heparin or no-anticoagulation
/// circuits
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinearPrescription {
    /// Loading bolus (UI); heparin only
    pub bolus_ui: Option<DoseRange>,
    /// Continuous infusion (UI/h); heparin only
    pub continuous_ui_h: Option<f64>,
    /// Effluent dose target (mL/h)
    pub effluent_target_ml_h: DoseRange,
    /// Dialysate share of the effluent target (mL/h)
    pub dialysate_ml_h: DoseRange,
    /// Replacement share of the effluent target (mL/h)
    pub replacement_ml_h: DoseRange,
}

/// Starting prescription for a heparin circuit; undefined without a
/// positive weight
pub fn heparin_prescription(
    weight_kg: f64,
    heparin: &HeparinConfig,
    dosing: &DosingConfig,
) -> Option<LinearPrescription> {
    let base = flow_targets(weight_kg, dosing)?;
    Some(LinearPrescription {
        bolus_ui: Some(DoseRange {
            min: heparin.bolus_ui_per_kg_min * weight_kg,
            max: heparin.bolus_ui_per_kg_max * weight_kg,
        }),
        continuous_ui_h: Some(heparin.increased_ui_per_kg_h * weight_kg),
        ..base
    })
}

/// Starting prescription for a circuit run without anticoagulation
pub fn no_anticoagulation_prescription(
    weight_kg: f64,
    dosing: &DosingConfig,
) -> Option<LinearPrescription> {
    flow_targets(weight_kg, dosing)
}

/// Effluent target and its 2/3 dialysate + 1/3 replacement split
fn flow_targets(weight_kg: f64, dosing: &DosingConfig) -> Option<LinearPrescription> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return None;
    }
    let effluent = DoseRange {
        min: dosing.effluent_target_ml_kg_h_min * weight_kg,
        max: dosing.effluent_target_ml_kg_h_max * weight_kg,
    };
    Some(LinearPrescription {
        bolus_ui: None,
        continuous_ui_h: None,
        effluent_target_ml_h: effluent,
        dialysate_ml_h: DoseRange {
            min: effluent.min * 2.0 / 3.0,
            max: effluent.max * 2.0 / 3.0,
        },
        replacement_ml_h: DoseRange {
            min: effluent.min / 3.0,
            max: effluent.max / 3.0,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_ascending_and_complete() {
        assert_eq!(CITRATE_TABLE.len(), 9);
        assert_eq!(CITRATE_TABLE[0].weight_kg, CITRATE_TABLE_MIN_WEIGHT_KG);
        for pair in CITRATE_TABLE.windows(2) {
            assert!(pair[0].weight_kg < pair[1].weight_kg);
            // Flows never decrease with weight
            assert!(pair[0].blood_flow_ml_min <= pair[1].blood_flow_ml_min);
            assert!(pair[0].dialysate_ml_h <= pair[1].dialysate_ml_h);
        }
    }

    #[test]
    fn test_exact_weight_matches_its_row() {
        match citrate_prescription(70.0) {
            CitrateLookup::Matched(row) => assert_eq!(row.weight_kg, 70.0),
            CitrateLookup::OutOfRange => panic!("70 kg must match"),
        }
    }

    #[test]
    fn test_tie_goes_to_lower_weight() {
        // 75 kg is 5 kg from both the 70 and 80 rows: the lighter row wins
        match citrate_prescription(75.0) {
            CitrateLookup::Matched(row) => assert_eq!(row.weight_kg, 70.0),
            CitrateLookup::OutOfRange => panic!("75 kg must match"),
        }
    }

    #[test]
    fn test_below_minimum_is_out_of_range() {
        assert_eq!(citrate_prescription(49.0), CitrateLookup::OutOfRange);
        assert_eq!(citrate_prescription(0.0), CitrateLookup::OutOfRange);
        assert_eq!(citrate_prescription(f64::NAN), CitrateLookup::OutOfRange);
    }

    #[test]
    fn test_no_extrapolation_above_last_row() {
        for weight in [130.0, 200.0, 1000.0] {
            match citrate_prescription(weight) {
                CitrateLookup::Matched(row) => assert_eq!(row.weight_kg, 130.0),
                CitrateLookup::OutOfRange => panic!("{} kg must match last row", weight),
            }
        }
    }

    #[test]
    fn test_heparin_prescription_scales_with_weight() {
        let rx = heparin_prescription(70.0, &HeparinConfig::default(), &DosingConfig::default())
            .unwrap();
        let bolus = rx.bolus_ui.unwrap();
        assert_eq!(bolus.min, 25.0 * 70.0);
        assert_eq!(bolus.max, 30.0 * 70.0);
        assert_eq!(rx.continuous_ui_h, Some(700.0));
        assert_eq!(rx.effluent_target_ml_h.min, 1750.0);
        assert_eq!(rx.effluent_target_ml_h.max, 2100.0);
    }

    #[test]
    fn test_flow_split_is_two_thirds_one_third() {
        let rx = no_anticoagulation_prescription(60.0, &DosingConfig::default()).unwrap();
        assert!(rx.bolus_ui.is_none());
        assert!(rx.continuous_ui_h.is_none());
        let total = rx.effluent_target_ml_h;
        assert!((rx.dialysate_ml_h.min - total.min * 2.0 / 3.0).abs() < 1e-9);
        assert!((rx.replacement_ml_h.min - total.min / 3.0).abs() < 1e-9);
        assert!(
            (rx.dialysate_ml_h.max + rx.replacement_ml_h.max - total.max).abs() < 1e-9
        );
    }

    #[test]
    fn test_linear_prescriptions_need_positive_weight() {
        let heparin = HeparinConfig::default();
        let dosing = DosingConfig::default();
        assert!(heparin_prescription(0.0, &heparin, &dosing).is_none());
        assert!(heparin_prescription(-10.0, &heparin, &dosing).is_none());
        assert!(no_anticoagulation_prescription(f64::NAN, &dosing).is_none());
    }
}
