//! Sodium correction of the replacement bags during continuous therapy.
//!
//! Two independent sub-models, each with a bag-adjustment formula and a
//! continuous-infusion formula:
//! - Hypernatremia: raise bag sodium with NaCl 20%, or run hypertonic 3%
//!   saline against the effluent.
//! - Hyponatremia: lower bag tonicity with free water, or run an isotonic
//!   dextrose infusion against the effluent.

use crate::config::SolutionsConfig;
use crate::types::finite;
use serde::{Deserialize, Serialize};

// ============================================================================
// Hypernatremia
// ============================================================================

/// Inputs for the hypernatremia sub-model
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HypernatremiaInputs {
    /// Sodium the bags should be brought to (mEq/L)
    pub target_sodium_meq_l: Option<f64>,
    /// Current effluent dose (mL/h), used by the infusion formula
    pub effluent_rate_ml_h: Option<f64>,
}

/// Hypernatremia corrections; each field undefined on missing or invalid
/// parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HypernatremiaResult {
    /// NaCl 20% to add to each bag (mL)
    pub nacl20_bag_volume_ml: Option<f64>,
    /// Hypertonic 3% saline infusion rate (mL/h)
    pub saline3_infusion_ml_h: Option<f64>,
}

/// Compute both hypernatremia corrections
pub fn correct_hypernatremia(
    inputs: &HypernatremiaInputs,
    solutions: &SolutionsConfig,
) -> HypernatremiaResult {
    let target = finite(inputs.target_sodium_meq_l);
    let effluent = finite(inputs.effluent_rate_ml_h);

    // mL of NaCl 20% = V(L) × (Na_target − Na_bag) / strength(mEq/mL)
    let nacl20_bag_volume_ml = target.and_then(|t| {
        if solutions.nacl20_meq_per_ml > 0.0 {
            Some(solutions.bag_volume_l * (t - solutions.bag_sodium_meq_l)
                / solutions.nacl20_meq_per_ml)
        } else {
            None
        }
    });

    // Rate = (Na_target − Na_bag) / (Na_3% − Na_target) × effluent
    let saline3_infusion_ml_h = match (target, effluent) {
        (Some(t), Some(e)) => {
            let denom = solutions.nacl3_sodium_meq_l - t;
            if denom == 0.0 {
                tracing::debug!("3% saline denominator is zero, reporting invalid parameters");
                None
            } else {
                Some((t - solutions.bag_sodium_meq_l) / denom * e)
            }
        }
        _ => None,
    };

    HypernatremiaResult {
        nacl20_bag_volume_ml,
        saline3_infusion_ml_h,
    }
}

// ============================================================================
// Hyponatremia
// ============================================================================

/// Inputs for the hyponatremia sub-model
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HyponatremiaInputs {
    /// Sodium the bags should be brought down to (mEq/L)
    pub target_sodium_meq_l: Option<f64>,
    /// Current effluent dose (mL/h), used by the infusion formula
    pub effluent_rate_ml_h: Option<f64>,
}

/// Hyponatremia corrections; each field undefined when the target sodium is
/// missing or not positive
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HyponatremiaResult {
    /// Free water to add to each bag (mL)
    pub water_to_add_ml: Option<f64>,
    /// Bag fluid to exchange for free water (mL), floored at zero
    pub water_replacement_ml: Option<f64>,
    /// Dextrose 5% infusion rate (mL/h)
    pub dextrose_infusion_ml_h: Option<f64>,
}

/// Compute all hyponatremia corrections.
///
/// Water to add uses the free-water dilution relation
/// `V×1000×(Na_bag/Na_target − 1)`: adding that much water to a V-litre bag
/// at Na_bag brings the mixture to Na_target.
pub fn correct_hyponatremia(
    inputs: &HyponatremiaInputs,
    solutions: &SolutionsConfig,
) -> HyponatremiaResult {
    let target = finite(inputs.target_sodium_meq_l).filter(|t| *t > 0.0);
    let effluent = finite(inputs.effluent_rate_ml_h);

    let bag_na = solutions.bag_sodium_meq_l;
    let bag_ml = solutions.bag_volume_l * 1000.0;

    let water_to_add_ml = target.map(|t| bag_ml * (bag_na / t - 1.0));

    // Exchange variant: remove X mL of bag fluid, replace with water, so
    // Na_bag × (V − X) / V = Na_target. Floored at zero for targets at or
    // above the bag sodium.
    let water_replacement_ml = target.map(|t| (bag_ml * (1.0 - t / bag_na)).max(0.0));

    let dextrose_infusion_ml_h = match (target, effluent) {
        (Some(t), Some(e)) => Some((bag_na - t) / t * e),
        _ => None,
    };

    HyponatremiaResult {
        water_to_add_ml,
        water_replacement_ml,
        dextrose_infusion_ml_h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solutions() -> SolutionsConfig {
        SolutionsConfig::default()
    }

    #[test]
    fn test_hypernatremia_bag_adjustment() {
        let inputs = HypernatremiaInputs {
            target_sodium_meq_l: Some(150.0),
            effluent_rate_ml_h: None,
        };
        let result = correct_hypernatremia(&inputs, &solutions());

        // 5 L × (150 − 140) / 3.4 mEq/mL
        let expected = 5.0 * 10.0 / 3.4;
        assert!((result.nacl20_bag_volume_ml.unwrap() - expected).abs() < 1e-9);
        assert!(result.saline3_infusion_ml_h.is_none());
    }

    #[test]
    fn test_hypernatremia_bag_invalid_strength() {
        let mut sol = solutions();
        sol.nacl20_meq_per_ml = 0.0;
        let inputs = HypernatremiaInputs {
            target_sodium_meq_l: Some(150.0),
            effluent_rate_ml_h: None,
        };
        assert!(correct_hypernatremia(&inputs, &sol)
            .nacl20_bag_volume_ml
            .is_none());
    }

    #[test]
    fn test_hypernatremia_infusion() {
        let inputs = HypernatremiaInputs {
            target_sodium_meq_l: Some(150.0),
            effluent_rate_ml_h: Some(2000.0),
        };
        let result = correct_hypernatremia(&inputs, &solutions());

        // (150 − 140) / (513 − 150) × 2000
        let expected = 10.0 / 363.0 * 2000.0;
        assert!((result.saline3_infusion_ml_h.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_hypernatremia_infusion_zero_denominator() {
        let inputs = HypernatremiaInputs {
            target_sodium_meq_l: Some(513.0),
            effluent_rate_ml_h: Some(2000.0),
        };
        // Denominator is exactly zero: invalid parameters
        assert!(correct_hypernatremia(&inputs, &solutions())
            .saline3_infusion_ml_h
            .is_none());
    }

    #[test]
    fn test_hyponatremia_water_to_add() {
        let inputs = HyponatremiaInputs {
            target_sodium_meq_l: Some(120.0),
            effluent_rate_ml_h: None,
        };
        let result = correct_hyponatremia(&inputs, &solutions());

        // 5000 × (140/120 − 1)
        let expected = 5000.0 * (140.0 / 120.0 - 1.0);
        assert!((result.water_to_add_ml.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_hyponatremia_water_replacement_floored_at_zero() {
        // Target above bag sodium would go negative: floored to zero
        let inputs = HyponatremiaInputs {
            target_sodium_meq_l: Some(145.0),
            effluent_rate_ml_h: None,
        };
        let result = correct_hyponatremia(&inputs, &solutions());
        assert_eq!(result.water_replacement_ml, Some(0.0));

        let inputs = HyponatremiaInputs {
            target_sodium_meq_l: Some(120.0),
            effluent_rate_ml_h: None,
        };
        let result = correct_hyponatremia(&inputs, &solutions());
        let expected = 5000.0 * (1.0 - 120.0 / 140.0);
        assert!((result.water_replacement_ml.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_hyponatremia_infusion() {
        let inputs = HyponatremiaInputs {
            target_sodium_meq_l: Some(125.0),
            effluent_rate_ml_h: Some(1800.0),
        };
        let result = correct_hyponatremia(&inputs, &solutions());

        // (140 − 125) / 125 × 1800
        let expected = 15.0 / 125.0 * 1800.0;
        assert!((result.dextrose_infusion_ml_h.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_hyponatremia_invalid_target() {
        for target in [Some(0.0), Some(-10.0), None] {
            let inputs = HyponatremiaInputs {
                target_sodium_meq_l: target,
                effluent_rate_ml_h: Some(2000.0),
            };
            let result = correct_hyponatremia(&inputs, &solutions());
            assert!(result.water_to_add_ml.is_none());
            assert!(result.water_replacement_ml.is_none());
            assert!(result.dextrose_infusion_ml_h.is_none());
        }
    }
}
