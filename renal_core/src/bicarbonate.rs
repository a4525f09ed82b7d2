//! Bicarbonate supplementation of the dialysate/replacement bath.
//!
//! Given a target bicarbonate, computes the volume of 8.4% sodium
//! bicarbonate to add to each stocked bath type. 8.4% NaHCO3 carries
//! 1 mmol/mL, so the mmol deficit of the bag equals the mL to add.

use crate::config::SolutionsConfig;
use crate::types::finite;
use crate::SignedQuantity;
use serde::{Deserialize, Serialize};

/// Target bicarbonate concentration for the bath (mmol/L)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BicarbonateInputs {
    pub target_bicarbonate_mmol_l: Option<f64>,
}

/// Volumes of 8.4% bicarbonate to add per bag, one entry per bath type.
///
/// The signed volume is preserved; a target below the bath's base yields a
/// negative volume tagged NotApplicable rather than a masked number.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BicarbonateResult {
    pub prismasol_volume_ml: Option<SignedQuantity>,
    pub biphozyl_volume_ml: Option<SignedQuantity>,
}

/// Compute the bicarbonate volume to add for both bath types
pub fn compute_bath_volumes(
    inputs: &BicarbonateInputs,
    solutions: &SolutionsConfig,
) -> BicarbonateResult {
    let target = finite(inputs.target_bicarbonate_mmol_l);

    let volume_for = |base: f64| {
        target.map(|t| SignedQuantity::tagged((t - base) * solutions.bag_volume_l))
    };

    BicarbonateResult {
        prismasol_volume_ml: volume_for(solutions.prismasol_bicarbonate_mmol_l),
        biphozyl_volume_ml: volume_for(solutions.biphozyl_bicarbonate_mmol_l),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volumes_for_target_above_both_bases() {
        let inputs = BicarbonateInputs {
            target_bicarbonate_mmol_l: Some(35.0),
        };
        let result = compute_bath_volumes(&inputs, &SolutionsConfig::default());

        // (35 - 32) * 5 L and (35 - 22) * 5 L
        let prismasol = result.prismasol_volume_ml.unwrap();
        let biphozyl = result.biphozyl_volume_ml.unwrap();
        assert_eq!(prismasol.value, 15.0);
        assert!(prismasol.is_applicable());
        assert_eq!(biphozyl.value, 65.0);
        assert!(biphozyl.is_applicable());
    }

    #[test]
    fn test_target_below_base_keeps_signed_value() {
        let inputs = BicarbonateInputs {
            target_bicarbonate_mmol_l: Some(25.0),
        };
        let result = compute_bath_volumes(&inputs, &SolutionsConfig::default());

        // Below the Prismasol base: value stays signed, tag says NotApplicable
        let prismasol = result.prismasol_volume_ml.unwrap();
        assert_eq!(prismasol.value, -35.0);
        assert!(!prismasol.is_applicable());

        // Still above the Biphozyl base
        let biphozyl = result.biphozyl_volume_ml.unwrap();
        assert_eq!(biphozyl.value, 15.0);
        assert!(biphozyl.is_applicable());
    }

    #[test]
    fn test_missing_target_leaves_both_undefined() {
        let result =
            compute_bath_volumes(&BicarbonateInputs::default(), &SolutionsConfig::default());
        assert!(result.prismasol_volume_ml.is_none());
        assert!(result.biphozyl_volume_ml.is_none());
    }
}
