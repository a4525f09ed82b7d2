//! Threshold-driven titration rules for running circuits.
//!
//! Four total functions over contiguous measurement bins:
//! - citrate dose vs post-filter ionized calcium
//! - systemic calcium infusion vs systemic ionized calcium
//! - acid-base / citrate-accumulation assessment
//! - heparin infusion vs aPTT ratio

use crate::config::HeparinConfig;
use crate::types::finite;
use serde::{Deserialize, Serialize};

/// Ratio of total to ionized calcium above which citrate accumulation is
/// probable (strict comparison, 2.5 itself does not fire)
pub const CITRATE_ACCUMULATION_RATIO: f64 = 2.5;

/// Total calcium is reported in mg/dL; dividing by 4 yields mmol/L
const TOTAL_CALCIUM_MG_DL_PER_MMOL_L: f64 = 4.0;

/// Systemic ionized calcium below which a one-time calcium bolus is
/// recommended (mmol/L)
pub const CALCIUM_BOLUS_THRESHOLD: f64 = 0.75;

// ============================================================================
// Citrate Dose vs Post-Filter Ionized Calcium
// ============================================================================

/// Citrate dose change recommended for a post-filter ionized calcium
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CitrateTitration {
    /// Change to the citrate dose (mmol/L of blood); 0 means maintain
    pub adjustment_mmol_l: f64,
    pub summary: &'static str,
}

/// Map a post-filter ionized calcium (mmol/L) onto a citrate dose change.
///
/// Seven contiguous bins; the circuit target is 0.25-0.35 mmol/L, so higher
/// values mean the circuit is under-anticoagulated and the dose goes up.
pub fn citrate_dose_adjustment(post_filter_ica_mmol_l: Option<f64>) -> Option<CitrateTitration> {
    let ica = finite(post_filter_ica_mmol_l)?;

    let (adjustment_mmol_l, summary) = if ica > 0.45 {
        (0.3, "Post-filter calcium well above target: increase citrate by 0.3 mmol/L")
    } else if ica >= 0.41 {
        (0.2, "Post-filter calcium above target: increase citrate by 0.2 mmol/L")
    } else if ica >= 0.36 {
        (0.1, "Post-filter calcium slightly above target: increase citrate by 0.1 mmol/L")
    } else if ica >= 0.25 {
        (0.0, "Post-filter calcium on target: maintain citrate dose")
    } else if ica >= 0.20 {
        (-0.1, "Post-filter calcium slightly below target: reduce citrate by 0.1 mmol/L")
    } else if ica >= 0.15 {
        (-0.2, "Post-filter calcium below target: reduce citrate by 0.2 mmol/L")
    } else {
        (-0.3, "Post-filter calcium far below target: reduce citrate by 0.3 mmol/L")
    };

    Some(CitrateTitration {
        adjustment_mmol_l,
        summary,
    })
}

// ============================================================================
// Systemic Calcium Infusion vs Systemic Ionized Calcium
// ============================================================================

/// Calcium infusion change recommended for a systemic ionized calcium
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalciumTitration {
    /// Multiplicative change to the infusion (fraction, e.g. 0.10 = +10%)
    pub factor: f64,
    /// One-time calcium bolus on top of the rate change
    pub bolus_recommended: bool,
    /// New infusion rate when the current rate was supplied
    pub new_rate_ml_h: Option<f64>,
    pub summary: &'static str,
}

/// Map a systemic ionized calcium (mmol/L) onto a calcium infusion change.
///
/// Six contiguous bins between -10% and +10%; below 0.75 mmol/L a one-time
/// bolus is recommended in addition to the rate increase.
pub fn calcium_infusion_adjustment(
    systemic_ica_mmol_l: Option<f64>,
    current_rate_ml_h: Option<f64>,
) -> Option<CalciumTitration> {
    let ica = finite(systemic_ica_mmol_l)?;

    let (factor, bolus_recommended, summary) = if ica < CALCIUM_BOLUS_THRESHOLD {
        (0.10, true, "Severe hypocalcemia: one-time calcium bolus and increase infusion by 10%")
    } else if ica < 0.88 {
        (0.10, false, "Marked hypocalcemia: increase calcium infusion by 10%")
    } else if ica < 1.00 {
        (0.05, false, "Mild hypocalcemia: increase calcium infusion by 5%")
    } else if ica <= 1.20 {
        (0.0, false, "Systemic calcium on target: maintain infusion")
    } else if ica <= 1.35 {
        (-0.05, false, "Mild hypercalcemia: reduce calcium infusion by 5%")
    } else {
        (-0.10, false, "Hypercalcemia: reduce calcium infusion by 10%")
    };

    let new_rate_ml_h = finite(current_rate_ml_h).map(|rate| rate * (1.0 + factor));

    Some(CalciumTitration {
        factor,
        bolus_recommended,
        new_rate_ml_h,
        summary,
    })
}

// ============================================================================
// Acid-Base / Citrate Accumulation
// ============================================================================

/// Measurements for the acid-base assessment
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AcidBaseInputs {
    /// Total calcium (mg/dL)
    pub total_calcium_mg_dl: Option<f64>,
    /// Systemic ionized calcium (mmol/L)
    pub ionized_calcium_mmol_l: Option<f64>,
    pub ph: Option<f64>,
    /// Bicarbonate (mmol/L)
    pub bicarbonate_mmol_l: Option<f64>,
}

/// Outcome of the acid-base assessment, in priority order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AcidBaseAssessment {
    /// Total/ionized calcium ratio above 2.5: stop citrate
    CitrateAccumulation { ratio: f64 },
    /// pH and bicarbonate both missing
    NeedsBloodGas,
    MetabolicAlkalosis,
    MetabolicAcidosis,
    NoClearPattern,
}

impl AcidBaseAssessment {
    /// Bedside guidance attached to the assessment
    pub fn guidance(&self) -> &'static str {
        match self {
            AcidBaseAssessment::CitrateAccumulation { .. } => {
                "Probable citrate accumulation: discontinue citrate and switch strategy"
            }
            AcidBaseAssessment::NeedsBloodGas => {
                "Provide pH and bicarbonate to assess the acid-base status"
            }
            AcidBaseAssessment::MetabolicAlkalosis => {
                "Metabolic alkalosis: reduce blood-pump flow (less citrate load) or increase dialysate flow"
            }
            AcidBaseAssessment::MetabolicAcidosis => {
                "Metabolic acidosis: increase blood-pump flow (more citrate buffer) or reduce dialysate flow"
            }
            AcidBaseAssessment::NoClearPattern => {
                "No clear acid-base pattern: keep current settings and re-check"
            }
        }
    }
}

/// Assess acid-base status under regional citrate.
///
/// The accumulation check runs first and short-circuits everything else;
/// its 2.5 boundary is exclusive, a ratio of exactly 2.5 falls through to
/// the pH/bicarbonate rules.
pub fn assess_acid_base(inputs: &AcidBaseInputs) -> AcidBaseAssessment {
    let total_ca = finite(inputs.total_calcium_mg_dl);
    let ionized_ca = finite(inputs.ionized_calcium_mmol_l).filter(|i| *i > 0.0);
    if let (Some(total), Some(ionized)) = (total_ca, ionized_ca) {
        let ratio = (total / TOTAL_CALCIUM_MG_DL_PER_MMOL_L) / ionized;
        if ratio > CITRATE_ACCUMULATION_RATIO {
            tracing::debug!("Calcium ratio {:.2} suggests citrate accumulation", ratio);
            return AcidBaseAssessment::CitrateAccumulation { ratio };
        }
    }

    let ph = finite(inputs.ph);
    let bicarbonate = finite(inputs.bicarbonate_mmol_l);
    match (ph, bicarbonate) {
        (None, None) => AcidBaseAssessment::NeedsBloodGas,
        (Some(ph), Some(hco3)) if ph > 7.45 && hco3 > 26.0 => {
            AcidBaseAssessment::MetabolicAlkalosis
        }
        (Some(ph), Some(hco3)) if ph < 7.35 && hco3 < 22.0 => {
            AcidBaseAssessment::MetabolicAcidosis
        }
        _ => AcidBaseAssessment::NoClearPattern,
    }
}

// ============================================================================
// Heparin aPTT Ratio Titration
// ============================================================================

/// Heparin infusion action for a measured aPTT ratio
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeparinAction {
    Suspend,
    Increase,
    Decrease,
    Maintain,
    /// No ratio supplied and no bleeding: measure before titrating
    RequestRatio,
}

/// Outcome of one heparin titration step
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HeparinTitration {
    pub action: HeparinAction,
    /// Infusion rate to set (UI/kg/h), when the action changes it
    pub rate_ui_per_kg_h: Option<f64>,
    /// When to re-assess (hours)
    pub reassess_hours: Option<u32>,
    pub advisory: String,
}

/// Titrate the heparin infusion from the aPTT ratio and bleeding status.
///
/// Active bleeding suspends the infusion regardless of the ratio. Otherwise
/// the ratio is compared against the configured target: below it the
/// infusion goes up, above it down, exactly on target it is maintained.
pub fn heparin_titration(
    apttr: Option<f64>,
    bleeding: bool,
    heparin: &HeparinConfig,
) -> HeparinTitration {
    if bleeding {
        return HeparinTitration {
            action: HeparinAction::Suspend,
            rate_ui_per_kg_h: Some(0.0),
            reassess_hours: Some(4),
            advisory: "Active bleeding: suspend heparin and re-assess in 4 h".to_string(),
        };
    }

    let ratio = match finite(apttr) {
        Some(r) => r,
        None => {
            return HeparinTitration {
                action: HeparinAction::RequestRatio,
                rate_ui_per_kg_h: None,
                reassess_hours: None,
                advisory: "Measure the aPTT ratio before titrating the infusion".to_string(),
            }
        }
    };

    if ratio < heparin.target_apttr {
        HeparinTitration {
            action: HeparinAction::Increase,
            rate_ui_per_kg_h: Some(heparin.increased_ui_per_kg_h),
            reassess_hours: Some(4),
            advisory: format!(
                "aPTT ratio {:.2} below target {:.1}: increase to {:.0} UI/kg/h and re-check in 4 h",
                ratio, heparin.target_apttr, heparin.increased_ui_per_kg_h
            ),
        }
    } else if ratio > heparin.target_apttr {
        HeparinTitration {
            action: HeparinAction::Decrease,
            rate_ui_per_kg_h: Some(heparin.reduced_ui_per_kg_h),
            reassess_hours: Some(4),
            advisory: format!(
                "aPTT ratio {:.2} above target {:.1}: decrease to {:.0} UI/kg/h and re-check in 4 h",
                ratio, heparin.target_apttr, heparin.reduced_ui_per_kg_h
            ),
        }
    } else {
        HeparinTitration {
            action: HeparinAction::Maintain,
            rate_ui_per_kg_h: None,
            reassess_hours: Some(12),
            advisory: format!(
                "aPTT ratio on target {:.1}: maintain current dose and re-check in 12 h",
                heparin.target_apttr
            ),
        }
    }
}
