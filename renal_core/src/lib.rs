#![forbid(unsafe_code)]

//! Core calculation and decision-rule engine for bedside renal
//! replacement therapy.
//!
//! This crate provides:
//! - Effluent dose and filtration fraction for continuous therapy
//! - Bath bicarbonate and sodium correction formulas
//! - The anticoagulation strategy selector and its titration rules
//! - Weight-indexed starting prescriptions
//! - SLED and conventional-HD session dosing
//!
//! Every calculator is a pure function of an input record: missing or
//! out-of-domain measurements surface as undefined result fields, never as
//! errors or panics, and signed values are kept alongside explicit
//! applicability tags instead of being clamped for display.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod effluent;
pub mod bicarbonate;
pub mod sodium;
pub mod anticoagulation;
pub mod prescription;
pub mod titration;
pub mod adequacy;
pub mod sled;
pub mod hemodialysis;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{Advisory, Applicability, Severity, SignedQuantity, TriState};
pub use config::Config;
pub use effluent::{compute_effluent, EffluentInputs, EffluentResult};
pub use bicarbonate::{compute_bath_volumes, BicarbonateInputs, BicarbonateResult};
pub use sodium::{
    correct_hypernatremia, correct_hyponatremia, HypernatremiaInputs, HypernatremiaResult,
    HyponatremiaInputs, HyponatremiaResult,
};
pub use anticoagulation::{decide, AnticoagDecision, AnticoagInputs, Panel, Strategy};
pub use prescription::{
    citrate_prescription, heparin_prescription, no_anticoagulation_prescription, CitrateLookup,
    LinearPrescription, WeightPrescriptionRow,
};
pub use titration::{
    assess_acid_base, calcium_infusion_adjustment, citrate_dose_adjustment, heparin_titration,
    AcidBaseAssessment, AcidBaseInputs, CalciumTitration, CitrateTitration, HeparinAction,
    HeparinTitration,
};
pub use sled::{compute_sled, SledInputs, SledResult, SodiumTrend};
pub use hemodialysis::{compute_hemodialysis, HemodialysisInputs, HemodialysisResult};
