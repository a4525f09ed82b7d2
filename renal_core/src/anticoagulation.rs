//! Anticoagulation strategy selection for the extracorporeal circuit.
//!
//! The selector is a priority-ordered rule table over three yes/no/unset
//! questions. Rules are evaluated top to bottom and the first match wins;
//! every terminal strategy carries its monitoring plan and the prescription
//! panel the caller should route to.

use crate::TriState;
use serde::{Deserialize, Serialize};

/// The three circuit-anticoagulation questions from the bedside form;
/// an unanswered question deserializes as unset
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AnticoagInputs {
    pub needs_systemic_anticoagulation: TriState,
    pub citrate_contraindicated: TriState,
    pub high_bleeding_risk: TriState,
}

/// Selected strategy; `Incomplete` is the only non-terminal state
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Heparin,
    Citrate,
    NoAnticoagulation,
    Incomplete,
}

/// Prescription panel associated with a terminal strategy
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Citrate,
    Heparin,
    NoAnticoagulation,
}

/// Outcome of one strategy selection
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnticoagDecision {
    pub strategy: Strategy,
    pub rationale: &'static str,
    /// Fixed instructional bullet points for the selected strategy
    pub monitoring_plan: &'static [&'static str],
    /// Exactly one panel per terminal strategy, none while incomplete
    pub panel: Option<Panel>,
}

type Predicate = fn(&AnticoagInputs) -> bool;

fn any_unset(i: &AnticoagInputs) -> bool {
    i.needs_systemic_anticoagulation.is_unset()
        || i.citrate_contraindicated.is_unset()
        || i.high_bleeding_risk.is_unset()
}

fn needs_systemic(i: &AnticoagInputs) -> bool {
    i.needs_systemic_anticoagulation.is_yes()
}

fn citrate_allowed(i: &AnticoagInputs) -> bool {
    i.citrate_contraindicated.is_no()
}

fn citrate_blocked_and_bleeding(i: &AnticoagInputs) -> bool {
    i.citrate_contraindicated.is_yes() && i.high_bleeding_risk.is_yes()
}

fn citrate_blocked_not_bleeding(i: &AnticoagInputs) -> bool {
    i.citrate_contraindicated.is_yes() && i.high_bleeding_risk.is_no()
}

fn always(_: &AnticoagInputs) -> bool {
    true
}

/// Priority-ordered rule table; the first matching row decides.
///
/// The final catch-all is unreachable with the closed `TriState` domain but
/// guarantees the selector is total and never panics.
static RULES: &[(&str, Predicate, Strategy, &str)] = &[
    (
        "incomplete-inputs",
        any_unset,
        Strategy::Incomplete,
        "Fill all three fields to select a strategy",
    ),
    (
        "systemic-indication",
        needs_systemic,
        Strategy::Heparin,
        "Systemic anticoagulation is independently indicated: systemic heparin covers the circuit",
    ),
    (
        "citrate-first-line",
        citrate_allowed,
        Strategy::Citrate,
        "No citrate contraindication: regional citrate is the first-line strategy",
    ),
    (
        "citrate-blocked-bleeding",
        citrate_blocked_and_bleeding,
        Strategy::NoAnticoagulation,
        "Citrate contraindicated and high bleeding risk: run the circuit without anticoagulation",
    ),
    (
        "citrate-blocked-no-bleeding",
        citrate_blocked_not_bleeding,
        Strategy::Heparin,
        "Citrate contraindicated without high bleeding risk: systemic heparin",
    ),
    (
        "verify-selection",
        always,
        Strategy::Incomplete,
        "Verify selection: answers outside the expected domain",
    ),
];

/// Monitoring bullet points for a strategy
pub fn monitoring_plan(strategy: Strategy) -> &'static [&'static str] {
    match strategy {
        Strategy::Citrate => &[
            "Post-filter ionized calcium every 6 h, target 0.25-0.35 mmol/L",
            "Systemic ionized calcium every 6 h, target 1.00-1.20 mmol/L",
            "Total-to-ionized calcium ratio daily to screen for citrate accumulation",
            "Blood gas (pH, bicarbonate) every 6 h",
        ],
        Strategy::Heparin => &[
            "aPTT ratio 6 h after start and after every dose change, target 1.5",
            "Platelet count daily while on heparin",
            "Observe for bleeding at puncture sites and drains",
        ],
        Strategy::NoAnticoagulation => &[
            "Inspect filter and check circuit pressures every 4 h",
            "Keep filtration fraction low: favour pre-dilution",
            "Reassess strategy early if the circuit clots repeatedly",
        ],
        Strategy::Incomplete => &[],
    }
}

fn panel_for(strategy: Strategy) -> Option<Panel> {
    match strategy {
        Strategy::Citrate => Some(Panel::Citrate),
        Strategy::Heparin => Some(Panel::Heparin),
        Strategy::NoAnticoagulation => Some(Panel::NoAnticoagulation),
        Strategy::Incomplete => None,
    }
}

/// Select the anticoagulation strategy for the given answers.
///
/// Total over the input domain: every combination of the three tri-state
/// answers maps to exactly one decision.
pub fn decide(inputs: &AnticoagInputs) -> AnticoagDecision {
    for &(name, applies, strategy, rationale) in RULES {
        if applies(inputs) {
            tracing::debug!("Anticoagulation rule matched: {}", name);
            return AnticoagDecision {
                strategy,
                rationale,
                monitoring_plan: monitoring_plan(strategy),
                panel: panel_for(strategy),
            };
        }
    }
    unreachable!("rule table ends with a catch-all");
}
