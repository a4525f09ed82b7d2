//! Shared value types for the renal dosing engine.
//!
//! This module defines the vocabulary common to every calculator:
//! - Advisories (tagged clinical messages attached to a result)
//! - Applicability tags for signed physical quantities
//! - Tri-state answers for yes/no form questions

use serde::{Deserialize, Serialize};

// ============================================================================
// Advisory Types
// ============================================================================

/// Severity of an advisory message
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
}

/// A tagged clinical message produced when a derived value crosses a
/// clinically meaningful threshold
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Advisory {
    pub severity: Severity,
    pub text: String,
}

impl Advisory {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }
}

// ============================================================================
// Applicability Tagging
// ============================================================================

/// Explicit applicability classification for a signed physical quantity.
///
/// Negative volumes and rates are kept as computed; whether they are shown
/// to a clinician is decided from this tag, never from the sign at the
/// display boundary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Applicability {
    Applicable,
    NotApplicable,
}

/// A signed physical quantity together with its applicability tag
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SignedQuantity {
    pub value: f64,
    pub applicability: Applicability,
}

impl SignedQuantity {
    /// Tag a computed quantity: negative values of physically non-negative
    /// quantities are NotApplicable, everything else is Applicable.
    pub fn tagged(value: f64) -> Self {
        let applicability = if value < 0.0 {
            Applicability::NotApplicable
        } else {
            Applicability::Applicable
        };
        Self {
            value,
            applicability,
        }
    }

    pub fn is_applicable(&self) -> bool {
        self.applicability == Applicability::Applicable
    }
}

// ============================================================================
// Tri-State Form Answers
// ============================================================================

/// Answer to a yes/no question that may not have been filled in yet
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    Yes,
    No,
    #[default]
    Unset,
}

impl TriState {
    pub fn is_unset(&self) -> bool {
        matches!(self, TriState::Unset)
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, TriState::Yes)
    }

    pub fn is_no(&self) -> bool {
        matches!(self, TriState::No)
    }
}

/// Filter a measurement down to a finite value.
///
/// NaN and infinities are indistinguishable from "not provided" for every
/// downstream formula, so they are collapsed to `None` at the record
/// boundary.
pub(crate) fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
