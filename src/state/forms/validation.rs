//! Step validation

use super::form_state::Step;

/// Message shown when a step fails validation
pub const VALIDATION_MESSAGE: &str = "Please fill in all required fields to continue.";

/// Result of validating one step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepValidation {
    /// Names of unmet fields, in field order
    pub missing: Vec<String>,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// First unmet field, used to move focus
    pub fn first_missing(&self) -> Option<&str> {
        self.missing.first().map(String::as_str)
    }
}

/// Validate a step.
///
/// Required text must be non-empty after trimming, required choice groups
/// need a selection, required multi-selects need a checked option, and every
/// scale in the step needs a stored value whether flagged required or not.
pub fn validate_step(step: &Step) -> StepValidation {
    let missing = step
        .gated_fields()
        .filter(|f| !f.is_answered())
        .map(|f| f.name.clone())
        .collect();

    StepValidation { missing }
}
