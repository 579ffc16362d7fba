//! Form state management: steps and the fields they own

use super::field::FormField;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// One page of the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position in the wizard
    pub ordinal: usize,
    pub title: String,
    pub subtitle: String,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl Step {
    pub fn new(ordinal: usize, title: &str, subtitle: &str, fields: Vec<FormField>) -> Self {
        Self {
            ordinal,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            fields,
            active_field_index: 0,
        }
    }

    /// Fields that must hold an answer before leaving the step: the
    /// required ones plus every scale.
    pub fn gated_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields.iter().filter(|f| f.required || f.is_scale())
    }

    /// Focus the field with the given name, if present
    pub fn focus_field(&mut self, name: &str) {
        if let Some(idx) = self.fields.iter().position(|f| f.name == name) {
            self.active_field_index = idx;
        }
    }
}

impl Form for Step {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
}

/// All steps of a wizard session with their current values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    steps: Vec<Step>,
}

impl FormState {
    /// Build a form from steps; ordinals are reassigned to match position
    pub fn new(steps: Vec<Step>) -> Self {
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(idx, mut step)| {
                step.ordinal = idx + 1;
                step
            })
            .collect();
        Self { steps }
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Look up a step by its 1-based ordinal
    pub fn step(&self, ordinal: usize) -> Option<&Step> {
        ordinal.checked_sub(1).and_then(|idx| self.steps.get(idx))
    }

    pub fn step_mut(&mut self, ordinal: usize) -> Option<&mut Step> {
        ordinal.checked_sub(1).and_then(|idx| self.steps.get_mut(idx))
    }

    /// Find a field anywhere in the form
    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    #[cfg(test)]
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.steps
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.name == name)
    }

    /// Raw `(name, value)` entries for the whole form, in document order
    pub fn raw_entries(&self) -> Vec<(String, String)> {
        self.steps
            .iter()
            .flat_map(|s| s.fields.iter())
            .flat_map(|f| f.raw_entries())
            .collect()
    }
}
