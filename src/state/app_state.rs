//! Application state definitions

use super::forms::{discovery_steps, Form, FormField, FormState, Step};
use super::session::{Session, StepView};
use super::warning::TransientWarning;
use crate::submission::Snapshot;
use std::collections::VecDeque;
use std::time::Duration;

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Wizard,
    Completion,
}

/// All state of one wizard session
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: Session,
    pub form: FormState,
    /// Validation warning currently on screen
    pub warning: Option<TransientWarning>,
    pub warning_duration: Duration,
    /// Blocking alerts, shown one at a time
    pub errors: VecDeque<String>,
    /// Normalized answers, present once submission completed
    pub snapshot: Option<Snapshot>,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FormState::new(discovery_steps()), Duration::from_millis(3000))
    }
}

impl AppState {
    pub fn new(form: FormState, warning_duration: Duration) -> Self {
        Self {
            session: Session::new(form.total_steps()),
            form,
            warning: None,
            warning_duration,
            errors: VecDeque::new(),
            snapshot: None,
            status_message: None,
        }
    }

    pub fn current_view(&self) -> View {
        if self.session.is_submitted() {
            View::Completion
        } else {
            View::Wizard
        }
    }

    pub fn step_view(&self) -> StepView {
        self.session.view()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.form.step(self.session.current_step())
    }

    pub fn current_step_mut(&mut self) -> Option<&mut Step> {
        self.form.step_mut(self.session.current_step())
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        self.current_step_mut()
            .and_then(|step| step.get_active_field_mut())
    }

    /// Show the validation warning unless one is already showing
    pub fn raise_warning(&mut self, message: &str) -> bool {
        if self.warning.is_some() {
            return false;
        }
        self.warning = Some(TransientWarning::new(message, self.warning_duration));
        true
    }

    /// Drop the warning once its time is up
    pub fn expire_warning(&mut self) {
        if self.warning.as_ref().is_some_and(|w| w.is_expired()) {
            self.warning = None;
        }
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
