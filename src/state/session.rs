//! Wizard session state machine
//!
//! The session is a plain value: step pointer plus phase. Transitions are
//! computed from the form contents without touching any rendering surface.

use super::forms::{validate_step, FormState, StepValidation};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Filling in steps
    #[default]
    Editing,
    /// Final step accepted, waiting for the pipeline to report completion
    Submitting,
    /// Terminal state
    Submitted,
}

/// Outcome of a navigation command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Advanced { to: usize },
    Retreated { to: usize },
    /// Validation failed; the step pointer did not move
    Blocked(StepValidation),
    /// Last step validated; the caller must hand the form to the pipeline
    SubmitRequested,
    /// Command has no effect in the current state
    Ignored,
}

/// Forward navigation control shown for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardControl {
    Next,
    Submit { busy: bool },
}

/// Everything the UI needs to draw the wizard chrome for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepView {
    pub visible_step: usize,
    pub total_steps: usize,
    pub progress_percent: f64,
    pub back_enabled: bool,
    pub forward: ForwardControl,
}

impl StepView {
    /// Whether the step with this ordinal is the one shown
    pub fn is_visible(&self, ordinal: usize) -> bool {
        self.visible_step == ordinal
    }
}

/// Compute the view model for `step` out of `total_steps`
pub fn render(step: usize, total_steps: usize) -> StepView {
    let progress_percent = if total_steps > 1 {
        (step.saturating_sub(1)) as f64 / (total_steps - 1) as f64 * 100.0
    } else {
        0.0
    };

    StepView {
        visible_step: step,
        total_steps,
        progress_percent,
        back_enabled: step > 1,
        forward: if step == total_steps {
            ForwardControl::Submit { busy: false }
        } else {
            ForwardControl::Next
        },
    }
}

/// Process-local session state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    step: usize,
    total_steps: usize,
    phase: Phase,
}

impl Session {
    pub fn new(total_steps: usize) -> Self {
        Self {
            step: 1,
            total_steps: total_steps.max(1),
            phase: Phase::Editing,
        }
    }

    pub fn current_step(&self) -> usize {
        self.step
    }

    #[cfg(test)]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.total_steps
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == Phase::Submitted
    }

    /// Validate the active step and move forward, or request submission on
    /// the last step.
    pub fn go_next(&mut self, form: &FormState) -> Transition {
        if self.phase != Phase::Editing {
            return Transition::Ignored;
        }

        let validation = form.step(self.step).map(validate_step).unwrap_or_default();
        if !validation.is_valid() {
            return Transition::Blocked(validation);
        }

        if self.step < self.total_steps {
            self.step += 1;
            Transition::Advanced { to: self.step }
        } else {
            self.phase = Phase::Submitting;
            Transition::SubmitRequested
        }
    }

    /// Move back one step; never validates
    pub fn go_previous(&mut self) -> Transition {
        if self.phase != Phase::Editing || self.step <= 1 {
            return Transition::Ignored;
        }
        self.step -= 1;
        Transition::Retreated { to: self.step }
    }

    /// Pipeline finished; enter the terminal state
    pub fn complete_submission(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Submitted;
        }
    }

    /// Pipeline failed; hand control back to the last step
    pub fn fail_submission(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Editing;
        }
    }

    /// View model for the current step
    pub fn view(&self) -> StepView {
        let mut view = render(self.step, self.total_steps);
        if let ForwardControl::Submit { busy } = &mut view.forward {
            *busy = self.phase == Phase::Submitting;
        }
        view
    }
}
