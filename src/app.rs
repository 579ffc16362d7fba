//! Application state and core logic
//!
//! `App` is the adapter between terminal events and the wizard: key presses
//! are translated into plain commands (`go_next`, `go_previous`, `submit`,
//! `download_brief`), and `tick` advances timers and in-flight submissions.

use crate::config::WizardConfig;
use crate::document::BriefGenerator;
use crate::state::{
    AppState, Form, FormState, Phase, Transition, View, VALIDATION_MESSAGE,
};
use crate::submission::{
    normalize, HttpSink, NullSink, PendingSubmission, SubmissionPipeline, SubmissionSink,
    SubmitOutcome,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pipeline: SubmissionPipeline,
    brief: BriefGenerator,
    /// Submission in flight, if any
    pending: Option<PendingSubmission>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from configuration
    pub fn new(config: &WizardConfig) -> Result<Self> {
        let sink: Arc<dyn SubmissionSink> = match config.endpoint() {
            Some(endpoint) => {
                tracing::info!("Submitting to {endpoint}");
                Arc::new(HttpSink::new(endpoint)?)
            }
            None => Arc::new(NullSink),
        };
        let pipeline =
            SubmissionPipeline::new(config.submit_policy(), sink, config.completion_delay());
        tracing::info!("Submit policy: {:?}", pipeline.policy());

        let state = AppState::new(
            FormState::new(crate::state::discovery_steps()),
            config.warning_duration(),
        );

        Ok(Self::with_parts(state, pipeline, config.brief_generator()))
    }

    /// Assemble an App from already built parts
    pub fn with_parts(state: AppState, pipeline: SubmissionPipeline, brief: BriefGenerator) -> Self {
        Self {
            state,
            pipeline,
            brief,
            pending: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn has_pending_submission(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_done())
    }

    /// Validate the current step and move forward or submit
    pub fn go_next(&mut self) -> Transition {
        let transition = self.state.session.go_next(&self.state.form);

        match &transition {
            Transition::Advanced { to } => {
                let title = self.state.current_step().map(|s| s.title.as_str());
                tracing::debug!("Advanced to step {to} ({})", title.unwrap_or_default());
                self.state.warning = None;
            }
            Transition::Blocked(validation) => {
                tracing::debug!("Step blocked, missing: {:?}", validation.missing);
                if let Some(name) = validation.first_missing().map(str::to_string) {
                    if let Some(step) = self.state.current_step_mut() {
                        step.focus_field(&name);
                    }
                }
                self.state.raise_warning(VALIDATION_MESSAGE);
            }
            Transition::SubmitRequested => self.submit(),
            Transition::Retreated { .. } | Transition::Ignored => {}
        }

        transition
    }

    /// Move back one step
    pub fn go_previous(&mut self) -> Transition {
        let transition = self.state.session.go_previous();
        if let Transition::Retreated { to } = transition {
            tracing::debug!("Back to step {to}");
        }
        transition
    }

    /// Normalize the form and hand it to the pipeline
    fn submit(&mut self) {
        let snapshot = normalize(self.state.form.raw_entries());
        self.state.status_message = Some("Capturing strategy...".to_string());
        self.pending = Some(self.pipeline.dispatch(snapshot));
    }

    /// Advance timers and collect submission results
    pub fn tick(&mut self) {
        self.state.expire_warning();

        let outcome = self.pending.as_mut().and_then(PendingSubmission::poll);
        match outcome {
            Some(SubmitOutcome::Completed(snapshot)) => {
                self.pending = None;
                self.state.session.complete_submission();
                self.state.snapshot = Some(snapshot);
                self.state.status_message = Some("Strategy captured!".to_string());
                tracing::info!("Submission complete");
            }
            Some(SubmitOutcome::Failed(err)) => {
                self.pending = None;
                self.state.session.fail_submission();
                self.state.status_message = None;
                self.state
                    .push_error(format!("Submission failed: {err}. Please try again."));
            }
            None => {}
        }
    }

    /// Render the brief for the captured snapshot and save it
    pub fn download_brief(&mut self) -> Option<PathBuf> {
        match self.brief.generate(self.state.snapshot.as_ref()) {
            Ok(path) => {
                self.state.status_message = Some(format!("Brief saved to {}", path.display()));
                Some(path)
            }
            Err(err) => {
                tracing::warn!("Brief generation failed: {err}");
                self.state.push_error(err.to_string());
                None
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view() {
            View::Wizard => self.handle_wizard_key(key),
            View::Completion => self.handle_completion_key(key),
        }
        Ok(())
    }

    fn handle_completion_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('d') => {
                self.download_brief();
            }
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        if self.state.session.phase() == Phase::Submitting {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Step navigation
            KeyCode::PageDown => {
                self.go_next();
                return;
            }
            KeyCode::Char('n') if ctrl => {
                self.go_next();
                return;
            }
            KeyCode::Char('s') if ctrl => {
                if self.state.session.is_last_step() {
                    self.go_next();
                }
                return;
            }
            KeyCode::PageUp => {
                self.go_previous();
                return;
            }
            KeyCode::Char('p') if ctrl => {
                self.go_previous();
                return;
            }
            // Field focus
            KeyCode::Tab | KeyCode::Down => {
                if let Some(step) = self.state.current_step_mut() {
                    step.next_field();
                }
                return;
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(step) = self.state.current_step_mut() {
                    step.prev_field();
                }
                return;
            }
            _ => {}
        }

        if ctrl {
            return;
        }

        let Some(field) = self.state.active_field_mut() else {
            return;
        };

        let mut advance_focus = false;
        if field.is_text() {
            match key.code {
                KeyCode::Char(c) => field.push_char(c),
                KeyCode::Backspace => field.pop_char(),
                KeyCode::Enter if field.is_multiline => field.push_char('\n'),
                KeyCode::Enter => advance_focus = true,
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char(c) if field.is_scale() && c.is_ascii_digit() => field.push_char(c),
                KeyCode::Left | KeyCode::Char('h') => field.prev_option(),
                KeyCode::Right | KeyCode::Char('l') => field.next_option(),
                KeyCode::Char(' ') | KeyCode::Enter => field.activate_option(),
                _ => {}
            }
        }

        if advance_focus {
            if let Some(step) = self.state.current_step_mut() {
                step.next_field();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{default_sections, DEFAULT_STUDIO};
    use crate::state::{FormField, ForwardControl, Step};
    use crate::submission::{MockSubmissionSink, SubmitError, SubmitPolicy};
    use std::path::Path;
    use std::time::Duration;

    fn three_step_form() -> FormState {
        FormState::new(vec![
            Step::new(
                1,
                "Basics",
                "",
                vec![
                    FormField::text("platform_name", "Platform Name", false).required(),
                    FormField::scale("bold_vs_calm", "Bold vs Calm"),
                ],
            ),
            Step::new(
                2,
                "Look",
                "",
                vec![FormField::multi_select("mood", "Mood", &["bold", "playful", "calm"])],
            ),
            Step::new(3, "Notes", "", vec![FormField::text("notes", "Notes", true)]),
        ])
    }

    fn app_with(sink: MockSubmissionSink, policy: SubmitPolicy) -> App {
        app_in(sink, policy, Path::new("briefs"))
    }

    fn app_in(sink: MockSubmissionSink, policy: SubmitPolicy, output_dir: &Path) -> App {
        let state = AppState::new(three_step_form(), Duration::from_secs(3));
        let pipeline = SubmissionPipeline::new(policy, Arc::new(sink), Duration::ZERO);
        let brief = BriefGenerator {
            sections: default_sections(),
            studio_name: DEFAULT_STUDIO.to_string(),
            output_dir: output_dir.to_path_buf(),
        };
        App::with_parts(state, pipeline, brief)
    }

    fn fill_step_one(app: &mut App) {
        let form = &mut app.state.form;
        form.field_mut("platform_name")
            .unwrap()
            .set_text("Acme".to_string());
        form.field_mut("bold_vs_calm").unwrap().select_scale(4);
    }

    async fn settle(app: &mut App) {
        for _ in 0..200 {
            app.tick();
            if app.pending.is_none() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("submission never settled");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_blocked_step_shows_warning() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);

            let transition = app.go_next();

            assert!(matches!(transition, Transition::Blocked(_)));
            assert_eq!(app.state.session.current_step(), 1);
            assert_eq!(
                app.state.warning.as_ref().map(|w| w.message.as_str()),
                Some(VALIDATION_MESSAGE)
            );
        }

        #[test]
        fn test_blocked_step_focuses_first_missing_field() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            app.state
                .form
                .field_mut("platform_name")
                .unwrap()
                .set_text("Acme".to_string());

            app.go_next();

            assert_eq!(app.state.current_step().unwrap().active_field_index, 1);
        }

        #[test]
        fn test_filled_step_advances_to_half_progress() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            fill_step_one(&mut app);

            assert_eq!(app.go_next(), Transition::Advanced { to: 2 });
            let view = app.state.step_view();
            assert_eq!(view.visible_step, 2);
            assert_eq!(view.progress_percent, 50.0);
            assert!(view.back_enabled);
            assert_eq!(view.forward, ForwardControl::Next);
        }

        #[test]
        fn test_previous_stops_at_first_step() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            fill_step_one(&mut app);
            app.go_next();
            assert_eq!(app.go_previous(), Transition::Retreated { to: 1 });
            assert_eq!(app.go_previous(), Transition::Ignored);
            assert_eq!(app.state.session.current_step(), 1);
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_fire_and_forget_completes_despite_failure() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .times(1)
                .returning(|_| Err(SubmitError::Dropped));
            let mut app = app_with(sink, SubmitPolicy::FireAndForget);
            fill_step_one(&mut app);
            app.go_next();
            app.go_next();
            assert_eq!(app.go_next(), Transition::SubmitRequested);

            settle(&mut app).await;

            assert!(app.state.session.is_submitted());
            assert_eq!(app.state.current_view(), View::Completion);
            assert!(!app.state.has_errors());
            assert_eq!(
                app.state.snapshot.as_ref().and_then(|s| s.get("platform_name")),
                Some("Acme")
            );
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        #[tokio::test]
        async fn test_multi_select_joined_in_snapshot() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .withf(|s| s.get("mood") == Some("bold, playful"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = app_with(sink, SubmitPolicy::Awaited);
            fill_step_one(&mut app);
            app.go_next();
            let mood = app.state.form.field_mut("mood").unwrap();
            mood.select_option("bold");
            mood.select_option("playful");
            app.go_next();
            app.go_next();

            settle(&mut app).await;

            assert!(app.state.session.is_submitted());
            assert_eq!(
                app.state.snapshot.as_ref().and_then(|s| s.get("mood")),
                Some("bold, playful")
            );
        }

        #[tokio::test]
        async fn test_awaited_failure_rolls_back() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send()
                .times(1)
                .returning(|_| Err(SubmitError::Dropped));
            let mut app = app_with(sink, SubmitPolicy::Awaited);
            fill_step_one(&mut app);
            app.go_next();
            app.go_next();
            app.go_next();
            assert_eq!(
                app.state.step_view().forward,
                ForwardControl::Submit { busy: true }
            );

            settle(&mut app).await;

            assert_eq!(app.state.session.phase(), Phase::Editing);
            assert_eq!(app.state.session.current_step(), 3);
            assert_eq!(
                app.state.step_view().forward,
                ForwardControl::Submit { busy: false }
            );
            assert!(app.state.has_errors());
            assert!(app.state.snapshot.is_none());
            assert_eq!(
                app.state.form.field("platform_name").map(|f| f.as_text()),
                Some("Acme")
            );
        }

        #[tokio::test]
        async fn test_keys_ignored_while_submitting() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send().returning(|_| Ok(()));
            let mut app = app_with(sink, SubmitPolicy::FireAndForget);
            fill_step_one(&mut app);
            app.go_next();
            app.go_next();
            app.handle_key(ctrl('s')).unwrap();
            assert_eq!(app.state.session.phase(), Phase::Submitting);

            app.handle_key(key(KeyCode::PageUp)).unwrap();
            assert_eq!(app.state.session.current_step(), 3);
            settle(&mut app).await;
        }
    }

    mod brief {
        use super::*;

        #[test]
        fn test_download_before_submission_alerts() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            assert!(app.download_brief().is_none());
            assert!(app.state.has_errors());
        }

        #[tokio::test]
        async fn test_download_after_submission_writes_file() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_send().returning(|_| Ok(()));
            let dir = tempfile::tempdir().unwrap();
            let mut app = app_in(sink, SubmitPolicy::Awaited, dir.path());
            fill_step_one(&mut app);
            for _ in 0..3 {
                app.go_next();
            }
            settle(&mut app).await;

            app.handle_key(key(KeyCode::Char('d'))).unwrap();

            let expected = dir.path().join("Acme_Strategy_Brief.pdf");
            assert!(expected.exists());
            assert!(app
                .state
                .status_message
                .as_deref()
                .is_some_and(|m| m.contains("Acme_Strategy_Brief.pdf")));
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_typing_fills_active_text_field() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            for c in "Acme".chars() {
                app.handle_key(key(KeyCode::Char(c))).unwrap();
            }
            app.handle_key(key(KeyCode::Backspace)).unwrap();
            assert_eq!(
                app.state.form.field("platform_name").map(|f| f.as_text()),
                Some("Acm")
            );
        }

        #[test]
        fn test_digit_on_scale_selects_value() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            app.handle_key(key(KeyCode::Tab)).unwrap();
            app.handle_key(key(KeyCode::Char('3'))).unwrap();
            assert_eq!(
                app.state.form.field("bold_vs_calm").map(|f| f.scale_value()),
                Some("3".to_string())
            );
        }

        #[test]
        fn test_page_down_navigates_when_valid() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            app.handle_key(key(KeyCode::PageDown)).unwrap();
            assert_eq!(app.state.session.current_step(), 1);
            fill_step_one(&mut app);
            app.handle_key(ctrl('n')).unwrap();
            assert_eq!(app.state.session.current_step(), 2);
        }

        #[test]
        fn test_space_toggles_multi_select() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            fill_step_one(&mut app);
            app.go_next();
            app.handle_key(key(KeyCode::Right)).unwrap();
            app.handle_key(key(KeyCode::Char(' '))).unwrap();
            assert_eq!(
                app.state.form.field("mood").map(|f| f.raw_entries()),
                Some(vec![("mood".to_string(), "playful".to_string())])
            );
        }

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = app_with(MockSubmissionSink::new(), SubmitPolicy::FireAndForget);
            app.state.push_error("boom".to_string());
            app.handle_key(key(KeyCode::Char('x'))).unwrap();
            assert_eq!(
                app.state.form.field("platform_name").map(|f| f.as_text()),
                Some("")
            );
            app.handle_key(key(KeyCode::Esc)).unwrap();
            assert!(!app.state.has_errors());
        }
    }
}
