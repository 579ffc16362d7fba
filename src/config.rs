//! Configuration handling for the wizard

use crate::document::{default_sections, BriefGenerator, BriefSection, DEFAULT_STUDIO};
use crate::submission::SubmitPolicy;
use anyhow::{Context, Result};
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Delay before the completion screen under fire-and-forget
const DEFAULT_COMPLETION_DELAY_MS: u64 = 800;
/// How long a validation warning stays on screen
const DEFAULT_WARNING_DURATION_MS: u64 = 3000;

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WizardConfig {
    /// Submission endpoint; nothing is sent when unset
    pub endpoint: Option<String>,
    /// Whether the UI waits for the endpoint
    pub submit_policy: Option<SubmitPolicy>,
    /// Completion delay for fire-and-forget, in milliseconds
    pub completion_delay_ms: Option<u64>,
    /// Validation warning lifetime, in milliseconds
    pub warning_duration_ms: Option<u64>,
    /// Where the brief is saved
    pub output_dir: Option<PathBuf>,
    /// Name printed in the brief header and footer
    pub studio_name: Option<String>,
    /// Section list of the brief
    pub brief_sections: Option<Vec<BriefSection>>,
}

impl WizardConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "discovery", "discovery-wizard")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "discovery", "discovery-wizard")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: WizardConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Apply `DISCOVERY_*` overrides through `lookup`
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(endpoint) = lookup("DISCOVERY_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(policy) = lookup("DISCOVERY_SUBMIT_POLICY") {
            let policy = policy
                .parse::<SubmitPolicy>()
                .map_err(anyhow::Error::msg)
                .context("DISCOVERY_SUBMIT_POLICY")?;
            self.submit_policy = Some(policy);
        }
        if let Some(dir) = lookup("DISCOVERY_OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Endpoint, ignoring blank values
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    pub fn submit_policy(&self) -> SubmitPolicy {
        self.submit_policy.unwrap_or_default()
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(
            self.completion_delay_ms
                .unwrap_or(DEFAULT_COMPLETION_DELAY_MS),
        )
    }

    pub fn warning_duration(&self) -> Duration {
        Duration::from_millis(
            self.warning_duration_ms
                .unwrap_or(DEFAULT_WARNING_DURATION_MS),
        )
    }

    /// Output directory: configured, else the user's downloads, else cwd
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|u| u.download_dir().map(|d| d.to_path_buf())))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn brief_generator(&self) -> BriefGenerator {
        BriefGenerator {
            sections: self
                .brief_sections
                .clone()
                .unwrap_or_else(default_sections),
            studio_name: self
                .studio_name
                .clone()
                .unwrap_or_else(|| DEFAULT_STUDIO.to_string()),
            output_dir: self.output_dir(),
        }
    }
}
