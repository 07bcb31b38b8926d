use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use common::TransportMode;
pub use common::config::JudgeAppConfig;
use judge_client::SubmitOptions;

use crate::scheduler::PollPolicy;

/// Named presets of [`EvaluationProfile`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileName {
    /// Short interval, large budget, submission confirmed with `wait=true`.
    #[default]
    Fast,
    /// Long interval, small budget, fire-and-poll.
    BestEffort,
}

impl ProfileName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::BestEffort => "best_effort",
        }
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Self::Fast),
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            _ => Err(format!(
                "Invalid profile '{s}'. Valid values: fast, best_effort"
            )),
        }
    }
}

/// Everything that differs between evaluation flows.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EvaluationProfile {
    pub transport_mode: TransportMode,
    /// Poll ceiling. Must be at least 1.
    pub max_attempts: u32,
    /// Fixed wait between polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Submit with `wait=true` so the judge confirms the job.
    pub confirm_submission: bool,
    /// Send the auth header on submit as well as on polls.
    pub auth_on_submit: bool,
}

impl EvaluationProfile {
    pub fn fast() -> Self {
        Self {
            transport_mode: TransportMode::Base64,
            max_attempts: 20,
            poll_interval_ms: 500,
            confirm_submission: true,
            auth_on_submit: false,
        }
    }

    pub fn best_effort() -> Self {
        Self {
            transport_mode: TransportMode::PlainText,
            max_attempts: 10,
            poll_interval_ms: 1000,
            confirm_submission: false,
            auth_on_submit: true,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(self.max_attempts, self.poll_interval())
    }

    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions {
            wait: self.confirm_submission,
            authenticate: self.auth_on_submit,
        }
    }

    pub fn validate(&self, name: ProfileName) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::Message(format!(
                "evaluator.{name}.max_attempts must be at least 1"
            )));
        }
        Ok(())
    }
}

/// Evaluator-specific configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct EvaluatorConfig {
    /// Active profile. Default: "fast".
    #[serde(default)]
    pub profile: ProfileName,
    /// Directory holding `{id}.toml` problem definitions. Default: "problems".
    #[serde(default = "default_problems_dir")]
    pub problems_dir: String,
    #[serde(default = "EvaluationProfile::fast")]
    pub fast: EvaluationProfile,
    #[serde(default = "EvaluationProfile::best_effort")]
    pub best_effort: EvaluationProfile,
}

fn default_problems_dir() -> String {
    "problems".into()
}

impl EvaluatorConfig {
    pub fn profile(&self, name: ProfileName) -> &EvaluationProfile {
        match name {
            ProfileName::Fast => &self.fast,
            ProfileName::BestEffort => &self.best_effort,
        }
    }

    pub fn active_profile(&self) -> &EvaluationProfile {
        self.profile(self.profile)
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            profile: ProfileName::default(),
            problems_dir: default_problems_dir(),
            fast: EvaluationProfile::fast(),
            best_effort: EvaluationProfile::best_effort(),
        }
    }
}

/// Evaluator application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EvaluatorAppConfig {
    #[serde(default)]
    pub judge: JudgeAppConfig,
    #[serde(default)]
    pub evaluator: EvaluatorConfig,
}

impl EvaluatorAppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("JUDGE_CONFIG").unwrap_or_else(|_| "config/config".to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let fast = EvaluationProfile::fast();
        let best_effort = EvaluationProfile::best_effort();

        let s = Config::builder()
            .set_default("judge.url", "http://localhost:2358")?
            .set_default("judge.auth_key", "")?
            .set_default("judge.auth_header", "X-Auth-User")?
            .set_default("judge.request_timeout_secs", 30_i64)?
            .set_default("evaluator.profile", ProfileName::Fast.as_str())?
            .set_default("evaluator.problems_dir", "problems")?
            .set_default("evaluator.fast.transport_mode", "base64")?
            .set_default("evaluator.fast.max_attempts", fast.max_attempts as i64)?
            .set_default(
                "evaluator.fast.poll_interval_ms",
                fast.poll_interval_ms as i64,
            )?
            .set_default("evaluator.fast.confirm_submission", fast.confirm_submission)?
            .set_default("evaluator.fast.auth_on_submit", fast.auth_on_submit)?
            .set_default("evaluator.best_effort.transport_mode", "plain_text")?
            .set_default(
                "evaluator.best_effort.max_attempts",
                best_effort.max_attempts as i64,
            )?
            .set_default(
                "evaluator.best_effort.poll_interval_ms",
                best_effort.poll_interval_ms as i64,
            )?
            .set_default(
                "evaluator.best_effort.confirm_submission",
                best_effort.confirm_submission,
            )?
            .set_default(
                "evaluator.best_effort.auth_on_submit",
                best_effort.auth_on_submit,
            )?
            .add_source(File::with_name(config_path).required(false))
            // Override from environment (e.g., JUDGE__JUDGE__AUTH_KEY)
            .add_source(Environment::with_prefix("JUDGE").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.evaluator.fast.validate(ProfileName::Fast)?;
        config
            .evaluator
            .best_effort
            .validate(ProfileName::BestEffort)?;
        Ok(config)
    }
}
