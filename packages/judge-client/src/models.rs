use serde::{Deserialize, Serialize};
use std::fmt;

use common::JudgeStatus;

/// Body of `POST /submissions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmitPayload {
    pub language_id: u32,
    pub source_code: String,
    pub stdin: String,
    /// CPU time limit in seconds.
    pub cpu_time_limit: f64,
    /// Memory limit in kilobytes.
    pub memory_limit: u64,
    /// Whether `source_code`, `stdin` and the response fields are base64.
    pub base64_encoded: bool,
}

/// Per-call switches for `submit`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Ask the judge to confirm the job synchronously (`wait=true`).
    pub wait: bool,
    /// Send the auth header on the submit request.
    pub authenticate: bool,
}

/// Opaque handle for a dispatched evaluation, valid only in the judge's namespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionToken(String);

impl SubmissionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of `POST /submissions`.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// One poll's worth of judge state. Output fields are still transport-encoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status_id: i32,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}

impl StatusRecord {
    pub fn new(status_id: i32) -> Self {
        Self {
            status_id,
            stdout: None,
            stderr: None,
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    pub fn status(&self) -> JudgeStatus {
        JudgeStatus::from_ordinal(self.status_id)
    }
}
