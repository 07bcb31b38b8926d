use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::evaluation::{EvaluationRequest, Language, ResourceLimits};

/// The parts of a stored problem the evaluator reads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblemDefinition {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Known-correct solution used to produce expected outputs.
    pub reference_solution: String,
    pub reference_language: Language,
    /// CPU time limit in seconds.
    pub cpu_time_limit_secs: f64,
    /// Memory limit in kilobytes.
    pub memory_limit_kb: u64,
}

impl ProblemDefinition {
    pub fn limits(&self) -> ResourceLimits {
        ResourceLimits::new(self.cpu_time_limit_secs, self.memory_limit_kb)
    }

    /// Request that runs the reference solution against `input`.
    pub fn reference_request(&self, input: impl Into<String>) -> EvaluationRequest {
        EvaluationRequest::new(
            self.reference_solution.clone(),
            input,
            self.reference_language,
            self.limits(),
        )
    }
}

/// Read-only lookup of problem definitions.
#[async_trait]
pub trait ProblemStore: Send + Sync {
    /// Find a problem by id. Returns `Ok(None)` if it does not exist.
    async fn find_problem(&self, id: &str) -> Result<Option<ProblemDefinition>, StoreError>;
}

/// Problem ids are used as file names, so only `[A-Za-z0-9_-]` is allowed.
pub(crate) fn validate_id(id: &str) -> Result<(), StoreError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidId(id.to_string()))
    }
}
