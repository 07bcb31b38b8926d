use common::problem::StoreError;
use judge_client::JudgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Judge(#[from] JudgeError),

    #[error("Problem store error: {0}")]
    Store(#[from] StoreError),

    #[error("Problem not found: {0}")]
    ProblemNotFound(String),
}

pub type Result<T> = std::result::Result<T, EvaluatorError>;
