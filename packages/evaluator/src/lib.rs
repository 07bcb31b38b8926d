pub mod config;
pub mod encoder;
pub mod error;
pub mod handlers;
pub mod interpreter;
pub mod orchestrator;
pub mod scheduler;

#[cfg(test)]
mod test_support;

pub use config::{EvaluationProfile, EvaluatorAppConfig, EvaluatorConfig, ProfileName};
pub use error::{EvaluatorError, Result};
pub use orchestrator::Evaluator;
pub use scheduler::{PollPolicy, PollResolution};
