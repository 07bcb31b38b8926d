pub mod config;
pub mod evaluation;
pub mod judge_status;
pub mod outcome;
pub mod problem;

pub use evaluation::{EvaluationRequest, Language, ResourceLimits, TransportMode};
pub use judge_status::{ACCEPTED_ORDINAL, JudgeStatus, StatusClass};
pub use outcome::{EvaluationOutcome, Resolution};
