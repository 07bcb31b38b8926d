//! Network client for the remote execution judge.
//!
//! The client issues exactly one HTTP round trip per call and never retries;
//! polling and retry policy belong to the caller.

pub mod client;
pub mod error;
pub mod models;

pub use client::{JUDGE_CLIENT_USER_AGENT, JudgeApi, JudgeClient};
pub use error::{JudgeError, JudgeResult};
pub use models::{StatusRecord, SubmissionToken, SubmitOptions, SubmitPayload};
