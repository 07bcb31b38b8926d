//! Turns a poll resolution into the user-facing outcome.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use common::{EvaluationOutcome, StatusClass, TransportMode};
use judge_client::{JudgeError, JudgeResult};

use crate::scheduler::PollResolution;

/// Reverse the transport encoding of one output field.
///
/// Absent and empty fields both decode to `""`. The judge wraps long base64
/// output across lines, so ASCII whitespace is dropped before decoding.
pub fn decode_text(raw: Option<&str>, mode: TransportMode) -> JudgeResult<String> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(String::new()),
    };

    match mode {
        TransportMode::PlainText => Ok(raw.to_string()),
        TransportMode::Base64 => {
            let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            let bytes = STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| JudgeError::protocol(format!("malformed base64 output: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|e| JudgeError::protocol(format!("decoded output is not UTF-8: {e}")))
        }
    }
}

pub fn interpret(
    resolution: PollResolution,
    mode: TransportMode,
) -> JudgeResult<EvaluationOutcome> {
    match resolution {
        PollResolution::TimedOut { attempts } => Ok(EvaluationOutcome::timed_out(attempts)),
        PollResolution::Cancelled { attempts } => Ok(EvaluationOutcome::cancelled(attempts)),
        PollResolution::Terminal { record, .. } => match record.status().class() {
            StatusClass::Success => {
                let stdout = decode_text(record.stdout.as_deref(), mode)?;
                Ok(EvaluationOutcome::accepted(stdout))
            }
            StatusClass::Failure => {
                let stderr = decode_text(record.stderr.as_deref(), mode)?;
                Ok(EvaluationOutcome::rejected(record.status_id, stderr))
            }
            StatusClass::Pending => Err(JudgeError::protocol(format!(
                "status {} resolved as terminal",
                record.status_id
            ))),
        },
    }
}
