//! Builds the judge's submission body from an [`EvaluationRequest`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use common::{EvaluationRequest, TransportMode};
use judge_client::SubmitPayload;

/// Apply the transport encoding to one text field.
pub fn encode_text(text: &str, mode: TransportMode) -> String {
    match mode {
        TransportMode::PlainText => text.to_string(),
        TransportMode::Base64 => STANDARD.encode(text.as_bytes()),
    }
}

/// Limits are passed through unchanged; the stored problem owns their correctness.
pub fn encode(request: &EvaluationRequest, mode: TransportMode) -> SubmitPayload {
    let limits = request.limits();
    SubmitPayload {
        language_id: request.language_id(),
        source_code: encode_text(request.source_code(), mode),
        stdin: encode_text(request.stdin(), mode),
        cpu_time_limit: limits.cpu_time_limit_secs,
        memory_limit: limits.memory_limit_kb,
        base64_encoded: mode.is_base64(),
    }
}
