use std::sync::Arc;

use common::{EvaluationOutcome, EvaluationRequest, Language, ResourceLimits};
use judge_client::{JudgeApi, JudgeResult};
use tokio_util::sync::CancellationToken;
use tracing::{Span, info, instrument};
use uuid::Uuid;

use crate::config::EvaluationProfile;
use crate::encoder::encode;
use crate::interpreter::interpret;
use crate::scheduler::resolve;

/// Runs code on the remote judge: encode, submit, poll, interpret.
///
/// Holds no per-evaluation state, so one instance can serve any number of
/// concurrent evaluations.
pub struct Evaluator<J> {
    client: Arc<J>,
    profile: EvaluationProfile,
}

impl<J> Clone for Evaluator<J> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            profile: self.profile.clone(),
        }
    }
}

impl<J: JudgeApi> Evaluator<J> {
    pub fn new(client: Arc<J>, profile: EvaluationProfile) -> Self {
        Self { client, profile }
    }

    pub fn profile(&self) -> &EvaluationProfile {
        &self.profile
    }

    pub fn client(&self) -> &J {
        &self.client
    }

    /// Evaluate one request.
    ///
    /// Transport and protocol failures are returned as errors; time-outs and
    /// cancellation come back as a non-ok [`EvaluationOutcome`].
    #[instrument(
        skip_all,
        fields(
            evaluation_id = %Uuid::new_v4(),
            language_id = request.language_id(),
            token = tracing::field::Empty,
        )
    )]
    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
        cancel: &CancellationToken,
    ) -> JudgeResult<EvaluationOutcome> {
        if cancel.is_cancelled() {
            info!("Cancelled before submission");
            return Ok(EvaluationOutcome::cancelled(0));
        }

        let mode = self.profile.transport_mode;
        let payload = encode(request, mode);
        let token = self
            .client
            .submit(&payload, self.profile.submit_options())
            .await?;
        Span::current().record("token", tracing::field::display(&token));

        let resolution = resolve(
            self.client.as_ref(),
            &token,
            mode,
            self.profile.poll_policy(),
            cancel,
        )
        .await?;
        let attempts = resolution.attempts();

        let outcome = interpret(resolution, mode)?;
        info!(
            ok = outcome.ok,
            resolution = ?outcome.resolution,
            attempts,
            "Evaluation finished"
        );
        Ok(outcome)
    }

    /// Run a solution against one input under the given limits.
    pub async fn evaluate_solution(
        &self,
        source_code: &str,
        language: Language,
        input: &str,
        limits: ResourceLimits,
        cancel: &CancellationToken,
    ) -> JudgeResult<EvaluationOutcome> {
        let request = EvaluationRequest::new(source_code, input, language, limits);
        self.evaluate(&request, cancel).await
    }
}
