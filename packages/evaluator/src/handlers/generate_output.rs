//! Expected-output generation for test cases.
//!
//! Runs a problem's reference solution against test inputs so the outputs can
//! be stored alongside the inputs.

use common::EvaluationOutcome;
use common::problem::{ProblemDefinition, ProblemStore};
use futures::future::join_all;
use judge_client::JudgeApi;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use crate::error::{EvaluatorError, Result};
use crate::orchestrator::Evaluator;

async fn load_problem<S>(store: &S, problem_id: &str) -> Result<ProblemDefinition>
where
    S: ProblemStore + ?Sized,
{
    store
        .find_problem(problem_id)
        .await?
        .ok_or_else(|| EvaluatorError::ProblemNotFound(problem_id.to_string()))
}

/// Run the reference solution of `problem_id` against `input`.
#[instrument(skip(store, evaluator, input, cancel), fields(input_len = input.len()))]
pub async fn generate_expected_output<S, J>(
    store: &S,
    evaluator: &Evaluator<J>,
    problem_id: &str,
    input: &str,
    cancel: &CancellationToken,
) -> Result<EvaluationOutcome>
where
    S: ProblemStore + ?Sized,
    J: JudgeApi,
{
    let problem = load_problem(store, problem_id).await?;
    let outcome = evaluator
        .evaluate(&problem.reference_request(input), cancel)
        .await?;
    Ok(outcome)
}

/// Run the reference solution against every input concurrently.
///
/// Outcomes are returned in input order. The first infrastructure error is
/// returned after every evaluation has finished.
#[instrument(skip(store, evaluator, inputs, cancel), fields(inputs = inputs.len()))]
pub async fn generate_expected_outputs<S, J>(
    store: &S,
    evaluator: &Evaluator<J>,
    problem_id: &str,
    inputs: &[String],
    cancel: &CancellationToken,
) -> Result<Vec<EvaluationOutcome>>
where
    S: ProblemStore + ?Sized,
    J: JudgeApi,
{
    let problem = load_problem(store, problem_id).await?;
    let requests: Vec<_> = inputs
        .iter()
        .map(|input| problem.reference_request(input.as_str()))
        .collect();

    let results = join_all(
        requests
            .iter()
            .map(|request| evaluator.evaluate(request, cancel)),
    )
    .await;

    let outcomes = results
        .into_iter()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    info!(
        accepted = outcomes.iter().filter(|o| o.ok).count(),
        total = outcomes.len(),
        "Generated expected outputs"
    );
    Ok(outcomes)
}
