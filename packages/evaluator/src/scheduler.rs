//! Bounded submit-then-poll loop.

use std::time::Duration;

use common::{StatusClass, TransportMode};
use judge_client::{JudgeApi, JudgeResult, StatusRecord, SubmissionToken};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Poll budget and fixed inter-poll wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }
}

/// How the poll loop ended. `attempts` counts `fetch_status` calls issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollResolution {
    Terminal { record: StatusRecord, attempts: u32 },
    TimedOut { attempts: u32 },
    Cancelled { attempts: u32 },
}

impl PollResolution {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Terminal { attempts, .. }
            | Self::TimedOut { attempts }
            | Self::Cancelled { attempts } => *attempts,
        }
    }
}

/// Poll `token` until the judge reports a terminal status, the budget runs
/// out, or `cancel` fires.
///
/// Errors from `fetch_status` end the loop immediately; they are never
/// treated as a non-terminal status. Cancellation is observed between polls
/// and right after each poll returns, never while a request is in flight.
pub async fn resolve<J>(
    client: &J,
    token: &SubmissionToken,
    mode: TransportMode,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> JudgeResult<PollResolution>
where
    J: JudgeApi + ?Sized,
{
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        if cancel.is_cancelled() {
            return Ok(cancelled(token, attempts));
        }

        let record = client.fetch_status(token, mode).await?;
        attempts += 1;

        if cancel.is_cancelled() {
            return Ok(cancelled(token, attempts));
        }

        let status = record.status();
        if status.class() != StatusClass::Pending {
            info!(token = %token, attempts, status = %status, "Judge reached terminal status");
            return Ok(PollResolution::Terminal { record, attempts });
        }
        debug!(token = %token, attempts, status = %status, "Judge still running");

        if attempts < policy.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(cancelled(token, attempts)),
                _ = tokio::time::sleep(policy.interval) => {}
            }
        }
    }

    warn!(token = %token, attempts, "Poll budget exhausted without terminal status");
    Ok(PollResolution::TimedOut { attempts })
}

fn cancelled(token: &SubmissionToken, attempts: u32) -> PollResolution {
    warn!(token = %token, attempts, "Polling cancelled");
    PollResolution::Cancelled { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedJudge, TOKEN};
    use judge_client::JudgeError;
    use tokio::time::Instant;

    fn token() -> SubmissionToken {
        SubmissionToken::new(TOKEN)
    }

    fn policy(max_attempts: u32) -> PollPolicy {
        PollPolicy::new(max_attempts, Duration::from_secs(1))
    }

    fn queued() -> StatusRecord {
        StatusRecord::new(1)
    }

    async fn run(judge: &ScriptedJudge, max_attempts: u32) -> JudgeResult<PollResolution> {
        resolve(
            judge,
            &token(),
            TransportMode::Base64,
            policy(max_attempts),
            &CancellationToken::new(),
        )
        .await
    }

    async fn run_until_cancelled(
        judge: &ScriptedJudge,
        cancel: &CancellationToken,
    ) -> JudgeResult<PollResolution> {
        resolve(judge, &token(), TransportMode::Base64, policy(20), cancel)
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_after_n_pending_polls() {
        let mut script = vec![queued(); 4];
        script.push(StatusRecord::new(3).with_stdout("NAo="));
        let judge = ScriptedJudge::new(script);

        let resolution = run(&judge, 10).await.unwrap();

        assert_eq!(
            resolution,
            PollResolution::Terminal {
                record: StatusRecord::new(3).with_stdout("NAo="),
                attempts: 5,
            }
        );
        assert_eq!(judge.polls(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_on_last_allowed_poll() {
        let judge = ScriptedJudge::new([queued(), StatusRecord::new(2), StatusRecord::new(3)]);
        let resolution = run(&judge, 3).await.unwrap();

        assert!(matches!(
            resolution,
            PollResolution::Terminal { attempts: 3, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_after_exactly_max_attempts() {
        let judge = ScriptedJudge::new([queued(), queued(), queued(), StatusRecord::new(3)]);
        let resolution = run(&judge, 3).await.unwrap();

        assert_eq!(resolution, PollResolution::TimedOut { attempts: 3 });
        assert_eq!(judge.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn ordinal_threshold_boundaries() {
        let success = ScriptedJudge::new([StatusRecord::new(3)]);
        assert!(matches!(
            run(&success, 5).await.unwrap(),
            PollResolution::Terminal { attempts: 1, .. }
        ));

        let failure = ScriptedJudge::new([StatusRecord::new(4)]);
        assert!(matches!(
            run(&failure, 5).await.unwrap(),
            PollResolution::Terminal { attempts: 1, .. }
        ));

        let processing = ScriptedJudge::new([StatusRecord::new(2), StatusRecord::new(4)]);
        assert!(matches!(
            run(&processing, 5).await.unwrap(),
            PollResolution::Terminal { attempts: 2, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_fixed_interval_between_polls() {
        let judge = ScriptedJudge::new([queued(), queued(), StatusRecord::new(3)]);
        let start = Instant::now();

        run(&judge, 10).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn no_wait_after_final_attempt() {
        let judge = ScriptedJudge::always(queued());
        let start = Instant::now();

        let resolution = run(&judge, 20).await.unwrap();

        assert_eq!(resolution, PollResolution::TimedOut { attempts: 20 });
        assert_eq!(judge.polls(), 20);
        assert_eq!(start.elapsed(), Duration::from_secs(19));
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_error_is_not_retried() {
        let judge = ScriptedJudge::new([queued()]).then_error(JudgeError::transport("reset"));

        let err = run(&judge, 20).await.unwrap_err();

        assert!(err.is_transport());
        assert_eq!(judge.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_while_poll_in_flight() {
        let cancel = CancellationToken::new();
        let judge = ScriptedJudge::always(queued()).cancel_during_poll(3, cancel.clone());

        let resolution = run_until_cancelled(&judge, &cancel).await.unwrap();

        assert_eq!(resolution, PollResolution::Cancelled { attempts: 3 });
        assert_eq!(judge.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_wait_skips_next_poll() {
        let cancel = CancellationToken::new();
        let judge = ScriptedJudge::always(queued());

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let resolution = run_until_cancelled(&judge, &cancel).await.unwrap();

        assert_eq!(resolution, PollResolution::Cancelled { attempts: 2 });
        assert_eq!(judge.polls(), 2);
        assert_eq!(start.elapsed(), Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_issues_no_poll() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let judge = ScriptedJudge::always(queued());

        let resolution = run_until_cancelled(&judge, &cancel).await.unwrap();

        assert_eq!(resolution, PollResolution::Cancelled { attempts: 0 });
        assert_eq!(judge.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_wins_over_terminal_record_returned_after_it() {
        let cancel = CancellationToken::new();
        let judge = ScriptedJudge::new([StatusRecord::new(3)]);
        let judge = judge.cancel_during_poll(1, cancel.clone());

        let resolution = run_until_cancelled(&judge, &cancel).await.unwrap();

        assert_eq!(resolution.attempts(), 1);
        assert!(matches!(resolution, PollResolution::Cancelled { .. }));
    }
}
