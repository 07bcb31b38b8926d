//! Scripted in-memory judge for scheduler and orchestrator tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use common::TransportMode;
use judge_client::{
    JudgeApi, JudgeError, JudgeResult, StatusRecord, SubmissionToken, SubmitOptions,
    SubmitPayload,
};
use tokio_util::sync::CancellationToken;

pub(crate) const TOKEN: &str = "scripted-token";

pub(crate) struct ScriptedJudge {
    submit_error: Mutex<Option<JudgeError>>,
    script: Mutex<VecDeque<JudgeResult<StatusRecord>>>,
    repeat: Option<StatusRecord>,
    cancel_on_poll: Option<(u32, CancellationToken)>,
    submissions: Mutex<Vec<(SubmitPayload, SubmitOptions)>>,
    polls: AtomicU32,
}

impl ScriptedJudge {
    /// Answer polls with `records` in order.
    pub(crate) fn new(records: impl IntoIterator<Item = StatusRecord>) -> Self {
        Self {
            submit_error: Mutex::new(None),
            script: Mutex::new(records.into_iter().map(Ok).collect()),
            repeat: None,
            cancel_on_poll: None,
            submissions: Mutex::new(Vec::new()),
            polls: AtomicU32::new(0),
        }
    }

    /// Answer every poll with the same record.
    pub(crate) fn always(record: StatusRecord) -> Self {
        let mut judge = Self::new([]);
        judge.repeat = Some(record);
        judge
    }

    pub(crate) fn then_error(self, error: JudgeError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    pub(crate) fn failing_submit(self, error: JudgeError) -> Self {
        *self.submit_error.lock().unwrap() = Some(error);
        self
    }

    /// Cancel `token` while poll number `poll` (1-based) is in flight.
    pub(crate) fn cancel_during_poll(mut self, poll: u32, token: CancellationToken) -> Self {
        self.cancel_on_poll = Some((poll, token));
        self
    }

    pub(crate) fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }

    pub(crate) fn submissions(&self) -> Vec<(SubmitPayload, SubmitOptions)> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl JudgeApi for ScriptedJudge {
    async fn submit(
        &self,
        payload: &SubmitPayload,
        options: SubmitOptions,
    ) -> JudgeResult<SubmissionToken> {
        self.submissions
            .lock()
            .unwrap()
            .push((payload.clone(), options));
        match self.submit_error.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(SubmissionToken::new(TOKEN)),
        }
    }

    async fn fetch_status(
        &self,
        token: &SubmissionToken,
        _mode: TransportMode,
    ) -> JudgeResult<StatusRecord> {
        assert_eq!(token.as_str(), TOKEN, "polled with a foreign token");
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some((at, cancel)) = &self.cancel_on_poll {
            if *at == poll {
                cancel.cancel();
            }
        }

        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.repeat) {
            (Some(result), _) => result,
            (None, Some(record)) => Ok(record.clone()),
            (None, None) => Err(JudgeError::protocol(format!(
                "script exhausted at poll {poll}"
            ))),
        }
    }
}
