use serde::{Deserialize, Serialize};

/// Message reported when the poll ceiling is reached.
pub const TIME_LIMIT_EXCEEDED_MESSAGE: &str = "Time limit exceeded";
/// Message reported when the caller cancels a running evaluation.
pub const CANCELLED_MESSAGE: &str = "Evaluation cancelled";

/// How an evaluation came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Resolution {
    /// The judge reported a terminal-success status.
    Accepted,
    /// The judge reported a terminal-failure status.
    Rejected { status_id: i32 },
    /// The judge never reached a terminal status within the poll budget.
    TimedOut { attempts: u32 },
    /// The caller cancelled before a terminal status was observed.
    Cancelled { attempts: u32 },
}

/// Result of one evaluation, as shown to users.
///
/// `ok` carries decoded stdout in `message`; otherwise `message` holds decoded
/// stderr or a control message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub ok: bool,
    pub message: String,
    pub resolution: Resolution,
}

impl EvaluationOutcome {
    pub fn accepted(stdout: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: stdout.into(),
            resolution: Resolution::Accepted,
        }
    }

    pub fn rejected(status_id: i32, stderr: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: stderr.into(),
            resolution: Resolution::Rejected { status_id },
        }
    }

    pub fn timed_out(attempts: u32) -> Self {
        Self {
            ok: false,
            message: TIME_LIMIT_EXCEEDED_MESSAGE.to_string(),
            resolution: Resolution::TimedOut { attempts },
        }
    }

    pub fn cancelled(attempts: u32) -> Self {
        Self {
            ok: false,
            message: CANCELLED_MESSAGE.to_string(),
            resolution: Resolution::Cancelled { attempts },
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self.resolution, Resolution::TimedOut { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.resolution, Resolution::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_outcomes_are_distinct() {
        let timeout = EvaluationOutcome::timed_out(20);
        let cancelled = EvaluationOutcome::cancelled(2);

        assert!(!timeout.ok);
        assert!(!cancelled.ok);
        assert_eq!(timeout.message, "Time limit exceeded");
        assert!(timeout.is_timed_out() && !timeout.is_cancelled());
        assert!(cancelled.is_cancelled() && !cancelled.is_timed_out());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(EvaluationOutcome::rejected(6, "boom")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["message"], "boom");
        assert_eq!(json["resolution"]["kind"], "rejected");
        assert_eq!(json["resolution"]["status_id"], 6);
    }
}
