use std::fmt;

/// Judge ordinal for "In Queue".
pub const QUEUED_ORDINAL: i32 = 1;
/// Judge ordinal for "Processing".
pub const PROCESSING_ORDINAL: i32 = 2;
/// Judge ordinal for "Accepted". Everything above it is a terminal failure,
/// everything below it is still running.
pub const ACCEPTED_ORDINAL: i32 = 3;

/// Status reported by the judge on a single poll.
///
/// The judge's failure taxonomy is open-ended, so failures keep their raw
/// ordinal instead of being enumerated. Unrecognised ordinals below the
/// accepted threshold keep theirs as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JudgeStatus {
    /// Waiting in the judge's queue.
    Queued,
    /// Picked up by a judge worker, not finished.
    Processing,
    /// Below the accepted threshold but not a known running state.
    Pending(i32),
    /// Ran to completion; stdout is the result.
    Accepted,
    /// Finished badly; stderr explains why.
    Failed(i32),
}

/// What the poll loop should do with a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusClass {
    Pending,
    Success,
    Failure,
}

impl JudgeStatus {
    /// Classify a raw `status_id` using the accepted-ordinal threshold.
    pub fn from_ordinal(ordinal: i32) -> Self {
        match ordinal {
            o if o == ACCEPTED_ORDINAL => Self::Accepted,
            o if o > ACCEPTED_ORDINAL => Self::Failed(o),
            QUEUED_ORDINAL => Self::Queued,
            PROCESSING_ORDINAL => Self::Processing,
            o => Self::Pending(o),
        }
    }

    /// Returns the raw judge ordinal.
    pub fn ordinal(&self) -> i32 {
        match self {
            Self::Queued => QUEUED_ORDINAL,
            Self::Processing => PROCESSING_ORDINAL,
            Self::Accepted => ACCEPTED_ORDINAL,
            Self::Pending(ordinal) | Self::Failed(ordinal) => *ordinal,
        }
    }

    pub fn class(&self) -> StatusClass {
        match self {
            Self::Queued | Self::Processing | Self::Pending(_) => StatusClass::Pending,
            Self::Accepted => StatusClass::Success,
            Self::Failed(_) => StatusClass::Failure,
        }
    }

    /// Returns true if no further transition will happen.
    pub fn is_terminal(&self) -> bool {
        self.class() != StatusClass::Pending
    }

    /// Human-readable name of the status, as the judge documents it.
    pub fn description(&self) -> &'static str {
        match self.ordinal() {
            1 => "In Queue",
            2 => "Processing",
            3 => "Accepted",
            4 => "Wrong Answer",
            5 => "Time Limit Exceeded",
            6 => "Compilation Error",
            7 => "Runtime Error (SIGSEGV)",
            8 => "Runtime Error (SIGXFSZ)",
            9 => "Runtime Error (SIGFPE)",
            10 => "Runtime Error (SIGABRT)",
            11 => "Runtime Error (NZEC)",
            12 => "Runtime Error (Other)",
            13 => "Internal Error",
            14 => "Exec Format Error",
            o if o > ACCEPTED_ORDINAL => "Unknown Failure",
            _ => "Unknown Pending",
        }
    }
}

impl From<i32> for JudgeStatus {
    fn from(ordinal: i32) -> Self {
        Self::from_ordinal(ordinal)
    }
}

impl fmt::Display for JudgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.ordinal())
    }
}
