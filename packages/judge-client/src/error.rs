use thiserror::Error;

/// Failures talking to the judge.
#[derive(Debug, Error)]
pub enum JudgeError {
    /// The request never produced a usable response (network failure,
    /// timeout, or a non-2xx status).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The judge answered, but the payload did not have the expected shape.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// The client was configured with an unusable value.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl JudgeError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::protocol(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Result type for judge operations.
pub type JudgeResult<T> = Result<T, JudgeError>;
