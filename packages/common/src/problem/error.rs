use std::fmt;

/// Errors that can occur while reading problem definitions.
#[derive(Debug)]
pub enum StoreError {
    /// The problem id contains characters that cannot name a problem.
    InvalidId(String),
    /// An I/O error occurred.
    Io(std::io::Error),
    /// A stored definition could not be parsed.
    Malformed { id: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId(id) => write!(f, "invalid problem id: {id:?}"),
            Self::Io(err) => write!(f, "problem store IO error: {err}"),
            Self::Malformed { id, reason } => {
                write!(f, "malformed problem definition {id}: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
