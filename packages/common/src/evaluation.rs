use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the reference solutions can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// GCC C/C++.
    #[serde(rename = "C_CPP")]
    CCpp,
    /// Node.js.
    #[serde(rename = "JAVASCRIPT")]
    JavaScript,
    /// CPython 3.
    #[serde(rename = "PYTHON3")]
    Python3,
}

impl Language {
    pub const ALL: &'static [Language] = &[Self::CCpp, Self::JavaScript, Self::Python3];

    /// The judge's `language_id` for this language.
    pub fn judge_id(&self) -> u32 {
        match self {
            Self::CCpp => 54,
            Self::JavaScript => 63,
            Self::Python3 => 71,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CCpp => "C_CPP",
            Self::JavaScript => "JAVASCRIPT",
            Self::Python3 => "PYTHON3",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown language name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid language '{invalid}'. Valid values: C_CPP, JAVASCRIPT, PYTHON3")]
pub struct ParseLanguageError {
    invalid: String,
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c_cpp" | "cpp" | "c++" | "c" => Ok(Self::CCpp),
            "javascript" | "js" => Ok(Self::JavaScript),
            "python3" | "python" | "py" => Ok(Self::Python3),
            _ => Err(ParseLanguageError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// How source, stdin and output travel inside the judge's JSON.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    /// Fields are sent and received verbatim.
    PlainText,
    /// Fields are base64 text on the wire.
    #[default]
    Base64,
}

impl TransportMode {
    /// Value of the judge's `base64_encoded` flag.
    pub fn is_base64(&self) -> bool {
        matches!(self, Self::Base64)
    }
}

/// Limits passed through to the judge untouched.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// CPU time limit in seconds.
    pub cpu_time_limit_secs: f64,
    /// Memory limit in kilobytes.
    pub memory_limit_kb: u64,
}

impl ResourceLimits {
    pub fn new(cpu_time_limit_secs: f64, memory_limit_kb: u64) -> Self {
        Self {
            cpu_time_limit_secs,
            memory_limit_kb,
        }
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu_time_limit_secs: 2.0,
            memory_limit_kb: 128_000,
        }
    }
}

/// One piece of code and its input, ready to be dispatched to the judge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    source_code: String,
    stdin: String,
    language_id: u32,
    limits: ResourceLimits,
}

impl EvaluationRequest {
    pub fn new(
        source_code: impl Into<String>,
        stdin: impl Into<String>,
        language: Language,
        limits: ResourceLimits,
    ) -> Self {
        Self::with_language_id(source_code, stdin, language.judge_id(), limits)
    }

    /// Build a request for a judge language that has no [`Language`] variant.
    pub fn with_language_id(
        source_code: impl Into<String>,
        stdin: impl Into<String>,
        language_id: u32,
        limits: ResourceLimits,
    ) -> Self {
        Self {
            source_code: source_code.into(),
            stdin: stdin.into(),
            language_id,
            limits,
        }
    }

    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn language_id(&self) -> u32 {
        self.language_id
    }

    pub fn limits(&self) -> ResourceLimits {
        self.limits
    }
}
