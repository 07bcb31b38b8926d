use serde::Deserialize;

/// Connection settings for the remote execution judge.
#[derive(Debug, Deserialize, Clone)]
pub struct JudgeAppConfig {
    /// Base URL of the judge. Default: "http://localhost:2358".
    #[serde(default = "default_judge_url")]
    pub url: String,
    /// Authentication key. Empty means no key is sent.
    #[serde(default)]
    pub auth_key: String,
    /// Header carrying `auth_key`. Default: "X-Auth-User".
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    /// Per-request HTTP timeout in seconds. Default: 30.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_judge_url() -> String {
    "http://localhost:2358".into()
}
fn default_auth_header() -> String {
    "X-Auth-User".into()
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl JudgeAppConfig {
    /// The auth key, if one is configured.
    pub fn auth_key(&self) -> Option<&str> {
        Some(self.auth_key.as_str()).filter(|k| !k.is_empty())
    }
}

impl Default for JudgeAppConfig {
    fn default() -> Self {
        Self {
            url: default_judge_url(),
            auth_key: String::new(),
            auth_header: default_auth_header(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
