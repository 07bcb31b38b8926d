//! HTTP client for the execution judge.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use common::TransportMode;
use common::config::JudgeAppConfig;

use crate::error::{JudgeError, JudgeResult};
use crate::models::{StatusRecord, SubmissionToken, SubmitOptions, SubmitPayload, SubmitResponse};

/// User agent for judge requests.
pub const JUDGE_CLIENT_USER_AGENT: &str = concat!("judge-client/", env!("CARGO_PKG_VERSION"));

/// Fields requested on every poll.
const STATUS_FIELDS: &str = "stdout,stderr,status_id";

/// Network conversation with the judge: submit a job, poll its status.
#[async_trait]
pub trait JudgeApi: Send + Sync {
    /// Create an evaluation job and return its token.
    async fn submit(
        &self,
        payload: &SubmitPayload,
        options: SubmitOptions,
    ) -> JudgeResult<SubmissionToken>;

    /// Fetch the current status of a job. Output fields are returned raw.
    async fn fetch_status(
        &self,
        token: &SubmissionToken,
        mode: TransportMode,
    ) -> JudgeResult<StatusRecord>;
}

/// reqwest-backed [`JudgeApi`].
#[derive(Debug, Clone)]
pub struct JudgeClient {
    client: reqwest::Client,
    base_url: Url,
    auth: Option<(HeaderName, HeaderValue)>,
}

impl JudgeClient {
    /// Create a client from the judge connection settings.
    pub fn new(config: &JudgeAppConfig) -> JudgeResult<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| JudgeError::config(format!("invalid judge url {:?}: {e}", config.url)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(JudgeError::config(format!(
                "judge url must be http(s): {:?}",
                config.url
            )));
        }

        let auth = match config.auth_key() {
            Some(key) => {
                let name = HeaderName::from_bytes(config.auth_header.as_bytes()).map_err(|e| {
                    JudgeError::config(format!("invalid auth header {:?}: {e}", config.auth_header))
                })?;
                let mut value = HeaderValue::from_str(key)
                    .map_err(|e| JudgeError::config(format!("invalid auth key: {e}")))?;
                value.set_sensitive(true);
                Some((name, value))
            }
            None => None,
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(JUDGE_CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| JudgeError::config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth,
        })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check if an auth key is configured.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Append path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> JudgeResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                JudgeError::config(format!("judge url {} cannot be a base", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(segments);
        }
        Ok(url)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some((name, value)) => request.header(name.clone(), value.clone()),
            None => request,
        }
    }
}

#[async_trait]
impl JudgeApi for JudgeClient {
    async fn submit(
        &self,
        payload: &SubmitPayload,
        options: SubmitOptions,
    ) -> JudgeResult<SubmissionToken> {
        let url = self.endpoint(&["submissions"])?;
        debug!(
            url = %url,
            language_id = payload.language_id,
            base64_encoded = payload.base64_encoded,
            wait = options.wait,
            "submitting evaluation"
        );

        let mut request = self
            .client
            .post(url)
            .query(&[
                ("base64_encoded", bool_param(payload.base64_encoded)),
                ("wait", bool_param(options.wait)),
            ])
            .json(payload);
        if options.authenticate {
            request = self.with_auth(request);
        }

        let response = request.send().await?;
        let body: SubmitResponse = read_json(response, "submission").await?;

        match body.token {
            Some(token) if !token.trim().is_empty() => {
                debug!(token = %token, "submission accepted");
                Ok(SubmissionToken::new(token))
            }
            _ => Err(JudgeError::protocol("submission response carries no token")),
        }
    }

    async fn fetch_status(
        &self,
        token: &SubmissionToken,
        mode: TransportMode,
    ) -> JudgeResult<StatusRecord> {
        let url = self.endpoint(&["submissions", token.as_str()])?;
        debug!(url = %url, "polling submission status");

        let request = self
            .client
            .get(url)
            .query(&[
                ("fields", STATUS_FIELDS),
                ("base64_encoded", bool_param(mode.is_base64())),
            ])
            .header(CACHE_CONTROL, "no-cache");

        let response = self.with_auth(request).send().await?;
        read_json(response, "status").await
    }
}

fn bool_param(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Map non-2xx to a transport error, then parse the body.
async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> JudgeResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(JudgeError::transport(format!(
            "HTTP {} for {what} request: {}",
            status.as_u16(),
            truncate(&body, 200)
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| JudgeError::protocol(format!("failed to parse {what} response: {e}")))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> JudgeAppConfig {
        JudgeAppConfig {
            url: url.into(),
            ..JudgeAppConfig::default()
        }
    }

    #[test]
    fn test_endpoint_normalizes_trailing_slash() {
        let client = JudgeClient::new(&config("http://judge.local/api/")).unwrap();
        let url = client.endpoint(&["submissions", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://judge.local/api/submissions/abc");
    }

    #[test]
    fn test_endpoint_escapes_token() {
        let client = JudgeClient::new(&config("http://judge.local")).unwrap();
        let url = client.endpoint(&["submissions", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://judge.local/submissions/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = JudgeClient::new(&config("mailto:judge@example.com")).unwrap_err();
        assert!(matches!(err, JudgeError::Config { .. }));
        assert!(JudgeClient::new(&config("not a url")).is_err());
    }

    #[test]
    fn test_auth_only_when_key_configured() {
        let client = JudgeClient::new(&config("http://judge.local")).unwrap();
        assert!(!client.is_authenticated());

        let keyed = JudgeClient::new(&JudgeAppConfig {
            auth_key: "secret".into(),
            ..config("http://judge.local")
        })
        .unwrap();
        assert!(keyed.is_authenticated());
    }

    #[test]
    fn test_invalid_auth_header_is_config_error() {
        let result = JudgeClient::new(&JudgeAppConfig {
            auth_key: "secret".into(),
            auth_header: "not a header".into(),
            ..config("http://judge.local")
        });
        assert!(matches!(result, Err(JudgeError::Config { .. })));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }
}
