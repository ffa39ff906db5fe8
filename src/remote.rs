use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TINIFY_ENDPOINT, TINIFY_API_USER};
use crate::error::{RemoteError, Result, SqueezeError};
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Something that takes encoded image bytes and returns smaller ones.
pub trait RemoteOptimizer: Send + Sync {
    fn optimize(&self, payload: &[u8]) -> std::result::Result<Vec<u8>, RemoteError>;
}

impl<F> RemoteOptimizer for F
where
    F: Fn(&[u8]) -> std::result::Result<Vec<u8>, RemoteError> + Send + Sync,
{
    fn optimize(&self, payload: &[u8]) -> std::result::Result<Vec<u8>, RemoteError> {
        self(payload)
    }
}

#[derive(Debug, Clone)]
pub struct TinifyOptions {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl TinifyOptions {
    /// Builds options from CLI/env values. A missing or blank key is an error.
    pub fn new(
        api_key: Option<String>,
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(SqueezeError::MissingApiKey)?;

        Ok(Self {
            api_key,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_TINIFY_ENDPOINT.to_string()),
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)),
        })
    }

    pub fn shrink_url(&self) -> String {
        format!("{}/shrink", self.endpoint.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ShrinkResponse {
    output: Option<ShrinkOutput>,
}

#[derive(Debug, Deserialize)]
struct ShrinkOutput {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: String,
    message: String,
}

/// Client for the Tinify (TinyPNG) HTTP API: upload to `/shrink`, then
/// download the result from the returned output URL.
pub struct TinifyClient {
    http: Client,
    options: TinifyOptions,
}

impl TinifyClient {
    pub fn new(options: TinifyOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("wallpaper-squeeze/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, options })
    }

    pub fn options(&self) -> &TinifyOptions {
        &self.options
    }

    fn shrink(&self, payload: &[u8]) -> std::result::Result<String, RemoteError> {
        let response = self
            .http
            .post(self.options.shrink_url())
            .basic_auth(TINIFY_API_USER, Some(&self.options.api_key))
            .body(payload.to_vec())
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().map_err(transport_error)?;

        if !status.is_success() {
            return Err(classify_response(status.as_u16(), &body));
        }

        let from_body = serde_json::from_str::<ShrinkResponse>(&body)
            .ok()
            .and_then(|parsed| parsed.output)
            .and_then(|output| output.url);

        from_body.or(location).ok_or_else(|| {
            RemoteError::UnexpectedResponse("response did not include an output URL".to_string())
        })
    }

    fn download(&self, url: &str) -> std::result::Result<Vec<u8>, RemoteError> {
        let response = self
            .http
            .get(url)
            .basic_auth(TINIFY_API_USER, Some(&self.options.api_key))
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_response(status.as_u16(), &body));
        }

        let bytes = response.bytes().map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

impl RemoteOptimizer for TinifyClient {
    fn optimize(&self, payload: &[u8]) -> std::result::Result<Vec<u8>, RemoteError> {
        let url = self.shrink(payload)?;
        debug!("Optimized output available at {}", url);
        self.download(&url)
    }
}

fn transport_error(e: reqwest::Error) -> RemoteError {
    RemoteError::Connection(e.to_string())
}

/// Map a non-success HTTP status (and its JSON error body, if any) to the
/// service's failure category.
pub fn classify_response(status: u16, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ServiceErrorBody>(body)
        .map(|parsed| format!("{} ({}/{})", parsed.message, parsed.error, status))
        .unwrap_or_else(|_| format!("HTTP status {}", status));

    match status {
        401 | 429 => RemoteError::Account(message),
        400..=499 => RemoteError::Client(message),
        500..=599 => RemoteError::Server(message),
        _ => RemoteError::UnexpectedResponse(message),
    }
}
