use std::time::Duration;

use browser_logging::browser_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::decode::decode_text;
use crate::FetchError;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Performs a single GET and returns the decoded body.
///
/// Implementations must not retry; a failed fetch is reported once and the
/// caller decides whether to issue it again.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            // No idle pool: the connection closes as soon as the body is read.
            .pool_max_idle_per_host(0)
            .build()
            .map_err(FetchError::io)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let client = self.build_client()?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(FetchError::not_found(url.as_str()));
        }
        if !status.is_success() {
            return Err(FetchError::io(format!("HTTP {status}")));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::io(format!(
                    "response too large (max {}, actual {content_len})",
                    self.settings.max_bytes
                )));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::io(format!(
                    "response too large (max {}, actual at least {next_len})",
                    self.settings.max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_text(&bytes, content_type.as_deref()).map_err(FetchError::io)?;
        browser_debug!(
            "Fetched {} bytes from {} as {}",
            bytes.len(),
            url,
            decoded.encoding_label
        );
        Ok(decoded.text)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::io(format!("timed out ({err})"));
    }
    if err.is_redirect() {
        return FetchError::io(format!("redirect limit exceeded ({err})"));
    }
    FetchError::io(err)
}
