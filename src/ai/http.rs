//! HTTP client abstraction for the remote inference endpoint.
//!
//! Kept behind a trait so the remote provider can be exercised with a canned
//! client instead of a live server.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Status code and raw body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON and return whatever came back, success or not.
    ///
    /// # Errors
    ///
    /// Only transport problems (connect, timeout, unreadable body) are errors;
    /// a non-2xx status is a normal [`HttpResponse`].
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse>;

    /// Send a `HEAD` request and return the status code.
    ///
    /// Any status counts as an answer; only transport failures are errors.
    async fn head(&self, url: &str, timeout: Duration) -> Result<u16>;
}

/// [`HttpClient`] implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }

    async fn head(&self, url: &str, timeout: Duration) -> Result<u16> {
        let response = self.client.head(url).timeout(timeout).send().await?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// Returns a fixed response (or error) and records each request.
    pub struct CannedHttpClient {
        response: std::result::Result<HttpResponse, String>,
        pub requests: Mutex<Vec<(String, serde_json::Value)>>,
        pub heads: Mutex<Vec<String>>,
    }

    impl CannedHttpClient {
        pub fn respond(status: u16, body: &str) -> Self {
            Self {
                response: Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                requests: Mutex::new(Vec::new()),
                heads: Mutex::new(Vec::new()),
            }
        }

        pub fn fail(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
                heads: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for CannedHttpClient {
        async fn post_json(
            &self,
            url: &str,
            body: &serde_json::Value,
            _timeout: Duration,
        ) -> Result<HttpResponse> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), body.clone()));
            self.response.clone().map_err(anyhow::Error::msg)
        }

        async fn head(&self, url: &str, _timeout: Duration) -> Result<u16> {
            self.heads.lock().unwrap().push(url.to_string());
            self.response
                .as_ref()
                .map(|r| r.status)
                .map_err(|e| anyhow::Error::msg(e.clone()))
        }
    }
}
