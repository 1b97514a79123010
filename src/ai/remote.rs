use crate::ai::context::ShellEnvironment;
use crate::ai::http::HttpClient;
use crate::ai::prompt_template::PromptTemplate;
use crate::ai::response_processor::ResponseProcessor;
use crate::ai::{AiProvider, ProviderStatus};
use crate::error::{GenError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_MODEL_NAME: &str = "gpt-4o";

const GENERATE_PATH: &str = "/api/simplepost";

/// Where and how to reach the inference service.
///
/// Built once at the entry point; the provider never reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: String,
    pub model_name: String,
    pub timeout: Duration,
    /// Limit for the reachability check behind `status()`
    pub probe_timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

impl RemoteConfig {
    /// Apply overrides (typically `AI_BASE_URL` / `AI_MODEL_NAME`); blank values are ignored.
    pub fn with_overrides(mut self, base_url: Option<String>, model_name: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(model) = model_name.filter(|m| !m.trim().is_empty()) {
            self.model_name = model.trim().to_string();
        }
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_PATH)
    }
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    query: &'a str,
    model_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

/// HTTP inference endpoint: `POST {base}/api/simplepost`, plain-text reply
pub struct RemoteProvider {
    config: RemoteConfig,
    env: ShellEnvironment,
    client: Arc<dyn HttpClient>,
}

impl RemoteProvider {
    pub fn new(config: RemoteConfig, env: ShellEnvironment, client: Arc<dyn HttpClient>) -> Self {
        Self { config, env, client }
    }
}

#[async_trait]
impl AiProvider for RemoteProvider {
    fn name(&self) -> &str {
        "remote"
    }

    /// URL check, then a `HEAD` against the base URL.
    ///
    /// Any HTTP answer means the service is reachable.
    async fn status(&self) -> ProviderStatus {
        let base_url = &self.config.base_url;
        match Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
            Ok(url) => {
                return ProviderStatus::Error(format!(
                    "invalid base URL '{}': unsupported scheme '{}'",
                    base_url,
                    url.scheme()
                ))
            }
            Err(e) => {
                return ProviderStatus::Error(format!("invalid base URL '{}': {}", base_url, e))
            }
        }

        match self.client.head(base_url, self.config.probe_timeout).await {
            Ok(code) => {
                debug!(%base_url, code, "remote endpoint reachable");
                ProviderStatus::Ready
            }
            Err(e) => {
                debug!(%base_url, error = %e, "remote endpoint unreachable");
                ProviderStatus::Error(format!("unreachable at {}: {:#}", base_url, e))
            }
        }
    }

    async fn generate_command(&self, query: &str, context: &str) -> Result<String> {
        let system = PromptTemplate::system_prompt(&self.env);
        let query = PromptTemplate::user_query(query, context);
        let body = serde_json::to_value(GenerateBody {
            query: &query,
            model_name: &self.config.model_name,
            system: Some(&system),
        })?;

        let endpoint = self.config.endpoint();
        debug!(%endpoint, model = %self.config.model_name, "posting generation request");

        let response = self
            .client
            .post_json(&endpoint, &body, self.config.timeout)
            .await
            .map_err(|e| GenError::generation(self.name(), e.to_string()))?;

        if !response.is_success() {
            return Err(GenError::generation(
                self.name(),
                format!("HTTP {}: {}", response.status, response.body.trim()),
            ));
        }

        ResponseProcessor::process(self.name(), &response.body)
    }
}
