pub mod context;
pub mod factory;
pub mod gemini;
pub mod gh;
pub mod http;
pub mod local;
pub mod process;
pub mod prompt_template;
pub mod remote;
pub mod response_processor;
pub mod selector;
pub mod version;

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Live readiness of a provider, produced fresh by every probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ready,
    NotAuthenticated,
    NotInstalled,
    Error(String),
}

impl ProviderStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProviderStatus::Ready)
    }

    /// Stable snake_case label (`ready`, `not_authenticated`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Ready => "ready",
            ProviderStatus::NotAuthenticated => "not_authenticated",
            ProviderStatus::NotInstalled => "not_installed",
            ProviderStatus::Error(_) => "error",
        }
    }

    /// Label plus the error message, if any.
    pub fn describe(&self) -> String {
        match self {
            ProviderStatus::Error(message) if !message.is_empty() => {
                format!("{}: {}", self.as_str(), message)
            }
            _ => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `gen -m` invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub query: String,
    pub context: Option<String>,
    /// One-shot provider choice; beats the stored preference and never falls back.
    pub provider_override: Option<String>,
}

impl GenerationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_override(mut self, provider: Option<String>) -> Self {
        self.provider_override = provider;
        self
    }
}

/// AI provider trait for pluggable command generation backends
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name (e.g., "gh", "gemini", "remote")
    fn name(&self) -> &str;

    /// Probe installation, authentication and reachability.
    ///
    /// Never fails: every problem is folded into [`ProviderStatus`].
    async fn status(&self) -> ProviderStatus;

    /// Generate a shell command from a natural language query
    async fn generate_command(&self, query: &str, context: &str) -> Result<String>;
}
