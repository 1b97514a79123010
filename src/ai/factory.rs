use crate::ai::context::ShellEnvironment;
use crate::ai::gemini::GeminiProvider;
use crate::ai::gh::GhProvider;
use crate::ai::http::HttpClient;
use crate::ai::local::Timeouts;
use crate::ai::process::ProcessRunner;
use crate::ai::remote::{RemoteConfig, RemoteProvider};
use crate::ai::AiProvider;
use crate::error::{GenError, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Everything the built-in providers need at construction.
pub struct ProviderSettings {
    pub env: ShellEnvironment,
    pub timeouts: Timeouts,
    pub remote: RemoteConfig,
    pub runner: Arc<dyn ProcessRunner>,
    pub http: Arc<dyn HttpClient>,
}

/// Ordered set of providers. Order is the auto-detect fallback priority.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn AiProvider>>,
}

impl ProviderRegistry {
    /// Build a registry from providers in priority order.
    ///
    /// # Errors
    /// * Returns `GenError::DuplicateProvider` if two providers share a name
    pub fn new(providers: Vec<Arc<dyn AiProvider>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.name().to_string()) {
                return Err(GenError::DuplicateProvider(provider.name().to_string()));
            }
        }
        Ok(Self { providers })
    }

    /// Built-in providers: gh, then gemini, then the remote endpoint.
    pub fn builtin(settings: ProviderSettings) -> Self {
        let providers: Vec<Arc<dyn AiProvider>> = vec![
            Arc::new(GhProvider::new(
                settings.env.clone(),
                settings.timeouts,
                settings.runner.clone(),
            )),
            Arc::new(GeminiProvider::new(
                settings.env.clone(),
                settings.timeouts,
                settings.runner,
            )),
            Arc::new(RemoteProvider::new(
                settings.remote,
                settings.env,
                settings.http,
            )),
        ];

        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn AiProvider>] {
        &self.providers
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.name() == name)
    }

    /// Registered names in priority order
    pub fn names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }
}
