//! Decides which provider serves a request.
//!
//! An explicit choice (one-shot override, then stored preference) is a hard
//! request: unknown or not-ready providers fail immediately and nothing else is
//! tried. Only auto mode falls back, probing providers one at a time in
//! registration order and stopping at the first ready one.

use crate::ai::AiProvider;
use crate::error::{GenError, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub async fn select_provider(
    providers: &[Arc<dyn AiProvider>],
    preference: Option<&str>,
    override_name: Option<&str>,
) -> Result<Arc<dyn AiProvider>> {
    if let Some(name) = override_name {
        debug!(provider = name, "using one-shot provider override");
        return require_ready(providers, name).await;
    }

    if let Some(name) = preference {
        debug!(provider = name, "using stored provider preference");
        return require_ready(providers, name).await;
    }

    for provider in providers {
        let status = provider.status().await;
        debug!(provider = provider.name(), %status, "auto-detect probe");
        if status.is_ready() {
            info!(provider = provider.name(), "auto-detected provider");
            return Ok(provider.clone());
        }
    }

    Err(GenError::NoProviderAvailable {
        providers: providers.iter().map(|p| p.name().to_string()).collect(),
    })
}

async fn require_ready(
    providers: &[Arc<dyn AiProvider>],
    name: &str,
) -> Result<Arc<dyn AiProvider>> {
    let provider = providers
        .iter()
        .find(|p| p.name() == name)
        .ok_or_else(|| GenError::ProviderNotFound {
            name: name.to_string(),
            available: providers.iter().map(|p| p.name().to_string()).collect(),
        })?;

    let status = provider.status().await;
    if !status.is_ready() {
        return Err(GenError::ProviderUnavailable {
            name: name.to_string(),
            status,
        });
    }

    Ok(provider.clone())
}
