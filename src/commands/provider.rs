use crate::ai::ProviderStatus;
use crate::commands::CommandPipeline;
use crate::error::{GenError, Result};
use tracing::info;

/// Keyword that clears the stored preference.
pub const AUTO: &str = "auto";

/// One row of `gen provider -list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderListing {
    pub name: String,
    pub status: ProviderStatus,
    /// Whether this provider is the stored preference
    pub current: bool,
}

impl CommandPipeline {
    /// Probe every provider, in registration order, one after another.
    pub async fn list(&self) -> (Vec<ProviderListing>, Option<String>) {
        let preference = self.store.get();
        let mut listings = Vec::with_capacity(self.registry.providers().len());

        for provider in self.registry.providers() {
            let status = provider.status().await;
            listings.push(ProviderListing {
                name: provider.name().to_string(),
                status,
                current: preference.as_deref() == Some(provider.name()),
            });
        }

        (listings, preference)
    }

    /// Store `name` as the preference; `auto` clears it.
    ///
    /// Returns the stored value (`None` for auto).
    pub fn set_preference(&self, name: &str) -> Result<Option<String>> {
        if name == AUTO {
            self.store.set(None)?;
            info!("provider set to auto-detect");
            return Ok(None);
        }

        if !self.registry.contains(name) {
            return Err(GenError::InvalidProvider {
                name: name.to_string(),
                available: self.registry.names(),
            });
        }

        self.store.set(Some(name.to_string()))?;
        info!(provider = name, "provider preference saved");
        Ok(Some(name.to_string()))
    }
}
