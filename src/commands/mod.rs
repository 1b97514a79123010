pub mod generate;
pub mod provider;

pub use provider::ProviderListing;

use crate::ai::factory::ProviderRegistry;
use crate::config::PreferenceStore;

/// Ties the provider registry to the preference store.
///
/// Every operation stands alone: the preference file is read at most once and
/// written at most once per call.
pub struct CommandPipeline {
    registry: ProviderRegistry,
    store: PreferenceStore,
}

impl CommandPipeline {
    pub fn new(registry: ProviderRegistry, store: PreferenceStore) -> Self {
        Self { registry, store }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &PreferenceStore {
        &self.store
    }
}
