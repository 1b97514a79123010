use crate::ai::selector::select_provider;
use crate::ai::GenerationRequest;
use crate::commands::CommandPipeline;
use crate::error::Result;
use tracing::info;

impl CommandPipeline {
    /// Select a provider and generate one command.
    ///
    /// A generation failure after a successful selection is final; no other
    /// provider is tried.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let preference = self.store.get();
        let provider = select_provider(
            self.registry.providers(),
            preference.as_deref(),
            request.provider_override.as_deref(),
        )
        .await?;

        info!(provider = provider.name(), "generating command");
        let context = request.context.as_deref().unwrap_or("");
        provider.generate_command(&request.query, context).await
    }
}
