use crate::ai::context::ShellEnvironment;
use crate::ai::local::{AuthProbe, LocalTool, Timeouts};
use crate::ai::process::ProcessRunner;
use crate::ai::prompt_template::PromptTemplate;
use crate::ai::response_processor::ResponseProcessor;
use crate::ai::{AiProvider, ProviderStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

const MIN_VERSION: &str = "1.0.0";

/// Printed by the Gemini CLI when it reuses a stored login.
const AUTH_MARKER: &str = "Loaded cached credentials.";

/// Google Gemini CLI (`gemini -p <prompt>`)
pub struct GeminiProvider {
    tool: LocalTool,
    env: ShellEnvironment,
}

impl GeminiProvider {
    pub fn new(env: ShellEnvironment, timeouts: Timeouts, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            tool: LocalTool::new(
                "gemini",
                "gemini",
                MIN_VERSION,
                AuthProbe::new(&["-p", "hi"], AUTH_MARKER),
                timeouts,
                runner,
            ),
            env,
        }
    }
}

#[async_trait]
impl AiProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn status(&self) -> ProviderStatus {
        self.tool.status().await
    }

    async fn generate_command(&self, query: &str, context: &str) -> Result<String> {
        let prompt = PromptTemplate::tagged_prompt(&self.env, query, context);
        let stdout = self.tool.invoke(&["-p".to_string(), prompt]).await?;

        ResponseProcessor::extract_tagged(self.name(), &stdout)
    }
}
