use crate::ai::context::ShellEnvironment;
use crate::ai::local::{AuthProbe, LocalTool, Timeouts};
use crate::ai::process::ProcessRunner;
use crate::ai::prompt_template::PromptTemplate;
use crate::ai::response_processor::ResponseProcessor;
use crate::ai::{AiProvider, ProviderStatus};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

const MIN_VERSION: &str = "2.0.0";

/// `gh auth status` prints this for every host with a valid token.
const AUTH_MARKER: &str = "Logged in to";

/// GitHub Models model used by `gh models run`
const MODEL: &str = "openai/gpt-4o-mini";

/// GitHub CLI, generating through `gh models run`
pub struct GhProvider {
    tool: LocalTool,
    env: ShellEnvironment,
}

impl GhProvider {
    pub fn new(env: ShellEnvironment, timeouts: Timeouts, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            tool: LocalTool::new(
                "gh",
                "gh",
                MIN_VERSION,
                AuthProbe::new(&["auth", "status"], AUTH_MARKER),
                timeouts,
                runner,
            ),
            env,
        }
    }
}

#[async_trait]
impl AiProvider for GhProvider {
    fn name(&self) -> &str {
        "gh"
    }

    async fn status(&self) -> ProviderStatus {
        self.tool.status().await
    }

    async fn generate_command(&self, query: &str, context: &str) -> Result<String> {
        let prompt = PromptTemplate::tagged_prompt(&self.env, query, context);
        let args = vec![
            "models".to_string(),
            "run".to_string(),
            MODEL.to_string(),
            prompt,
        ];
        let stdout = self.tool.invoke(&args).await?;

        ResponseProcessor::extract_tagged(self.name(), &stdout)
    }
}
