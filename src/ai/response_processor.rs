use crate::error::{GenError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// 사전 컴파일된 정규표현식 (성능 최적화)
static COMMAND_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<command>(.*?)</command>").unwrap()
});

/// Lowercased openings that mean the model explained instead of answering.
const REFUSAL_PATTERNS: &[&str] = &[
    "i am unable to",
    "i cannot",
    "i can't",
    "i'm sorry",
    "as an ai",
    "i don't have the ability",
];

/// AI provider 응답을 후처리하여 실제 명령어만 추출하는 공통 모듈
pub struct ResponseProcessor;

impl ResponseProcessor {
    /// Strip markdown code fences from a raw response.
    ///
    /// Idempotent: cleaning an already clean command returns it unchanged.
    ///
    /// # Examples
    /// ```
    /// use gen_cli::ai::response_processor::ResponseProcessor;
    ///
    /// assert_eq!(ResponseProcessor::clean("```\nls -la\n```"), "ls -la");
    /// assert_eq!(ResponseProcessor::clean("ls -la"), "ls -la");
    /// ```
    pub fn clean(raw: &str) -> String {
        let cleaned = raw.trim();

        // ```bash\ncommand\n``` → command
        if cleaned.starts_with("```") {
            let kept: Vec<&str> = cleaned
                .lines()
                .filter(|line| !line.trim_start().starts_with("```"))
                .collect();
            return kept.join("\n").trim().to_string();
        }

        cleaned.to_string()
    }

    /// Extract the text between `<command>` and `</command>`.
    ///
    /// Missing tags yield [`GenError::CommandNotExtracted`], which is kept apart
    /// from transport failures so callers can tell "the tool ran but answered
    /// off-format" from "the tool did not run".
    pub fn extract_tagged(provider: &str, raw: &str) -> Result<String> {
        let inner = COMMAND_TAG_REGEX
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| GenError::CommandNotExtracted {
                provider: provider.to_string(),
            })?;

        Self::finish(provider, &Self::clean(inner.as_str()))
    }

    /// Clean an untagged response and validate it.
    pub fn process(provider: &str, raw: &str) -> Result<String> {
        Self::finish(provider, &Self::clean(raw))
    }

    /// Reject empty commands and refusals; `command` is expected to be cleaned.
    pub fn finish(provider: &str, command: &str) -> Result<String> {
        let command = command.trim();

        if command.is_empty() {
            return Err(GenError::generation(
                provider,
                "AI returned an empty command. Please try again.",
            ));
        }

        let lowered = command.to_lowercase();
        if REFUSAL_PATTERNS.iter().any(|p| lowered.starts_with(p)) {
            return Err(GenError::generation(
                provider,
                format!(
                    "AI returned an explanation instead of a command: {}",
                    command
                ),
            ));
        }

        Ok(command.to_string())
    }
}
