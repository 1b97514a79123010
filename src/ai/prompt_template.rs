use crate::ai::context::ShellEnvironment;

/// AI provider용 프롬프트 템플릿 생성기
///
/// 모든 provider가 일관된 프롬프트 형식을 사용하도록 중앙 집중화된 템플릿 관리를 제공합니다.
pub struct PromptTemplate;

impl PromptTemplate {
    /// 명령어 생성을 위한 시스템 프롬프트
    ///
    /// # Arguments
    /// * `env` - 대상 셸과 OS
    /// * `output_rule` - 출력 형식 규칙 (태그 사용 여부)
    pub fn build_system_prompt(env: &ShellEnvironment, output_rule: &str) -> String {
        format!(
            "You are an expert command generator for {shell} on {os}.\n\n\
             Generate a precise command that accomplishes the user's request. Follow these guidelines:\n\
             1. Use {shell}-specific syntax when relevant\n\
             2. Optimize for {os} compatibility\n\
             3. Prefer commonly available tools and commands\n\
             4. Include necessary error handling where appropriate\n\
             5. Make commands readable and maintainable\n\n\
             IMPORTANT: {rule}",
            shell = env.shell,
            os = env.os,
            rule = output_rule,
        )
    }

    /// 원격 endpoint용: 순수 명령어만 반환하도록 요청
    ///
    /// # Examples
    /// ```
    /// use gen_cli::ai::context::ShellEnvironment;
    /// use gen_cli::ai::prompt_template::PromptTemplate;
    ///
    /// let env = ShellEnvironment::new("zsh", "macOS");
    /// let system = PromptTemplate::system_prompt(&env);
    /// assert!(system.contains("zsh on macOS"));
    /// assert!(system.contains("Just the raw command."));
    /// ```
    pub fn system_prompt(env: &ShellEnvironment) -> String {
        Self::build_system_prompt(
            env,
            "Return ONLY the command, no explanations or formatting. Just the raw command.",
        )
    }

    /// 원격 endpoint로 보내는 사용자 쿼리
    pub fn user_query(query: &str, context: &str) -> String {
        if context.trim().is_empty() {
            format!("Generate a command for: {}", query)
        } else {
            format!("Context: {}\nGenerate a command for: {}", context, query)
        }
    }

    /// 로컬 CLI용: 시스템 프롬프트와 쿼리를 하나로 합치고 `<command>` 태그를 요구
    pub fn tagged_prompt(env: &ShellEnvironment, query: &str, context: &str) -> String {
        let system = Self::build_system_prompt(
            env,
            "Return the command wrapped in <command></command> tags with no explanations.",
        );

        if context.trim().is_empty() {
            format!("{}\n\nUser query: {}", system, query)
        } else {
            format!("{}\n\nContext: {}\nUser query: {}", system, context, query)
        }
    }
}
