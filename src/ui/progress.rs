use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// 스피너 스타일 (AI 명령어 생성 중)
///
/// Draws to stderr and stays hidden when stderr is not a terminal, so stdout
/// carries nothing but the generated command.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Run `f` to completion behind a spinner.
pub async fn with_spinner<F, T>(message: &str, f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let spinner = create_spinner(message);
    let result = f.await;
    spinner.finish_and_clear();
    result
}
