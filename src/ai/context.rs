use std::env;
use std::path::Path;

/// Shell and OS the generated command should target.
///
/// Detected once in `main` and handed to providers at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellEnvironment {
    pub shell: String,
    pub os: String,
}

impl ShellEnvironment {
    pub fn new(shell: impl Into<String>, os: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            os: os.into(),
        }
    }

    /// 현재 실행 환경에서 셸과 OS 정보를 수집
    pub fn detect() -> Self {
        let shell = env::var("SHELL")
            .ok()
            .as_deref()
            .and_then(|path| Path::new(path).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "bash".to_string());

        Self::new(shell, os_display_name(env::consts::OS))
    }
}

impl Default for ShellEnvironment {
    fn default() -> Self {
        Self::new("bash", os_display_name(env::consts::OS))
    }
}

fn os_display_name(os: &str) -> String {
    match os {
        "macos" => "macOS".to_string(),
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_display_name() {
        assert_eq!(os_display_name("macos"), "macOS");
        assert_eq!(os_display_name("linux"), "Linux");
        assert_eq!(os_display_name("solaris"), "solaris");
    }

    #[test]
    fn test_detect_has_values() {
        let env = ShellEnvironment::detect();
        assert!(!env.shell.is_empty());
        assert!(!env.os.is_empty());
        assert!(!env.shell.contains('/'));
    }
}
