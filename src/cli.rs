use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(name = "gen")]
#[command(version)]
#[command(about = "Generate shell commands from natural language using AI", long_about = None)]
#[command(disable_help_subcommand = true)]
#[command(after_help = "Examples:\n  \
    gen -m \"List all directories in current folder\"\n  \
    gen -m \"Find files larger than 100MB\" -p gemini\n  \
    gen provider -list\n  \
    gen provider -set gh\n\n\
    Environment:\n  \
    AI_BASE_URL      Base URL of the remote provider\n  \
    AI_MODEL_NAME    Model name sent to the remote provider (default: gpt-4o)\n  \
    GEN_CONFIG_PATH  Preference file (default: ~/.tinykit/gen-config)\n  \
    GEN_LOG          Log filter, e.g. `debug`")]
pub struct Cli {
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// 디버그 로그 출력
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Natural language description of the command
    #[arg(short = 'm', long, value_name = "TEXT", allow_hyphen_values = true)]
    pub message: Option<String>,

    /// Extra context for the request
    #[arg(short = 'c', long, value_name = "TEXT", allow_hyphen_values = true)]
    pub context: Option<String>,

    /// Use this provider for this command only (no fallback)
    #[arg(short = 'p', long, value_name = "NAME")]
    pub provider: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a command (same as the top-level -m form)
    Generate(GenerateArgs),

    /// List providers or set the preferred one
    Provider(ProviderArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ProviderArgs {
    /// List all providers and their status
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Set the preferred provider (a provider name, or `auto`)
    #[arg(short = 's', long, value_name = "NAME")]
    pub set: Option<String>,
}

/// What a parsed command line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Generate {
        message: String,
        context: Option<String>,
        provider: Option<String>,
    },
    ListProviders,
    SetProvider(String),
    /// No message given: print help and fail
    MissingMessage,
}

impl Cli {
    /// Parse after rewriting single-dash long options (`-list` → `--list`).
    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    pub fn action(&self) -> Action {
        match &self.command {
            Some(Commands::Provider(args)) => match &args.set {
                Some(name) => Action::SetProvider(name.clone()),
                None => Action::ListProviders,
            },
            Some(Commands::Generate(args)) => Self::generate_action(args),
            None => Self::generate_action(&self.generate),
        }
    }

    fn generate_action(args: &GenerateArgs) -> Action {
        match args.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => Action::Generate {
                message: message.to_string(),
                context: args.context.clone(),
                provider: args.provider.clone(),
            },
            _ => Action::MissingMessage,
        }
    }
}

const SINGLE_DASH_LONGS: &[&str] = &["list", "set", "message", "context", "provider", "help", "debug"];

/// Options whose next token is a value, never a flag.
const VALUE_OPTIONS: &[&str] = &[
    "-m", "--message", "-c", "--context", "-p", "--provider", "-s", "--set",
];

fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut value_next = false;

    for arg in args.into_iter().map(Into::into) {
        if value_next {
            value_next = false;
            normalized.push(arg);
            continue;
        }

        let rewritten = arg
            .to_str()
            .and_then(|s| s.strip_prefix('-'))
            .filter(|s| SINGLE_DASH_LONGS.contains(s))
            .map(|name| OsString::from(format!("--{}", name)));
        let arg = rewritten.unwrap_or(arg);

        value_next = arg.to_str().is_some_and(|s| VALUE_OPTIONS.contains(&s));
        normalized.push(arg);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(std::iter::once("gen").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_flags() {
        let cli = parse(&["-m", "list files", "-c", "in ~/src", "-p", "gemini"]);
        assert_eq!(
            cli.action(),
            Action::Generate {
                message: "list files".to_string(),
                context: Some("in ~/src".to_string()),
                provider: Some("gemini".to_string()),
            }
        );
    }

    #[test]
    fn test_generate_subcommand() {
        let cli = parse(&["generate", "--message", "show disk usage"]);
        assert!(matches!(cli.action(), Action::Generate { ref message, .. } if message == "show disk usage"));
    }

    #[test]
    fn test_missing_message() {
        assert_eq!(parse(&[]).action(), Action::MissingMessage);
        assert_eq!(parse(&["-m", "  "]).action(), Action::MissingMessage);
        assert_eq!(parse(&["-p", "gh"]).action(), Action::MissingMessage);
    }

    #[test]
    fn test_single_dash_provider_forms() {
        assert_eq!(parse(&["provider", "-list"]).action(), Action::ListProviders);
        assert_eq!(parse(&["provider", "--list"]).action(), Action::ListProviders);
        assert_eq!(
            parse(&["provider", "-set", "auto"]).action(),
            Action::SetProvider("auto".to_string())
        );
    }

    #[test]
    fn test_provider_requires_list_or_set() {
        let result = Cli::try_parse_normalized(["gen", "provider"]);
        assert!(result.is_err());

        let result = Cli::try_parse_normalized(["gen", "provider", "-list", "-set", "gh"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_normalize_leaves_values_alone() {
        let args = normalize_args(["gen", "-m", "-list", "-x"]);
        assert_eq!(args, vec!["gen", "-m", "-list", "-x"]);

        let args = normalize_args(["gen", "-message", "-set", "-provider", "gh"]);
        assert_eq!(args, vec!["gen", "--message", "-set", "--provider", "gh"]);

        let args = normalize_args(["gen", "provider", "-set", "-list"]);
        assert_eq!(args, vec!["gen", "provider", "--set", "-list"]);

        let args = normalize_args(["gen", "-m", "remove -set files"]);
        assert_eq!(args[2], "remove -set files");
    }

    #[test]
    fn test_message_that_looks_like_a_flag() {
        assert_eq!(
            parse(&["-m", "-list", "-c", "-debug"]).action(),
            Action::Generate {
                message: "-list".to_string(),
                context: Some("-debug".to_string()),
                provider: None,
            }
        );
        assert!(!parse(&["-m", "-debug"]).debug);
    }
}
