use anyhow::Context;
use clap::error::ErrorKind;
use clap::CommandFactory;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use gen_cli::ai::context::ShellEnvironment;
use gen_cli::ai::factory::{ProviderRegistry, ProviderSettings};
use gen_cli::ai::http::ReqwestHttpClient;
use gen_cli::ai::local::Timeouts;
use gen_cli::ai::process::CommandRunner;
use gen_cli::ai::remote::RemoteConfig;
use gen_cli::cli::{Action, Cli};
use gen_cli::config::PreferenceStore;
use gen_cli::{ui, CommandPipeline, GenerationRequest};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse_normalized(std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    init_tracing(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "❌ Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("gen_cli=debug,gen=debug")
    } else {
        EnvFilter::try_from_env("GEN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Environment is read here and nowhere else.
fn build_pipeline() -> anyhow::Result<CommandPipeline> {
    let store_path: PathBuf = match std::env::var_os("GEN_CONFIG_PATH") {
        Some(path) if !path.is_empty() => path.into(),
        _ => PreferenceStore::default_path().context("locating the preference file")?,
    };

    let remote = RemoteConfig::default().with_overrides(
        std::env::var("AI_BASE_URL").ok(),
        std::env::var("AI_MODEL_NAME").ok(),
    );

    let registry = ProviderRegistry::builtin(ProviderSettings {
        env: ShellEnvironment::detect(),
        timeouts: Timeouts::default(),
        remote,
        runner: Arc::new(CommandRunner::new()),
        http: Arc::new(ReqwestHttpClient::new()),
    });

    tracing::debug!(path = %store_path.display(), providers = ?registry.names(), "pipeline ready");
    Ok(CommandPipeline::new(registry, PreferenceStore::new(store_path)))
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.action() {
        Action::MissingMessage => {
            Cli::command().print_help()?;
            println!();
            return Ok(ExitCode::FAILURE);
        }
        Action::ListProviders => {
            let pipeline = build_pipeline()?;
            let (listings, preference) = pipeline.list().await;
            print!("{}", ui::render_provider_list(&listings, preference.as_deref()));
        }
        Action::SetProvider(name) => {
            let pipeline = build_pipeline()?;
            let stored = pipeline.set_preference(&name)?;
            println!("{}", ui::render_preference_saved(stored.as_deref()));
        }
        Action::Generate {
            message,
            context,
            provider,
        } => {
            let pipeline = build_pipeline()?;
            let request = GenerationRequest::new(message)
                .with_context(context)
                .with_override(provider);
            let command =
                ui::with_spinner("Generating command...", pipeline.generate(&request)).await?;

            // stdout에는 명령어만 출력 (eval/파이프 사용 가능)
            println!("{}", command);
        }
    }

    Ok(ExitCode::SUCCESS)
}
