use crate::ai::ProviderStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Provider '{name}' not found. Available: {}", .available.join(", "))]
    ProviderNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Provider '{name}' is {}", .status.describe())]
    ProviderUnavailable {
        name: String,
        status: ProviderStatus,
    },

    #[error(
        "No available providers found. Please install and authenticate any of the following:\n- {}",
        .providers.join("\n- ")
    )]
    NoProviderAvailable { providers: Vec<String> },

    #[error("{provider} failed: {message}")]
    GenerationFailed { provider: String, message: String },

    #[error("Could not extract command from {provider} response")]
    CommandNotExtracted { provider: String },

    #[error("Invalid provider '{name}'. Available: {}, auto", .available.join(", "))]
    InvalidProvider {
        name: String,
        available: Vec<String>,
    },

    #[error("Provider '{0}' is registered more than once")]
    DuplicateProvider(String),

    #[error("Could not save config: {0}")]
    ConfigPersistFailed(String),

    // 설정 파일 손상은 경고만 남기고 기본값으로 복구됨
    #[error("Config file is corrupt: {0}")]
    ConfigLoadCorrupt(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GenError {
    /// Shorthand for a backend failure attributed to `provider`.
    pub fn generation(provider: &str, message: impl Into<String>) -> Self {
        GenError::GenerationFailed {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;
