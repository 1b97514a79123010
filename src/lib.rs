//! Natural language to shell command generation.
//!
//! A query is routed to one of several AI backends ("providers"): local CLIs
//! such as `gh` and `gemini`, or a remote HTTP inference endpoint. Providers
//! are probed for readiness and picked by one-shot override, stored
//! preference, or auto-detection in registration order.

pub mod ai;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ui;

pub use ai::{AiProvider, GenerationRequest, ProviderStatus};
pub use commands::CommandPipeline;
pub use error::{GenError, Result};
