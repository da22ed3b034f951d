//! External model boundary.
//!
//! The model is an opaque, possibly-failing collaborator: one
//! request/response operation per turn, taking the current profile,
//! conversation history, and relevance/friction context, and returning the
//! next question plus any structured extractions. `anthropic` is the real
//! transport; tests script the boundary directly.

pub mod anthropic;
pub mod boundary;
pub mod prompts;

pub use anthropic::AnthropicBoundary;
pub use boundary::{HistoryEntry, ModelBoundary, ModelTurn, TurnRequest};

use std::sync::Arc;

use secrecy::SecretString;

use crate::error::BoundaryError;

/// Configuration for creating a model boundary.
#[derive(Debug, Clone)]
pub struct BoundaryConfig {
    pub api_key: SecretString,
    pub model: String,
    pub max_tokens: u32,
}

/// Create the production model boundary from configuration.
pub fn create_boundary(config: &BoundaryConfig) -> Result<Arc<dyn ModelBoundary>, BoundaryError> {
    let boundary = AnthropicBoundary::new(config.api_key.clone(), &config.model, config.max_tokens);
    tracing::info!("Using Anthropic (model: {})", config.model);
    Ok(Arc::new(boundary))
}
