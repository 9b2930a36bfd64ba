//! Analysis passthrough: forward text to a hosted model, return its reply.
//!
//! The reply is treated as opaque text. There is no retry, no timeout and no
//! validation of its shape; any provider error is handed back to the caller
//! as an [`AnalysisError`].
//!
//! [`Analyst`] is the seam the HTTP layer depends on, so tests can swap the
//! hosted model for a stub.

use crate::config::ServiceConfig;
use crate::error::AnalysisError;
use crate::prompts::analysis_prompt;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, LLMProvider, ProviderFactory};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Produces stylistic feedback for a piece of text.
#[async_trait]
pub trait Analyst: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<String, AnalysisError>;
}

/// Model used with a named provider when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";

/// [`Analyst`] backed by an `edgequake-llm` provider.
///
/// The provider is resolved on every call, so a missing API key only breaks
/// `/analyze` and the service can still start and extract text.
#[derive(Clone, Default)]
pub struct LlmAnalyst {
    provider: Option<Arc<dyn LLMProvider>>,
    provider_name: Option<String>,
    model: Option<String>,
}

impl LlmAnalyst {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            provider_name: config.provider_name.clone(),
            model: config.model.clone(),
        }
    }

    /// Resolve the provider, from most-specific to least-specific:
    ///
    /// 1. Pre-built provider from the config
    /// 2. Named provider (+ optional model); the factory reads that
    ///    provider's API key from the environment
    /// 3. `EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`
    /// 4. `ProviderFactory::from_env()` auto-detection from API key variables
    fn resolve_provider(&self) -> Result<Arc<dyn LLMProvider>, AnalysisError> {
        if let Some(ref provider) = self.provider {
            return Ok(Arc::clone(provider));
        }

        if let Some(ref name) = self.provider_name {
            let model = self.model.as_deref().unwrap_or(DEFAULT_MODEL);
            return create_provider(name, model);
        }

        if let (Ok(prov), Ok(model)) = (
            std::env::var("EDGEQUAKE_LLM_PROVIDER"),
            std::env::var("EDGEQUAKE_MODEL"),
        ) {
            if !prov.is_empty() && !model.is_empty() {
                return create_provider(&prov, &model);
            }
        }

        let (llm_provider, _embedding) =
            ProviderFactory::from_env().map_err(|e| AnalysisError::ProviderNotConfigured {
                provider: "auto".to_string(),
                hint: format!(
                    "No LLM provider could be auto-detected from environment.\n\
                    Set OPENAI_API_KEY, GEMINI_API_KEY, ANTHROPIC_API_KEY, or configure a provider.\n\
                    Error: {}",
                    e
                ),
            })?;

        Ok(llm_provider)
    }
}

fn create_provider(name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, AnalysisError> {
    ProviderFactory::create_llm_provider(name, model).map_err(|e| {
        AnalysisError::ProviderNotConfigured {
            provider: name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// The single user turn sent to the model.
fn build_messages(text: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(analysis_prompt(text))]
}

#[async_trait]
impl Analyst for LlmAnalyst {
    async fn analyze(&self, text: &str) -> Result<String, AnalysisError> {
        let provider = self.resolve_provider()?;
        let messages = build_messages(text);
        let start = Instant::now();

        let response = provider
            .chat(&messages, None)
            .await
            .map_err(|e| AnalysisError::Api {
                message: e.to_string(),
            })?;

        info!(
            "Analysis complete: {} chars in, {} chars out, {:?}",
            text.len(),
            response.content.len(),
            start.elapsed()
        );
        debug!(
            "Analysis tokens: {} prompt, {} completion",
            response.prompt_tokens, response.completion_tokens
        );

        Ok(response.content)
    }
}
