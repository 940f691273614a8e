//! Natural language → ChimPrompt conversion.
//!
//! Two backends produce the same [`ExtractionResult`]:
//! - `HeuristicConverter`: regex extraction, offline, deterministic.
//! - `LlmConverter`: asks the chat-completion service and shape-checks its JSON.
//!
//! `FallbackConverter` prefers the LLM when one is configured and answers with the
//! heuristic whenever the LLM call fails.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::grammar::{extract_from_natural_language, ExtractionResult, GrammarError};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

pub mod prompts;

use prompts::CONVERT_SYSTEM;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Text is required")]
    EmptyText,

    #[error("AI conversion failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Could not build a prompt from the detected fields: {0}")]
    Grammar(#[from] GrammarError),
}

/// Which backend produced a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionBackend {
    Heuristic,
    Llm,
}

/// A conversion result tagged with the backend that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    pub backend: ConversionBackend,
    #[serde(flatten)]
    pub result: ExtractionResult,
}

/// Implement this to add a conversion backend without touching callers.
#[async_trait]
pub trait Converter: Send + Sync {
    fn backend(&self) -> ConversionBackend;

    async fn convert(&self, text: &str) -> Result<ExtractionResult, ConversionError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicConverter
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicConverter;

#[async_trait]
impl Converter for HeuristicConverter {
    fn backend(&self) -> ConversionBackend {
        ConversionBackend::Heuristic
    }

    async fn convert(&self, text: &str) -> Result<ExtractionResult, ConversionError> {
        if text.trim().is_empty() {
            return Err(ConversionError::EmptyText);
        }
        Ok(extract_from_natural_language(text)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmConverter
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmConverter {
    llm: LlmClient,
    system: String,
}

impl LlmConverter {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: format!("{CONVERT_SYSTEM}\n\n{JSON_ONLY_INSTRUCTION}"),
        }
    }
}

#[async_trait]
impl Converter for LlmConverter {
    fn backend(&self) -> ConversionBackend {
        ConversionBackend::Llm
    }

    async fn convert(&self, text: &str) -> Result<ExtractionResult, ConversionError> {
        if text.trim().is_empty() {
            return Err(ConversionError::EmptyText);
        }
        Ok(self.llm.call_json::<ExtractionResult>(text, &self.system).await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackConverter
// ────────────────────────────────────────────────────────────────────────────

pub struct FallbackConverter {
    primary: Option<Arc<dyn Converter>>,
    fallback: HeuristicConverter,
}

impl FallbackConverter {
    pub fn new(primary: Option<Arc<dyn Converter>>) -> Self {
        Self {
            primary,
            fallback: HeuristicConverter,
        }
    }

    /// Heuristic only.
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn convert(&self, text: &str) -> Result<Conversion, ConversionError> {
        if text.trim().is_empty() {
            return Err(ConversionError::EmptyText);
        }

        if let Some(primary) = &self.primary {
            match primary.convert(text).await {
                Ok(result) => {
                    info!(backend = ?primary.backend(), "Converted natural language prompt");
                    return Ok(Conversion {
                        backend: primary.backend(),
                        result,
                    });
                }
                Err(ConversionError::Llm(e)) if e.is_rate_limit() => {
                    warn!("AI conversion rate limited, using heuristic extraction: {e}");
                }
                Err(e) => {
                    warn!("AI conversion failed, using heuristic extraction: {e}");
                }
            }
        }

        let result = self.fallback.convert(text).await?;
        Ok(Conversion {
            backend: self.fallback.backend(),
            result,
        })
    }
}
