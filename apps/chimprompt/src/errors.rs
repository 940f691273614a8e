use serde_json::{json, Value};
use thiserror::Error;

use crate::conversion::ConversionError;
use crate::grammar::GrammarError;

/// Application-level error type returned by every CLI command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Grammar(GrammarError::UnknownElement(_)) => "UNKNOWN_ELEMENT",
            AppError::Grammar(GrammarError::MalformedSegment(_)) => "MALFORMED_SEGMENT",
            AppError::Grammar(GrammarError::PendingArgument(_)) => "PENDING_ARGUMENT",
            AppError::Grammar(GrammarError::SeparatorInArgument(_)) => "SEPARATOR_IN_ARGUMENT",
            AppError::Grammar(GrammarError::UnknownJumpMode(_)) => "UNKNOWN_JUMP_MODE",
            AppError::Conversion(ConversionError::EmptyText) => "VALIDATION_ERROR",
            AppError::Conversion(ConversionError::Llm(e)) if e.is_rate_limit() => "RATE_LIMITED",
            AppError::Conversion(ConversionError::Llm(_)) => "LLM_ERROR",
            AppError::Conversion(ConversionError::Grammar(_)) => "EXTRACTION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Process exit status: 2 for bad input, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Validation(_)
            | AppError::Grammar(_)
            | AppError::Conversion(ConversionError::EmptyText) => 2,
            AppError::Conversion(_) | AppError::Internal(_) => 1,
        }
    }

    /// Renders the error for stderr, as plain text or as a JSON envelope.
    pub fn render(&self, as_json: bool) -> String {
        match self {
            AppError::Conversion(ConversionError::Llm(e)) => tracing::error!("LLM error: {e}"),
            AppError::Conversion(ConversionError::Grammar(e)) => {
                tracing::error!("Heuristic extraction error: {e}")
            }
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }

        if as_json {
            error_body(self.code(), &self.to_string()).to_string()
        } else {
            format!("error: {self}")
        }
    }
}

fn error_body(code: &str, message: &str) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}
