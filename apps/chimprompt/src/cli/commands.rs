use std::io::Read;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::conversion::{ConversionError, FallbackConverter, LlmConverter};
use crate::errors::AppError;
use crate::grammar::elements::elements_in_category;
use crate::grammar::{
    parse, parse_strict, serialize, ElementDefinition, ElementKey, Prompt, Segment, Toggle,
    ELEMENTS,
};
use crate::llm_client::{self, LlmClient};

// ============================================================================
// elements / describe
// ============================================================================

pub fn cmd_elements(category: Option<&str>) -> Result<String, AppError> {
    let definitions: Vec<&ElementDefinition> = match category {
        Some(category) => {
            let found = elements_in_category(category);
            if found.is_empty() {
                return Err(AppError::Validation(format!(
                    "no elements in category '{category}'"
                )));
            }
            found
        }
        None => ELEMENTS.iter().collect(),
    };

    let lines: Vec<String> = definitions
        .iter()
        .map(|d| {
            format!(
                "[{}] {:<12} {:<14} {}",
                d.shortcut.to_ascii_uppercase(),
                d.key.as_str(),
                d.category,
                d.description
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn cmd_describe(key: &str) -> Result<String, AppError> {
    let definition = key.trim().parse::<ElementKey>()?.definition();
    let priority = definition
        .key
        .priority()
        .map(|p| (p + 1).to_string())
        .unwrap_or_else(|| "none".to_string());

    let mut out = format!(
        "*{}* ({})\n{}\n\nCategory: {}\nShortcut: Tab+{}\nPriority: {}\n\nExample:\n",
        definition.key,
        definition.canonical_name,
        definition.description,
        definition.category,
        definition.shortcut.to_ascii_uppercase(),
        priority
    );
    for line in definition.example.lines() {
        out.push_str(&format!("  {line}\n"));
    }
    out.push_str("\nSuggestions:\n");
    for suggestion in definition.suggestions {
        out.push_str(&format!("  - {suggestion}\n"));
    }
    Ok(out.trim_end().to_string())
}

// ============================================================================
// build / parse
// ============================================================================

pub fn cmd_build(pairs: &[String]) -> Result<String, AppError> {
    let segments = pairs
        .iter()
        .map(|pair| parse_pair(pair))
        .collect::<Result<Vec<Segment>, AppError>>()?;
    Ok(serialize(&segments)?)
}

fn parse_pair(pair: &str) -> Result<Segment, AppError> {
    let (key, argument) = pair.split_once('=').ok_or_else(|| {
        AppError::Validation(format!("expected key=argument, got '{pair}'"))
    })?;
    let key = key.trim().parse::<ElementKey>()?;
    Ok(Segment::new(key, argument))
}

pub fn cmd_parse(text: &str, strict: bool) -> Result<String, AppError> {
    let text = read_text(text)?;
    let segments = if strict {
        parse_strict(&text)?
    } else {
        parse(&text)?
    };
    debug!("Parsed {} segments", segments.len());
    to_json(&segments)
}

// ============================================================================
// toggle / jump
// ============================================================================

pub fn cmd_toggle(text: &str, key: &str, argument: Option<&str>) -> Result<String, AppError> {
    let text = read_text(text)?;
    let mut prompt = Prompt::parse(&text)?;
    let key = key.trim().parse::<ElementKey>()?;

    match prompt.toggle_element(key, argument.unwrap_or_default())? {
        Toggle::Added => info!("Added *{key}*"),
        Toggle::Removed => info!("Removed *{key}*"),
    }
    Ok(prompt.serialize()?)
}

pub fn cmd_jump(text: &str, mode: &str) -> Result<String, AppError> {
    let text = read_text(text)?;
    let mut prompt = Prompt::parse(&text)?;
    let mode = prompt.apply_jump(mode)?;
    info!("Jumped {mode}: {} segments", prompt.len());
    Ok(prompt.serialize()?)
}

// ============================================================================
// convert
// ============================================================================

pub async fn cmd_convert(text: &str, offline: bool, config: &Config) -> Result<String, AppError> {
    let text = read_text(text)?;
    let converter = build_converter(config, offline)?;
    let conversion = converter.convert(&text).await?;
    to_json(&conversion)
}

/// LLM-backed when a key is configured and `offline` is not set.
pub fn build_converter(config: &Config, offline: bool) -> Result<FallbackConverter, AppError> {
    let api_key = match (&config.openai_api_key, offline) {
        (Some(key), false) => key.clone(),
        _ => {
            debug!("No AI backend in use, converting offline");
            return Ok(FallbackConverter::offline());
        }
    };

    let llm = LlmClient::new(api_key, &config.openai_base_url, config.llm_timeout)
        .map_err(ConversionError::from)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    Ok(FallbackConverter::new(Some(Arc::new(LlmConverter::new(llm)))))
}

// ============================================================================
// Helpers
// ============================================================================

/// `-` means stdin.
fn read_text(arg: &str) -> Result<String, AppError> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("reading stdin")))?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.into()))
}
