//! Heuristic, offline conversion of free text into a ChimPrompt.
//!
//! This is a best-effort fallback. The AI conversion path produces the same
//! [`ExtractionResult`] shape from a language-model call instead.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::grammar::elements::ElementKey;
use crate::grammar::error::GrammarError;
use crate::grammar::prompt::serialize;
use crate::grammar::segment::Segment;

static PLATFORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(javascript|react|swift|flutter|python)\b").expect("platform pattern")
});

static ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:create|make|build|add)\s+(?:an?\s+)?([^.,|\s]+(?:\s+[^.,|\s]+)*)")
        .expect("element pattern")
});

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:like|similar\s+to|from)\s+([^.,|\s]+)").expect("reference pattern")
});

static BACKGROUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:background|bg|color):\s*([a-f0-9]{6}|[a-f0-9]{3})\b")
        .expect("background pattern")
});

/// Words that open another field, so an element phrase stops before them.
const PHRASE_STOPS: &[&str] = &["like", "similar", "from", "with", "without"];

/// Field values detected in free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedInfo {
    pub platform: Option<String>,
    pub device: Option<String>,
    pub element: Option<String>,
    pub reference: Option<String>,
    pub background: Option<String>,
}

/// A required field that could not be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingField {
    Platform,
    Device,
    Element,
}

impl FromStr for MissingField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "platform" => Ok(MissingField::Platform),
            "device" => Ok(MissingField::Device),
            "element" => Ok(MissingField::Element),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionResult {
    #[serde(rename = "detectedInfo", deserialize_with = "null_as_default")]
    pub detected: DetectedInfo,
    #[serde(deserialize_with = "known_missing_fields")]
    pub missing_fields: Vec<MissingField>,
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drops entries outside {platform, device, element} instead of failing the whole
/// payload; model output is only shape-checked.
fn known_missing_fields<'de, D>(deserializer: D) -> Result<Vec<MissingField>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw.iter().filter_map(|s| s.parse().ok()).collect())
}

/// Detects platform, device, element, reference and background in `text` and builds
/// a prompt from whatever was found.
pub fn extract_from_natural_language(text: &str) -> Result<ExtractionResult, GrammarError> {
    let platform = PLATFORM
        .captures(text)
        .map(|c| c[1].to_lowercase());
    let device = platform.as_deref().and_then(device_for_platform).map(str::to_string);
    let element = ELEMENT
        .captures(text)
        .and_then(|c| element_phrase(&c[1]));
    let reference = REFERENCE.captures(text).map(|c| c[1].to_string());
    let background = BACKGROUND.captures(text).map(|c| c[1].to_string());

    let detected = DetectedInfo {
        platform,
        device,
        element,
        reference,
        background,
    };

    let mut missing_fields = Vec::new();
    if detected.platform.is_none() {
        missing_fields.push(MissingField::Platform);
    }
    if detected.device.is_none() {
        missing_fields.push(MissingField::Device);
    }
    if detected.element.is_none() {
        missing_fields.push(MissingField::Element);
    }

    let prompt = build_prompt(&detected)?;
    debug!(?missing_fields, %prompt, "Heuristic extraction finished");

    Ok(ExtractionResult {
        detected,
        missing_fields,
        prompt,
    })
}

fn device_for_platform(platform: &str) -> Option<&'static str> {
    match platform {
        "swift" => Some("iphone"),
        "javascript" | "react" => Some("web"),
        _ => None,
    }
}

fn element_phrase(captured: &str) -> Option<String> {
    let words: Vec<&str> = captured
        .split_whitespace()
        .take_while(|w| !PHRASE_STOPS.iter().any(|stop| w.eq_ignore_ascii_case(stop)))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn build_prompt(detected: &DetectedInfo) -> Result<String, GrammarError> {
    let fields = [
        (ElementKey::In, &detected.platform),
        (ElementKey::For, &detected.device),
        (ElementKey::Create, &detected.element),
        (ElementKey::From, &detected.reference),
        (ElementKey::Background, &detected.background),
    ];
    let segments: Vec<Segment> = fields
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| Segment::new(key, v.as_str())))
        .collect();
    serialize(&segments)
}
