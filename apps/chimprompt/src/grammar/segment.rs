use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grammar::elements::ElementKey;

/// The key of a segment as written.
///
/// Parsing is permissive, so a segment may carry a key outside the vocabulary; it is
/// kept verbatim and rejected only when the prompt is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Keyword {
    Known(ElementKey),
    Unknown(String),
}

impl Keyword {
    pub fn known(&self) -> Option<ElementKey> {
        match self {
            Keyword::Known(key) => Some(*key),
            Keyword::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Known(key) => key.as_str(),
            Keyword::Unknown(name) => name,
        }
    }
}

impl From<&str> for Keyword {
    fn from(name: &str) -> Self {
        match name.parse::<ElementKey>() {
            Ok(key) => Keyword::Known(key),
            Err(_) => Keyword::Unknown(name.to_string()),
        }
    }
}

impl From<String> for Keyword {
    fn from(name: String) -> Self {
        match name.parse::<ElementKey>() {
            Ok(key) => Keyword::Known(key),
            Err(_) => Keyword::Unknown(name),
        }
    }
}

impl From<ElementKey> for Keyword {
    fn from(key: ElementKey) -> Self {
        Keyword::Known(key)
    }
}

impl From<Keyword> for String {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::Known(key) => key.as_str().to_string(),
            Keyword::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `*key* argument` unit of a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "element")]
    pub key: Keyword,
    pub argument: String,
}

impl Segment {
    pub fn new(key: impl Into<Keyword>, argument: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            argument: argument.into(),
        }
    }

    /// An element that was added but whose argument has not been written yet.
    pub fn is_pending(&self) -> bool {
        self.argument.trim().is_empty()
    }
}
