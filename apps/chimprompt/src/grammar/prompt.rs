//! Canonical prompt text: `*key1* arg1 | *key2* arg2 | ...`
//!
//! There is no escaping. An argument may span several lines, but it can never hold the
//! `" | "` separator, which is why [`serialize`] refuses such arguments instead of
//! producing text that parses back differently.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::grammar::elements::ElementKey;
use crate::grammar::error::GrammarError;
use crate::grammar::segment::{Keyword, Segment};

pub const SEPARATOR: &str = " | ";

/// Argument of the `*jump*` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpMode {
    Ascending,
    Descending,
    Reset,
}

impl FromStr for JumpMode {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascending" => Ok(JumpMode::Ascending),
            "descending" => Ok(JumpMode::Descending),
            "reset" => Ok(JumpMode::Reset),
            _ => Err(GrammarError::UnknownJumpMode(s.trim().to_string())),
        }
    }
}

impl fmt::Display for JumpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JumpMode::Ascending => "ascending",
            JumpMode::Descending => "descending",
            JumpMode::Reset => "reset",
        })
    }
}

/// What [`Prompt::toggle_element`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Renders segments in canonical form.
pub fn serialize(segments: &[Segment]) -> Result<String, GrammarError> {
    let mut parts = Vec::with_capacity(segments.len());
    for segment in segments {
        let key = segment
            .key
            .known()
            .ok_or_else(|| GrammarError::UnknownElement(segment.key.to_string()))?;
        let argument = segment.argument.trim();
        // The argument sits between "*key* " and either " | " or the end of the text,
        // so padding it with spaces also catches a '|' on either edge.
        if format!(" {argument} ").contains(SEPARATOR) {
            return Err(GrammarError::SeparatorInArgument(key.to_string()));
        }
        parts.push(format!("*{key}* {argument}"));
    }
    Ok(parts.join(SEPARATOR))
}

/// Parses canonical text, passing unknown keys through as [`Keyword::Unknown`].
pub fn parse(text: &str) -> Result<Vec<Segment>, GrammarError> {
    parse_chunks(text, false)
}

/// Like [`parse`], but a key outside the vocabulary is a malformed segment.
pub fn parse_strict(text: &str) -> Result<Vec<Segment>, GrammarError> {
    parse_chunks(text, true)
}

fn parse_chunks(text: &str, strict: bool) -> Result<Vec<Segment>, GrammarError> {
    text.split(SEPARATOR)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| parse_segment(chunk, strict))
        .collect()
}

fn parse_segment(chunk: &str, strict: bool) -> Result<Segment, GrammarError> {
    let malformed = || GrammarError::MalformedSegment(chunk.trim().to_string());

    let rest = chunk.trim_start().strip_prefix('*').ok_or_else(malformed)?;
    let (name, argument) = rest.split_once('*').ok_or_else(malformed)?;
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    let key = Keyword::from(name);
    if let Keyword::Unknown(ref unknown) = key {
        if strict {
            return Err(malformed());
        }
        debug!("Passing through unknown element '{unknown}'");
    }

    Ok(Segment {
        key,
        argument: argument.trim().to_string(),
    })
}

/// An ordered sequence of segments being authored or loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt {
    segments: Vec<Segment>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        parse(text).map(Self::from)
    }

    pub fn parse_strict(text: &str) -> Result<Self, GrammarError> {
        parse_strict(text).map(Self::from)
    }

    pub fn serialize(&self) -> Result<String, GrammarError> {
        serialize(&self.segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, key: ElementKey) -> bool {
        self.segments.iter().any(|s| s.key.known() == Some(key))
    }

    /// The first segment whose argument is still empty, wherever it sits.
    pub fn pending(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.is_pending())
    }

    /// Removes `key` if present, otherwise appends it with `argument`.
    ///
    /// Appending is refused while any segment still waits for its argument.
    /// Removing never is: clicking the pending element again retracts it.
    pub fn toggle_element(
        &mut self,
        key: ElementKey,
        argument: impl Into<String>,
    ) -> Result<Toggle, GrammarError> {
        if self.contains(key) {
            self.segments.retain(|s| s.key.known() != Some(key));
            return Ok(Toggle::Removed);
        }

        if let Some(pending) = self.pending() {
            return Err(GrammarError::PendingArgument(pending.key.to_string()));
        }

        self.segments.push(Segment::new(key, argument));
        Ok(Toggle::Added)
    }

    /// Writes the argument of an existing segment. Returns `false` if `key` is absent.
    pub fn set_argument(&mut self, key: ElementKey, argument: impl Into<String>) -> bool {
        match self.segments.iter_mut().find(|s| s.key.known() == Some(key)) {
            Some(segment) => {
                segment.argument = argument.into();
                true
            }
            None => false,
        }
    }

    /// Stable reorder by [`PRIORITY`](crate::grammar::elements::PRIORITY).
    ///
    /// Keys without a priority go last when ascending and first when descending,
    /// keeping their relative order either way.
    pub fn reorder(&mut self, mode: JumpMode) {
        match mode {
            JumpMode::Reset => self.segments.clear(),
            JumpMode::Ascending => self.segments.sort_by_key(rank),
            JumpMode::Descending => self.segments.sort_by_key(|s| Reverse(rank(s))),
        }
    }

    /// Applies a `*jump*` argument such as `"descending"`.
    ///
    /// Refused with [`GrammarError::PendingArgument`] while a segment has no argument.
    pub fn apply_jump(&mut self, argument: &str) -> Result<JumpMode, GrammarError> {
        let mode = argument.parse::<JumpMode>()?;
        if let Some(pending) = self.pending() {
            return Err(GrammarError::PendingArgument(pending.key.to_string()));
        }
        self.reorder(mode);
        Ok(mode)
    }
}

fn rank(segment: &Segment) -> usize {
    segment
        .key
        .known()
        .and_then(ElementKey::priority)
        .unwrap_or(usize::MAX)
}

impl From<Vec<Segment>> for Prompt {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn keys(prompt: &Prompt) -> Vec<&str> {
        prompt.segments().iter().map(|s| s.key.as_str()).collect()
    }

    fn sample() -> Vec<Segment> {
        vec![
            Segment::new(ElementKey::Create, "search bar"),
            Segment::new(ElementKey::With, "fire edges"),
            Segment::new(ElementKey::In, "swift"),
            Segment::new(ElementKey::Like, "snapchat"),
            Segment::new(ElementKey::For, "apple phone"),
        ]
    }

    // ── serialize ──────────────────────────────────────────────────────────

    #[test]
    fn test_serialize_two_segments() {
        let segments = vec![
            Segment::new(ElementKey::In, "swift"),
            Segment::new(ElementKey::For, "apple phone"),
        ];
        assert_eq!(serialize(&segments).unwrap(), "*in* swift | *for* apple phone");
    }

    #[test]
    fn test_serialize_empty_is_empty_string() {
        assert_eq!(serialize(&[]).unwrap(), "");
    }

    #[test]
    fn test_serialize_trims_arguments() {
        let segments = vec![Segment::new(ElementKey::Create, "  search bar \n")];
        assert_eq!(serialize(&segments).unwrap(), "*create* search bar");
    }

    #[test]
    fn test_serialize_rejects_unknown_key() {
        let segments = vec![
            Segment::new(ElementKey::In, "swift"),
            Segment::new("teleport", "home"),
        ];
        assert_eq!(
            serialize(&segments),
            Err(GrammarError::UnknownElement("teleport".to_string()))
        );
    }

    #[test]
    fn test_serialize_rejects_separator_inside_and_on_edges() {
        for argument in ["a | b", "| leading", "trailing |", "|"] {
            let segments = vec![
                Segment::new(ElementKey::With, argument),
                Segment::new(ElementKey::In, "swift"),
            ];
            assert_eq!(
                serialize(&segments),
                Err(GrammarError::SeparatorInArgument("with".to_string())),
                "argument {argument:?}"
            );
        }
    }

    #[test]
    fn test_serialize_allows_bare_pipes() {
        let segments = vec![Segment::new(ElementKey::But, "a|b; 4:5")];
        assert_eq!(serialize(&segments).unwrap(), "*but* a|b; 4:5");
    }

    // ── parse ──────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_two_segments() {
        let segments = parse("*create* search bar | *from* instagram").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(ElementKey::Create, "search bar"),
                Segment::new(ElementKey::From, "instagram"),
            ]
        );
    }

    #[test]
    fn test_parse_blank_text_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_skips_trailing_separator() {
        let segments = parse("*in* swift | ").unwrap();
        assert_eq!(segments, vec![Segment::new(ElementKey::In, "swift")]);
    }

    #[test]
    fn test_parse_keeps_inner_newlines() {
        let segments = parse("*nextto* left (search bar)\nwithin left (loading screen)").unwrap();
        assert_eq!(
            segments[0].argument,
            "left (search bar)\nwithin left (loading screen)"
        );
    }

    #[test]
    fn test_parse_argument_may_contain_asterisks() {
        let segments = parse("*maybe* a *bold* idea").unwrap();
        assert_eq!(segments[0].argument, "a *bold* idea");
    }

    #[test]
    fn test_parse_empty_argument_is_pending() {
        let segments = parse("*in* swift | *for* ").unwrap();
        assert!(segments[1].is_pending());
    }

    #[test]
    fn test_parse_rejects_chunks_without_key_prefix() {
        for text in ["swift", "*in swift", "** swift", "*two words* x", "in* swift"] {
            assert!(
                matches!(parse(text), Err(GrammarError::MalformedSegment(_))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_parse_malformed_error_names_the_chunk() {
        assert_eq!(
            parse("*in* swift | oops"),
            Err(GrammarError::MalformedSegment("oops".to_string()))
        );
    }

    #[test]
    fn test_parse_passes_unknown_keys_through() {
        let segments = parse("*teleport* home | *in* swift").unwrap();
        assert_eq!(segments[0].key, Keyword::Unknown("teleport".to_string()));
        assert_eq!(segments[1].key, Keyword::Known(ElementKey::In));
    }

    #[test]
    fn test_parse_strict_rejects_unknown_keys() {
        assert_eq!(
            parse_strict("*in* swift | *teleport* home"),
            Err(GrammarError::MalformedSegment("*teleport* home".to_string()))
        );
        assert!(parse_strict("*in* swift").is_ok());
    }

    #[test]
    fn test_round_trip_reproduces_segments() {
        let segments = sample();
        let text = serialize(&segments).unwrap();
        assert_eq!(parse(&text).unwrap(), segments);
    }

    #[test]
    fn test_serialization_is_idempotent_over_every_example() {
        let segments: Vec<Segment> = ElementKey::all()
            .map(|key| Segment::new(key, key.definition().suggestions[0]))
            .collect();
        let once = serialize(&segments).unwrap();
        let twice = serialize(&parse(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    // ── toggle ─────────────────────────────────────────────────────────────

    #[test]
    fn test_toggle_adds_then_removes() {
        let original = Prompt::from(sample());
        let mut prompt = original.clone();

        assert_eq!(
            prompt.toggle_element(ElementKey::Background, "ffffff").unwrap(),
            Toggle::Added
        );
        assert_eq!(prompt.segments().last().unwrap().argument, "ffffff");
        assert_eq!(
            prompt.toggle_element(ElementKey::Background, "000000").unwrap(),
            Toggle::Removed
        );
        assert_eq!(prompt, original);
    }

    #[test]
    fn test_toggle_refuses_to_add_while_pending() {
        let mut prompt = Prompt::new();
        prompt.toggle_element(ElementKey::In, "").unwrap();
        assert_eq!(
            prompt.toggle_element(ElementKey::For, "web"),
            Err(GrammarError::PendingArgument("in".to_string()))
        );
        assert_eq!(prompt.len(), 1);
    }

    #[test]
    fn test_toggle_retracts_pending_element() {
        let mut prompt = Prompt::new();
        prompt.toggle_element(ElementKey::In, "").unwrap();
        assert_eq!(prompt.toggle_element(ElementKey::In, "").unwrap(), Toggle::Removed);
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_set_argument_clears_pending() {
        let mut prompt = Prompt::new();
        prompt.toggle_element(ElementKey::In, "").unwrap();
        assert!(prompt.set_argument(ElementKey::In, "swift"));
        assert!(prompt.pending().is_none());
        assert_eq!(
            prompt.toggle_element(ElementKey::For, "iphone").unwrap(),
            Toggle::Added
        );
        assert_eq!(prompt.serialize().unwrap(), "*in* swift | *for* iphone");
        assert!(!prompt.set_argument(ElementKey::Font, "aerial"));
    }

    #[test]
    fn test_toggle_guard_survives_reorder() {
        let mut prompt = Prompt::new();
        prompt.toggle_element(ElementKey::In, "swift").unwrap();
        prompt.toggle_element(ElementKey::Create, "").unwrap();
        prompt.reorder(JumpMode::Descending);
        assert_eq!(keys(&prompt), vec!["create", "in"]);

        assert_eq!(
            prompt.toggle_element(ElementKey::For, "iphone"),
            Err(GrammarError::PendingArgument("create".to_string()))
        );
        assert_eq!(prompt.len(), 2);
    }

    // ── reorder ────────────────────────────────────────────────────────────

    #[test]
    fn test_reorder_ascending_puts_priority_first() {
        let mut prompt = Prompt::from(vec![
            Segment::new(ElementKey::Maybe, "snapchat feel"),
            Segment::new(ElementKey::In, "swift"),
            Segment::new(ElementKey::For, "iphone"),
        ]);
        prompt.reorder(JumpMode::Ascending);
        assert_eq!(keys(&prompt), vec!["in", "for", "maybe"]);
    }

    #[test]
    fn test_reorder_ascending_keeps_unprioritized_last_and_stable() {
        let mut prompt = Prompt::from(sample());
        prompt.reorder(JumpMode::Ascending);
        assert_eq!(keys(&prompt), vec!["in", "for", "create", "with", "like"]);
    }

    #[test]
    fn test_reorder_descending_puts_unprioritized_first_and_stable() {
        let mut prompt = Prompt::from(sample());
        prompt.reorder(JumpMode::Descending);
        assert_eq!(keys(&prompt), vec!["with", "like", "create", "for", "in"]);
    }

    #[test]
    fn test_reorder_unknown_keys_rank_lowest() {
        let mut prompt = Prompt::parse("*teleport* home | *in* swift").unwrap();
        prompt.reorder(JumpMode::Ascending);
        assert_eq!(keys(&prompt), vec!["in", "teleport"]);
    }

    #[test]
    fn test_reorder_is_idempotent() {
        for mode in [JumpMode::Ascending, JumpMode::Descending] {
            let mut once = Prompt::from(sample());
            once.reorder(mode);
            let mut twice = once.clone();
            twice.reorder(mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_reorder_reset_empties() {
        let mut prompt = Prompt::from(sample());
        prompt.reorder(JumpMode::Reset);
        assert!(prompt.is_empty());
    }

    #[test]
    fn test_apply_jump_parses_mode() {
        let mut prompt = Prompt::from(sample());
        assert_eq!(prompt.apply_jump(" Descending ").unwrap(), JumpMode::Descending);
        assert_eq!(keys(&prompt)[0], "with");
        assert_eq!(
            prompt.apply_jump("sideways"),
            Err(GrammarError::UnknownJumpMode("sideways".to_string()))
        );
    }

    #[test]
    fn test_apply_jump_refused_while_pending() {
        let mut prompt = Prompt::from(sample());
        prompt.toggle_element(ElementKey::Background, "").unwrap();
        let before = prompt.clone();

        assert_eq!(
            prompt.apply_jump("descending"),
            Err(GrammarError::PendingArgument("background".to_string()))
        );
        assert_eq!(prompt, before);
        assert_eq!(prompt.pending().map(|s| s.key.as_str()), Some("background"));
    }

    #[test]
    fn test_prompt_serde_is_a_plain_list() {
        let prompt = Prompt::from(vec![Segment::new(ElementKey::In, "swift")]);
        assert_eq!(
            serde_json::to_string(&prompt).unwrap(),
            r#"[{"element":"in","argument":"swift"}]"#
        );
    }
}
