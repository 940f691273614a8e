//! The closed ChimPrompt vocabulary.
//!
//! Every keyword the grammar accepts lives in [`ELEMENTS`]; all lookups by key, by
//! shortcut or by category go through this one table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::grammar::error::GrammarError;

/// One of the 26 keyword elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKey {
    In,
    For,
    Context,
    Line,
    ChimContext,
    Prompt,
    ChimPrompt,
    Spawn,
    Rare,
    Create,
    From,
    MakeIt,
    Like,
    But,
    With,
    Without,
    NextTo,
    Blame,
    Animate,
    Background,
    Font,
    Maybe,
    Then,
    Forge,
    Mold,
    Jump,
}

/// Immutable metadata for one element.
#[derive(Debug, Clone)]
pub struct ElementDefinition {
    pub key: ElementKey,
    pub canonical_name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub example: &'static str,
    /// Picker shortcut, pressed while Tab is held.
    pub shortcut: char,
    pub suggestions: &'static [&'static str],
}

/// Most to least important. Keys missing here have the lowest priority.
pub const PRIORITY: [ElementKey; 13] = [
    ElementKey::In,
    ElementKey::For,
    ElementKey::Create,
    ElementKey::From,
    ElementKey::Background,
    ElementKey::Animate,
    ElementKey::Font,
    ElementKey::NextTo,
    ElementKey::Blame,
    ElementKey::Maybe,
    ElementKey::Then,
    ElementKey::Forge,
    ElementKey::Mold,
];

pub static ELEMENTS: [ElementDefinition; 26] = [
    ElementDefinition {
        key: ElementKey::In,
        canonical_name: "In",
        category: "Core",
        description: "Specifies the language you want the output to be in",
        example: "*in* swift",
        shortcut: 'q',
        suggestions: &["swift", "python", "javascript", "dart", "react", "flutter", "kotlin"],
    },
    ElementDefinition {
        key: ElementKey::For,
        canonical_name: "For",
        category: "Core",
        description: "Chooses the app platform you're building for",
        example: "*for* apple phone",
        shortcut: 'w',
        suggestions: &["apple phone", "web", "iphone", "android", "tablet", "desktop"],
    },
    ElementDefinition {
        key: ElementKey::Context,
        canonical_name: "Context",
        category: "References",
        description: "References code using index number shortcut",
        example: "*context* 39 //39th code file in your library\n*context* 39; 45\n*context* 39 to 45",
        shortcut: 'e',
        suggestions: &["39", "39; 45", "39 to 45"],
    },
    ElementDefinition {
        key: ElementKey::Line,
        canonical_name: "Line",
        category: "Structure",
        description: "Specifies what line the code should be in",
        example: "*line* 150\n*line* react; 150",
        shortcut: 'r',
        suggestions: &["150", "react; 150"],
    },
    ElementDefinition {
        key: ElementKey::ChimContext,
        canonical_name: "ChimContext",
        category: "References",
        description: "References code using code id",
        example: "*chimcontext* 4535hevne53354 //public code id",
        shortcut: 't',
        suggestions: &["4535hevne53354"],
    },
    ElementDefinition {
        key: ElementKey::Prompt,
        canonical_name: "Prompt",
        category: "Loading",
        description: "Loads a local prompt name saved in library",
        example: "*prompt* saved1\n*prompt* [homepage] //assuming a mold called homepage exists",
        shortcut: 'y',
        suggestions: &["saved1", "[homepage]"],
    },
    ElementDefinition {
        key: ElementKey::ChimPrompt,
        canonical_name: "ChimPrompt",
        category: "Loading",
        description: "Loads a public prompt name",
        example: "*chimprompt* richardssearchbar",
        shortcut: 'u',
        suggestions: &["richardssearchbar"],
    },
    ElementDefinition {
        key: ElementKey::Spawn,
        canonical_name: "Spawn",
        category: "Generation",
        description: "Creates visually similar entire page from program",
        example: "*spawn* instagram home page; instagram.com",
        shortcut: 'i',
        suggestions: &["instagram/ home page; instagram.com"],
    },
    ElementDefinition {
        key: ElementKey::Rare,
        canonical_name: "Rare",
        category: "Generation",
        description: "Randomly creates a unique object",
        example: "*rare* search bar",
        shortcut: 'o',
        suggestions: &["search bar"],
    },
    ElementDefinition {
        key: ElementKey::Create,
        canonical_name: "Create",
        category: "Generation",
        description: "Specifies the object in particular you want to achieve",
        example: "*create* search bar",
        shortcut: 'p',
        suggestions: &["search bar", "button", "navigation menu", "profile card"],
    },
    ElementDefinition {
        key: ElementKey::From,
        canonical_name: "From",
        category: "Appearance",
        description: "Mimics the appearance of an object from an existing app",
        example: "*from* instagram/\"search page\"",
        shortcut: 'a',
        suggestions: &["instagram/ search page", "twitter", "whatsapp", "snapchat"],
    },
    ElementDefinition {
        key: ElementKey::MakeIt,
        canonical_name: "Make It",
        category: "Behavior",
        description: "Selects if it's going to be auto hiding (dynamic) or static",
        example: "*makeit* static",
        shortcut: 's',
        suggestions: &["static", "dynamic"],
    },
    ElementDefinition {
        key: ElementKey::Like,
        canonical_name: "Like",
        category: "Functionality",
        description: "Mimics the functionality of a similar object from a different project",
        example: "*like* snapchat",
        shortcut: 'd',
        suggestions: &["snapchat/ explore page"],
    },
    ElementDefinition {
        key: ElementKey::But,
        canonical_name: "But",
        category: "Attributes",
        description: "Replaces abstract attributes and adds exact dimensions",
        example: "*but* fire edges that turn cold when inactive for 1 minute; top center; rectangle; 4:5; 35",
        shortcut: 'f',
        suggestions: &[
            "fire edges that turn cold when inactive for 1 minute",
            "top center",
            "rectangle",
            "4:5",
            "35",
        ],
    },
    ElementDefinition {
        key: ElementKey::With,
        canonical_name: "With",
        category: "Attributes",
        description: "Adds abstract attributes",
        example: "*with* fire edges",
        shortcut: 'g',
        suggestions: &["fire edges"],
    },
    ElementDefinition {
        key: ElementKey::Without,
        canonical_name: "Without",
        category: "Attributes",
        description: "Removes abstract attributes",
        example: "*without* search icon on the end",
        shortcut: 'h',
        suggestions: &["search icon on the end"],
    },
    ElementDefinition {
        key: ElementKey::NextTo,
        canonical_name: "Next To",
        category: "Position",
        description: "References position relative to an object",
        example: "*nextto* left (search bar)\n*nextto* within left (loading screen)\n*nextto* within bottom right (checkout page)\n*nextto* above (share sheet)\n*nextto* within below (chat screen)",
        shortcut: 'j',
        suggestions: &[
            "left (search bar)",
            "within left (loading screen)",
            "within bottom right (checkout page)",
            "above (share sheet)",
            "within below (chat screen)",
        ],
    },
    ElementDefinition {
        key: ElementKey::Blame,
        canonical_name: "Blame",
        category: "Validation",
        description: "Specifies a problem you want to make sure doesn't occur",
        example: "*blame* instagram / search page",
        shortcut: 'k',
        suggestions: &["instagram / search page"],
    },
    ElementDefinition {
        key: ElementKey::Animate,
        canonical_name: "Animate",
        category: "Animation",
        description: "Adds an animation for when tapped and speed",
        example: "*animate* start(3; appear); end(5, fade out)",
        shortcut: 'l',
        suggestions: &["start(3; appear); end(5, fade out)"],
    },
    ElementDefinition {
        key: ElementKey::Background,
        canonical_name: "Background",
        category: "Styling",
        description: "Sets the background color",
        example: "*background* ffffffff\n*background* light(ffffffff); dark(00000000)",
        shortcut: 'z',
        suggestions: &["ffffffff", "light(ffffffff); dark(00000000)"],
    },
    ElementDefinition {
        key: ElementKey::Font,
        canonical_name: "Font",
        category: "Typography",
        description: "Specifies font properties including type, alignment, color, and size",
        example: "*font* aerial; center; ffffffff; 15\n*font* aerial; left; light(00000000); dark(ffffffff); 15",
        shortcut: 'x',
        suggestions: &[
            "aerial; center; ffffffff; 15",
            "aerial; left; light(00000000); dark(ffffffff); 15",
        ],
    },
    ElementDefinition {
        key: ElementKey::Maybe,
        canonical_name: "Maybe",
        category: "Context",
        description: "Allows you to describe what you want in your own words for extra context",
        example: "*maybe* snapchat search bar with a bit of instagram feel",
        shortcut: 'c',
        suggestions: &["snapchat search bar with a bit of instagram feel"],
    },
    ElementDefinition {
        key: ElementKey::Then,
        canonical_name: "Then",
        category: "Replication",
        description: "Replicates the same edits to create multiple codes",
        example: "*then* loading screen; checkout page",
        shortcut: 'v',
        suggestions: &["loading screen; checkout page"],
    },
    ElementDefinition {
        key: ElementKey::Forge,
        canonical_name: "Forge",
        category: "Configuration",
        description: "Saves a configuration for a component",
        example: "*blame* instagram / search page; ~forge~ ig bias",
        shortcut: 'b',
        suggestions: &["instagram / search page; (ig bias)", "(ig bias)"],
    },
    ElementDefinition {
        key: ElementKey::Mold,
        canonical_name: "Mold",
        category: "Organization",
        description: "Make multiple objects be part of a single page",
        example: "*mold* loading screen; checkout page; [home page]\n*mold* (home page)",
        shortcut: 'n',
        suggestions: &["loading screen; checkout page; [home page]", "(home page)"],
    },
    ElementDefinition {
        key: ElementKey::Jump,
        canonical_name: "Jump",
        category: "Organization",
        description: "Auto arranges prompts in order of importance",
        example: "*jump* descending\n*jump* ascending\n*jump* reset",
        shortcut: 'm',
        suggestions: &["ascending", "descending", "reset"],
    },
];

impl ElementKey {
    /// All keys, in vocabulary order.
    pub fn all() -> impl Iterator<Item = ElementKey> {
        ELEMENTS.iter().map(|d| d.key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKey::In => "in",
            ElementKey::For => "for",
            ElementKey::Context => "context",
            ElementKey::Line => "line",
            ElementKey::ChimContext => "chimcontext",
            ElementKey::Prompt => "prompt",
            ElementKey::ChimPrompt => "chimprompt",
            ElementKey::Spawn => "spawn",
            ElementKey::Rare => "rare",
            ElementKey::Create => "create",
            ElementKey::From => "from",
            ElementKey::MakeIt => "makeit",
            ElementKey::Like => "like",
            ElementKey::But => "but",
            ElementKey::With => "with",
            ElementKey::Without => "without",
            ElementKey::NextTo => "nextto",
            ElementKey::Blame => "blame",
            ElementKey::Animate => "animate",
            ElementKey::Background => "background",
            ElementKey::Font => "font",
            ElementKey::Maybe => "maybe",
            ElementKey::Then => "then",
            ElementKey::Forge => "forge",
            ElementKey::Mold => "mold",
            ElementKey::Jump => "jump",
        }
    }

    pub fn definition(self) -> &'static ElementDefinition {
        // The table is laid out in enum declaration order.
        &ELEMENTS[self as usize]
    }

    /// Position in [`PRIORITY`], `None` for keys without a priority.
    pub fn priority(self) -> Option<usize> {
        PRIORITY.iter().position(|&k| k == self)
    }

    pub fn from_shortcut(shortcut: char) -> Option<ElementKey> {
        let shortcut = shortcut.to_ascii_lowercase();
        ELEMENTS.iter().find(|d| d.shortcut == shortcut).map(|d| d.key)
    }
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKey {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ELEMENTS
            .iter()
            .find(|d| d.key.as_str() == s)
            .map(|d| d.key)
            .ok_or_else(|| GrammarError::UnknownElement(s.to_string()))
    }
}

/// Definitions whose category matches `category`, ignoring case.
pub fn elements_in_category(category: &str) -> Vec<&'static ElementDefinition> {
    ELEMENTS
        .iter()
        .filter(|d| d.category.eq_ignore_ascii_case(category))
        .collect()
}
