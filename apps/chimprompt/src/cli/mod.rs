use clap::{Parser, Subcommand};

pub mod commands;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "chimprompt",
    version,
    about = "Build, parse and reorder ChimPrompt strings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print errors as a JSON envelope
    #[arg(long, global = true)]
    pub json: bool,
}

/// Wherever a prompt or free text is expected, `-` reads it from stdin.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the element vocabulary
    Elements {
        /// Only show elements of this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the full definition of one element
    Describe {
        /// Element key, e.g. "nextto"
        key: String,
    },

    /// Serialize key=argument pairs into canonical prompt text
    Build {
        /// Segments in order, e.g. in=swift "for=apple phone"
        #[arg(required = true)]
        segments: Vec<String>,
    },

    /// Parse prompt text into segments (JSON)
    Parse {
        text: String,

        /// Reject keys outside the vocabulary
        #[arg(long)]
        strict: bool,
    },

    /// Add an element, or remove it if already present
    Toggle {
        text: String,

        key: String,

        /// Argument for a newly added element; omit to leave it pending
        argument: Option<String>,
    },

    /// Reorder a prompt by element priority: ascending, descending or reset
    Jump { text: String, mode: String },

    /// Convert natural language into a prompt (JSON)
    Convert {
        text: String,

        /// Skip the AI service and use heuristic extraction
        #[arg(long)]
        offline: bool,
    },
}
