use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use quill_config::SearchSettings;
use quill_text_search::{Direction, Origin, SearchParams, SearchRequest};

/// Find, replace and jump to lines in a plain-text file.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
pub struct Cli {
    /// File to open
    pub file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find text and report where it is
    Find {
        #[command(flatten)]
        search: SearchArgs,

        /// Number of matches to walk through (find, then find again)
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Replace the next match
    Replace {
        #[command(flatten)]
        search: SearchArgs,

        /// Replacement text ($1 / ${name} refer to regex groups)
        replacement: String,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Replace every match
    ReplaceAll {
        #[command(flatten)]
        search: SearchArgs,

        /// Replacement text ($1 / ${name} refer to regex groups)
        replacement: String,

        #[command(flatten)]
        edit: EditArgs,
    },
    /// Move to a line
    Goto {
        /// 1-based line number
        line: usize,
    },
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Text or regular expression to look for
    pub text: String,

    /// Treat TEXT as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Match case
    #[arg(long)]
    pub case_sensitive: bool,

    /// Match whole words only (ignored with --regex)
    #[arg(long)]
    pub whole_word: bool,

    /// Search toward the start of the file
    #[arg(long)]
    pub backward: bool,

    /// Start from the cursor instead of the file boundary
    #[arg(long)]
    pub from_cursor: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Ask before replacing
    #[arg(long, conflicts_with = "no_confirm")]
    pub confirm: bool,

    /// Never ask before replacing
    #[arg(long)]
    pub no_confirm: bool,

    /// Write the file back when it changed
    #[arg(long)]
    pub write: bool,
}

impl SearchArgs {
    /// Build search parameters, filling unset switches from config defaults
    pub fn to_params(&self, defaults: &SearchSettings) -> SearchParams {
        let case_sensitive = self.case_sensitive || defaults.case_sensitive;
        let request = if self.regex || defaults.regex {
            SearchRequest::pattern(self.text.clone(), case_sensitive)
        } else {
            SearchRequest::literal(
                self.text.clone(),
                case_sensitive,
                self.whole_word || defaults.whole_word,
            )
        };
        let direction = if self.backward {
            Direction::Backward
        } else {
            Direction::Forward
        };
        let origin = if self.from_cursor {
            Origin::FromCursor
        } else {
            Origin::FromBoundary
        };
        SearchParams::new(request, direction, origin)
    }
}

impl EditArgs {
    pub fn wants_confirm(&self, defaults: &SearchSettings) -> bool {
        self.confirm || (defaults.confirm_replace && !self.no_confirm)
    }
}
