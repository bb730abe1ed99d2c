//! Declarative views.
//!
//! Builders in this module are pure functions from backend data to a
//! [`View`]: an ordered list of [`Block`]s. Renderers in
//! [`crate::output`] turn a view into terminal text or JSON.

pub mod grid;
pub mod tree;
pub mod wiki;

use serde::Serialize;

use crate::models::{RepoSource, Severity};

pub use grid::{RepoCard, Tile, render_grid};
pub use tree::{TreeDir, TreeLeaf, build_file_tree};

/// One rendered pane.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct View {
    pub blocks: Vec<Block>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenate `other` after this view's blocks.
    pub fn extend(&mut self, other: View) {
        self.blocks.extend(other.blocks);
    }
}

/// Visual weight of a notice or badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Error,
}

/// Short uppercase label attached to a panel, leaf, or card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub text: String,
    pub tone: Tone,
}

impl Badge {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn error() -> Self {
        Self::new("ERROR", Tone::Error)
    }

    pub fn severity(severity: Severity) -> Self {
        let tone = match severity {
            Severity::Error => Tone::Error,
            Severity::Style => Tone::Info,
            Severity::Warning => Tone::Warning,
        };
        Self::new(severity.badge(), tone)
    }

    pub fn source(source: RepoSource) -> Self {
        let tone = match source {
            RepoSource::Git => Tone::Info,
            RepoSource::Local => Tone::Neutral,
        };
        Self::new(source.label(), tone)
    }
}

/// Building blocks of a view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Location line above the title.
    Breadcrumb { text: String },
    Title { text: String },
    Heading { text: String },
    Paragraph { text: String },
    /// Highlighted message, e.g. an inline error or success box.
    Notice { tone: Tone, text: String },
    /// Bulleted list with an optional caption.
    List {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        items: Vec<String>,
    },
    /// Bordered box with a header line and nested content.
    Panel {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        meta: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        badge: Option<Badge>,
        children: Vec<Block>,
    },
    /// Preformatted text.
    Code { text: String },
    /// Raw SVG markup.
    Svg { markup: String },
    /// Directory-grouped file listing.
    Tree { dirs: Vec<TreeDir> },
    /// Repository grid.
    Grid { tiles: Vec<Tile> },
}

impl Block {
    pub fn breadcrumb(text: impl Into<String>) -> Self {
        Block::Breadcrumb { text: text.into() }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Block::Title { text: text.into() }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading { text: text.into() }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn notice(tone: Tone, text: impl Into<String>) -> Self {
        Block::Notice {
            tone,
            text: text.into(),
        }
    }
}
