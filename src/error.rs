//! Error types for Markdown conversion and site generation

use std::path::PathBuf;

use thiserror::Error;

use crate::block::SpanKind;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning Markdown into an HTML tree or serializing it.
///
/// All of these abort the conversion of the whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An inline code, bold, or italic delimiter was opened but never closed
    #[error("Invalid markdown syntax: unclosed `{delimiter}` formatting delimiter")]
    UnclosedDelimiter { delimiter: &'static str },

    /// A heading block with a marker count outside 1..=6
    #[error("Invalid heading level {0}, expected 1 to 6")]
    InvalidHeadingLevel(usize),

    /// A link or image span without a url
    #[error("{kind:?} span without a url")]
    MissingUrl { kind: SpanKind },

    #[error("Parent node must have a tag")]
    MissingTag,

    #[error("Parent node <{tag}> must have at least one child")]
    EmptyChildren { tag: String },

    #[error("Leaf node should have a value")]
    MissingValue,
}

/// Errors raised while generating a site from a content tree.
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The first block of a page is not a single `# ` heading line
    #[error("Missing title in {}", path.display())]
    MissingTitle { path: PathBuf },

    #[error(transparent)]
    Render(#[from] Error),
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SiteError::Io {
            path: path.into(),
            source,
        }
    }
}
