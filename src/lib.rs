mod block;
mod config;
mod convert;
mod error;
mod html;
mod inline;
mod parser;
pub mod site;

pub use block::{BlockType, Span, SpanKind};
pub use config::{Config, MarkdownConfig, SiteConfig};
pub use convert::{
    block_to_html, code_to_html, heading_to_html, ordered_list_to_html, paragraph_to_html,
    quote_to_html, span_to_node, unordered_list_to_html,
};
pub use error::{Error, Result, SiteError};
pub use html::{Attributes, HtmlNode};
pub use inline::{
    extract_images, extract_links, split_delimiter, split_images, split_links, tokenize,
};
pub use parser::{classify, segment_blocks};

/// Convert markdown to an HTML node tree using default config.
pub fn markdown_to_html_node(markdown: &str) -> Result<HtmlNode> {
    markdown_to_html_node_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to an HTML node tree with custom config.
pub fn markdown_to_html_node_with_config(markdown: &str, config: &Config) -> Result<HtmlNode> {
    convert::document_to_html(markdown, config)
}

/// Convert markdown to HTML text using default config.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_node(markdown)?.to_html()
}

/// Convert markdown to HTML text with custom config.
pub fn markdown_to_html_with_config(markdown: &str, config: &Config) -> Result<String> {
    markdown_to_html_node_with_config(markdown, config)?.to_html()
}
