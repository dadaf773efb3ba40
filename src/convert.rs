use crate::block::{BlockType, Span, SpanKind};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::html::HtmlNode;
use crate::inline::tokenize;
use crate::parser::{classify, heading_marker_len, segment_blocks, segment_blocks_non_empty};

/// Convert a markdown document into a `div` holding one node per block.
pub fn document_to_html(markdown: &str, config: &Config) -> Result<HtmlNode> {
    let blocks = if config.markdown.drop_empty_blocks {
        segment_blocks_non_empty(markdown)
    } else {
        segment_blocks(markdown)
    };

    let children = blocks
        .into_iter()
        .map(|block| {
            let block_type = classify(block);
            log::debug!("{:?} block: {:?}", block_type, block);
            block_to_html(block, block_type)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent("div", children))
}

/// Convert a single trimmed block with the converter for its type.
pub fn block_to_html(block: &str, block_type: BlockType) -> Result<HtmlNode> {
    match block_type {
        BlockType::Paragraph => paragraph_to_html(block),
        BlockType::Heading => heading_to_html(block),
        BlockType::Code => code_to_html(block),
        BlockType::Quote => quote_to_html(block),
        BlockType::OrderedList => ordered_list_to_html(block),
        BlockType::UnorderedList => unordered_list_to_html(block),
    }
}

/// Map an inline span to its HTML leaf.
pub fn span_to_node(span: &Span) -> Result<HtmlNode> {
    let node = match span.kind {
        SpanKind::Plain => HtmlNode::text(&span.text),
        SpanKind::Bold => HtmlNode::leaf("b", &span.text),
        SpanKind::Italic => HtmlNode::leaf("i", &span.text),
        SpanKind::Code => HtmlNode::leaf("code", &span.text),
        SpanKind::Link => {
            let url = span.url.as_deref().ok_or(Error::MissingUrl { kind: span.kind })?;
            HtmlNode::leaf("a", &span.text).with_attribute("href", url)
        }
        SpanKind::Image => {
            let url = span.url.as_deref().ok_or(Error::MissingUrl { kind: span.kind })?;
            HtmlNode::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", &span.text)
        }
    };
    Ok(node)
}

fn line_to_nodes(line: &str) -> Result<Vec<HtmlNode>> {
    tokenize(line)?.iter().map(span_to_node).collect()
}

pub fn paragraph_to_html(block: &str) -> Result<HtmlNode> {
    let line = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(HtmlNode::parent("p", line_to_nodes(&line)?))
}

pub fn heading_to_html(block: &str) -> Result<HtmlNode> {
    let level = heading_marker_len(block);
    if !(1..=6).contains(&level) {
        return Err(Error::InvalidHeadingLevel(level));
    }
    let content = block[level..].trim();
    Ok(HtmlNode::parent(
        format!("h{level}"),
        line_to_nodes(content)?,
    ))
}

/// Code blocks keep their text literally; no inline formatting applies.
pub fn code_to_html(block: &str) -> Result<HtmlNode> {
    let fence = |c: char| c == '`' || c.is_whitespace();
    let value = block
        .trim_matches(fence)
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(HtmlNode::parent("pre", vec![HtmlNode::leaf("code", value)]))
}

pub fn quote_to_html(block: &str) -> Result<HtmlNode> {
    let line = block
        .split('\n')
        .map(|line| line.trim().trim_start_matches('>').trim())
        .collect::<Vec<_>>()
        .join(" ");
    Ok(HtmlNode::parent("blockquote", line_to_nodes(line.trim())?))
}

pub fn ordered_list_to_html(block: &str) -> Result<HtmlNode> {
    list_to_html(block, "ol", strip_ordered_marker)
}

pub fn unordered_list_to_html(block: &str) -> Result<HtmlNode> {
    list_to_html(block, "ul", strip_unordered_marker)
}

fn list_to_html(block: &str, tag: &str, strip_marker: fn(&str) -> &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line_to_nodes(strip_marker(line)).map(|nodes| HtmlNode::parent("li", nodes)))
        .collect::<Result<Vec<_>>>()?;
    Ok(HtmlNode::parent(tag, items))
}

/// Drop the `N. ` marker, whatever the width of `N`.
fn strip_ordered_marker(line: &str) -> &str {
    match line.split_once(". ") {
        Some((_, rest)) => rest,
        None => skip_chars(line, 3),
    }
}

fn strip_unordered_marker(line: &str) -> &str {
    skip_chars(line, 2)
}

fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((at, _)) => &line[at..],
        None => "",
    }
}
