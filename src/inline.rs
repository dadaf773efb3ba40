//! Inline tokenizer: splits one flattened line into typed spans.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Span, SpanKind};
use crate::error::{Error, Result};

/// Tokenize a line of text into spans.
///
/// Passes run in a fixed order over the spans that are still plain: inline
/// code first so that `*` inside backticks stays literal, bold before italic
/// because `**` contains `*`, then images, then links.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::plain(text)];
    let spans = split_delimiter(spans, "`", SpanKind::Code)?;
    let spans = split_delimiter(spans, "**", SpanKind::Bold)?;
    let spans = split_delimiter(spans, "*", SpanKind::Italic)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

/// Split plain spans on a paired delimiter. Text between a pair becomes a
/// span of `kind`; empty fragments are dropped.
pub fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        let parts: Vec<&str> = span.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnclosedDelimiter { delimiter });
        }
        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            out.push(if i % 2 == 0 {
                Span::plain(part)
            } else {
                Span {
                    text: part.to_string(),
                    kind,
                    url: None,
                }
            });
        }
    }
    Ok(out)
}

fn image_regex() -> &'static Regex {
    static IMAGE_RE: OnceLock<Regex> = OnceLock::new();
    IMAGE_RE.get_or_init(|| Regex::new(r"!\[(.+?)\]\((.+?)\)").expect("Invalid image regex"))
}

fn link_regex() -> &'static Regex {
    static LINK_RE: OnceLock<Regex> = OnceLock::new();
    LINK_RE.get_or_init(|| Regex::new(r"\[(.+?)\]\((.+?)\)").expect("Invalid link regex"))
}

/// A `[text](url)` style reference found in a line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Reference<'a> {
    range: Range<usize>,
    text: &'a str,
    url: &'a str,
}

/// Find every `![alt](url)` in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    find_images(text).into_iter().map(|r| (r.text, r.url)).collect()
}

/// Find every `[text](url)` in `text` that is not part of an image.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    find_links(text).into_iter().map(|r| (r.text, r.url)).collect()
}

fn find_images(text: &str) -> Vec<Reference<'_>> {
    image_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            Some(Reference {
                range: caps.get(0)?.range(),
                text: caps.get(1)?.as_str(),
                url: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

fn find_links(text: &str) -> Vec<Reference<'_>> {
    let mut refs = Vec::new();
    let mut start = 0;
    while let Some(caps) = link_regex().captures_at(text, start) {
        let Some(whole) = caps.get(0) else { break };
        // `regex` has no lookbehind; a match right after `!` is an image, so
        // resume the search one byte in, like a failed lookbehind would.
        if text[..whole.start()].ends_with('!') {
            start = whole.start() + 1;
            continue;
        }
        if let (Some(label), Some(url)) = (caps.get(1), caps.get(2)) {
            refs.push(Reference {
                range: whole.range(),
                text: label.as_str(),
                url: url.as_str(),
            });
        }
        start = whole.end();
    }
    refs
}

pub fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_references(spans, find_images, |alt, url| Span::image(alt, url))
}

pub fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_references(spans, find_links, |text, url| Span::link(text, url))
}

/// Replace each reference found in a plain span with the span `build`
/// makes from it, keeping the surrounding text as plain spans.
fn split_references<F, B>(spans: Vec<Span>, find: F, build: B) -> Vec<Span>
where
    F: Fn(&str) -> Vec<Reference<'_>>,
    B: Fn(&str, &str) -> Span,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        let refs = find(&span.text);
        if refs.is_empty() {
            out.push(span);
            continue;
        }
        let mut rest = 0;
        for reference in refs {
            let before = &span.text[rest..reference.range.start];
            if !before.is_empty() {
                out.push(Span::plain(before));
            }
            out.push(build(reference.text, reference.url));
            rest = reference.range.end;
        }
        let tail = &span.text[rest..];
        if !tail.is_empty() {
            out.push(Span::plain(tail));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn code_split() {
        let spans = split_delimiter(
            vec![Span::plain("This is text with a `code block` word")],
            "`",
            SpanKind::Code,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is text with a "),
                Span::code("code block"),
                Span::plain(" word"),
            ]
        );
    }

    #[test]
    fn multiple_italic_split() {
        let spans = split_delimiter(
            vec![Span::plain(
                "This is text with a *italic block* word. And another one here: *This one* right",
            )],
            "*",
            SpanKind::Italic,
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is text with a "),
                Span::italic("italic block"),
                Span::plain(" word. And another one here: "),
                Span::italic("This one"),
                Span::plain(" right"),
            ]
        );
    }

    #[test]
    fn bold_then_italic() {
        let spans = split_delimiter(
            vec![Span::plain(
                "This is text with a *italic block* word. And this one is bolded **This one**",
            )],
            "**",
            SpanKind::Bold,
        )
        .unwrap();
        let spans = split_delimiter(spans, "*", SpanKind::Italic).unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is text with a "),
                Span::italic("italic block"),
                Span::plain(" word. And this one is bolded "),
                Span::bold("This one"),
            ]
        );
    }

    #[test]
    fn unbalanced_delimiter_fails() {
        let result = split_delimiter(
            vec![Span::plain("unbalanced on purpose `code starts but does not end")],
            "`",
            SpanKind::Code,
        );
        assert_eq!(result, Err(Error::UnclosedDelimiter { delimiter: "`" }));
    }

    #[test]
    fn typed_spans_pass_through() {
        let spans = split_delimiter(vec![Span::code("a * b")], "*", SpanKind::Italic).unwrap();
        assert_eq!(spans, vec![Span::code("a * b")]);
    }

    #[test]
    fn extracts_images() {
        assert_eq!(
            extract_images("an ![image](https://a.png) and ![another](https://b.png)"),
            vec![("image", "https://a.png"), ("another", "https://b.png")]
        );
        assert!(extract_images("only a link [here](https://google.com)").is_empty());
    }

    #[test]
    fn extracts_links_but_not_images() {
        assert_eq!(
            extract_links("a [link](https://a.com) and [another](https://b.com)"),
            vec![("link", "https://a.com"), ("another", "https://b.com")]
        );
        assert!(extract_links("an image ![here](https://some-image-here)").is_empty());
        assert_eq!(
            extract_links("![img](https://i.png) then [link](https://l.com)"),
            vec![("link", "https://l.com")]
        );
    }

    #[test]
    fn split_images_keeps_surrounding_text() {
        let spans = split_images(vec![Span::plain(
            "This is text with an ![image](https://a.png) and no other image",
        )]);
        assert_eq!(
            spans,
            vec![
                Span::plain("This is text with an "),
                Span::image("image", "https://a.png"),
                Span::plain(" and no other image"),
            ]
        );
    }

    #[test]
    fn split_references_drops_empty_edges() {
        let spans = split_links(vec![Span::plain("[a](x)[b](y)")]);
        assert_eq!(spans, vec![Span::link("a", "x"), Span::link("b", "y")]);
    }

    #[test]
    fn split_without_matches_returns_span_unchanged() {
        let spans = split_links(vec![Span::plain("nothing to see")]);
        assert_eq!(spans, vec![Span::plain("nothing to see")]);
    }

    #[test]
    fn tokenize_full_line() {
        let spans = tokenize(
            "This is **text** with an *italic* word and a `code block` and an \
             ![image](https://i.imgur.com/zjjcJKZ.png) and a [link](https://boot.dev)",
        )
        .unwrap();
        assert_eq!(
            spans,
            vec![
                Span::plain("This is "),
                Span::bold("text"),
                Span::plain(" with an "),
                Span::italic("italic"),
                Span::plain(" word and a "),
                Span::code("code block"),
                Span::plain(" and an "),
                Span::image("image", "https://i.imgur.com/zjjcJKZ.png"),
                Span::plain(" and a "),
                Span::link("link", "https://boot.dev"),
            ]
        );
    }

    #[test]
    fn tokenize_code_protects_asterisks() {
        assert_eq!(
            tokenize("use `a * b` here").unwrap(),
            vec![
                Span::plain("use "),
                Span::code("a * b"),
                Span::plain(" here"),
            ]
        );
    }

    #[test]
    fn tokenize_single_backtick_fails() {
        assert_eq!(
            tokenize("a `b"),
            Err(Error::UnclosedDelimiter { delimiter: "`" })
        );
    }

    #[test]
    fn tokenize_balanced_backticks() {
        assert_eq!(
            tokenize("a `b` c").unwrap(),
            vec![Span::plain("a "), Span::code("b"), Span::plain(" c")]
        );
    }

    #[test]
    fn tokenize_empty_yields_no_spans() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }
}
