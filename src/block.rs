/// The formatting a run of inline text carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A typed run of inline text.
///
/// `url` is set for links and images and absent otherwise. Spans built
/// through the constructors below always uphold that; the fields stay public
/// so callers can build arbitrary spans, which conversion re-checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: SpanKind,
    pub url: Option<String>,
}

impl Span {
    fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Italic)
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Code)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

/// Block-level structure recognized in a Markdown document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    OrderedList,
    UnorderedList,
}
