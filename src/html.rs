//! HTML node tree built from Markdown and serialized to HTML text.

use crate::error::{Error, Result};

/// Attributes of an HTML element in insertion order.
///
/// Inserting an existing key replaces its value in place, so the key keeps
/// the position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn write_html(&self, out: &mut String) {
        for (key, value) in self.iter() {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// A node in the HTML tree.
///
/// Leaves hold text and never nest; parents own their children outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf {
        /// `None` emits the value verbatim, ignoring attributes
        tag: Option<String>,
        value: Option<String>,
        attributes: Option<Attributes>,
    },
    Parent {
        tag: Option<String>,
        children: Vec<HtmlNode>,
        attributes: Option<Attributes>,
    },
}

impl HtmlNode {
    /// Untagged leaf emitted as-is
    pub fn text(value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: None,
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        HtmlNode::Leaf {
            tag: Some(tag.into()),
            value: Some(value.into()),
            attributes: None,
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Parent {
            tag: Some(tag.into()),
            children,
            attributes: None,
        }
    }

    /// Set an attribute, creating the attribute map on first use.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let attributes = match &mut self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => attributes,
        };
        attributes.get_or_insert_with(Attributes::new).insert(key, value);
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf { tag, .. } | HtmlNode::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            HtmlNode::Leaf { attributes, .. } | HtmlNode::Parent { attributes, .. } => {
                attributes.as_ref()
            }
        }
    }

    /// Children of a parent node; leaves have none.
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf { .. } => &[],
            HtmlNode::Parent { children, .. } => children,
        }
    }

    /// A parent node without children. Such nodes are left out when their
    /// parent is serialized.
    pub fn is_empty_parent(&self) -> bool {
        matches!(self, HtmlNode::Parent { children, .. } if children.is_empty())
    }

    /// Serialize the tree to HTML with no whitespace between siblings.
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf {
                tag,
                value,
                attributes,
            } => {
                let value = value.as_deref().ok_or(Error::MissingValue)?;
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(tag, attributes.as_ref(), out);
                        out.push_str(value);
                        close_tag(tag, out);
                    }
                }
            }
            HtmlNode::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_deref().ok_or(Error::MissingTag)?;
                if children.is_empty() {
                    return Err(Error::EmptyChildren {
                        tag: tag.to_string(),
                    });
                }
                open_tag(tag, attributes.as_ref(), out);
                for child in children.iter().filter(|c| !c.is_empty_parent()) {
                    child.write_html(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: Option<&Attributes>, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if let Some(attributes) = attributes {
        attributes.write_html(out);
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
