//! Node model for the document tree.
//!
//! Every node lives in a [`Tree`](super::Tree) arena and is addressed by a
//! [`NodeId`]. The set of node variants is closed; [`NodeKind::for_tag`] maps
//! an HTML tag name onto one of them.

use std::fmt;

use serde::Serialize;

use super::text::TextContainer;

/// Unique identifier for a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value for no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID.
    pub fn is_some(&self) -> bool {
        self.0 != u32::MAX
    }

    /// Check if this is the sentinel value.
    pub fn is_none(&self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("#none")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// Element attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Inline markup span (bold, link, ...).
///
/// A formatting element is never a structural child. It is stored in the
/// formatting list of its owning leaf (`leaf`), while the node's `parent`
/// keeps the element it was semantically nested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingElement {
    /// Paragraph or heading whose text container stores this element.
    pub leaf: NodeId,
    /// Byte offset into the owning leaf's text where this span starts.
    pub text_start: usize,
    /// Byte offset into the owning leaf's text where this span ends.
    pub text_end: usize,
}

impl FormattingElement {
    pub(crate) fn detached() -> Self {
        Self {
            leaf: NodeId::NONE,
            text_start: 0,
            text_end: 0,
        }
    }
}

/// The closed set of node variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Generic block container; default for unrecognized tags.
    Structured { children: Vec<NodeId> },
    /// Block whose content is ignored by research (script, style).
    Irrelevant { children: Vec<NodeId> },
    /// Section heading, level 1 through 6.
    Heading {
        level: u8,
        text: Option<TextContainer>,
    },
    /// Text block. `implicit` paragraphs were synthesized by the builder
    /// rather than opened by a `<p>` tag.
    Paragraph {
        implicit: bool,
        text: Option<TextContainer>,
    },
    /// List block; children are always list items.
    List { ordered: bool, children: Vec<NodeId> },
    ListItem { children: Vec<NodeId> },
    Formatting(FormattingElement),
}

/// Tags whose content research ignores.
const IRRELEVANT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Inline tags that become formatting elements.
const FORMATTING_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "data", "del", "dfn", "em", "i", "img",
    "ins", "kbd", "mark", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup",
    "time", "tt", "u", "var",
];

impl NodeKind {
    /// Classify a tag name. Total over all strings: anything unrecognized,
    /// including the empty string, is a structured node.
    ///
    /// `tag` is expected in lowercase; see [`normalize_tag`].
    pub fn for_tag(tag: &str) -> NodeKind {
        match tag {
            "h1" => NodeKind::heading(1),
            "h2" => NodeKind::heading(2),
            "h3" => NodeKind::heading(3),
            "h4" => NodeKind::heading(4),
            "h5" => NodeKind::heading(5),
            "h6" => NodeKind::heading(6),

            "p" => NodeKind::Paragraph {
                implicit: false,
                text: None,
            },

            "ol" => NodeKind::List {
                ordered: true,
                children: Vec::new(),
            },
            "ul" => NodeKind::List {
                ordered: false,
                children: Vec::new(),
            },
            "li" => NodeKind::ListItem {
                children: Vec::new(),
            },

            t if IRRELEVANT_TAGS.contains(&t) => NodeKind::Irrelevant {
                children: Vec::new(),
            },
            t if FORMATTING_TAGS.contains(&t) => {
                NodeKind::Formatting(FormattingElement::detached())
            }

            _ => NodeKind::Structured {
                children: Vec::new(),
            },
        }
    }

    fn heading(level: u8) -> NodeKind {
        NodeKind::Heading { level, text: None }
    }

    /// A paragraph synthesized by the builder.
    pub(crate) fn implicit_paragraph(text: Option<TextContainer>) -> NodeKind {
        NodeKind::Paragraph {
            implicit: true,
            text,
        }
    }
}

/// Lowercase a tag name for classification and storage.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

/// A node in the tree arena.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Tag name in lowercase. For formatting elements this is their type.
    pub tag: String,
    pub attributes: Vec<Attribute>,
    /// Non-owning back-reference. Structural nodes point at their container;
    /// formatting elements point at the node they are semantically nested in.
    pub parent: NodeId,
}

impl Node {
    pub fn new(tag: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            kind,
            tag: tag.into(),
            attributes: Vec::new(),
            parent: NodeId::NONE,
        }
    }

    /// Heading or paragraph.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Heading { .. } | NodeKind::Paragraph { .. }
        )
    }

    pub fn is_paragraph(&self) -> bool {
        matches!(self.kind, NodeKind::Paragraph { .. })
    }

    pub fn is_formatting(&self) -> bool {
        matches!(self.kind, NodeKind::Formatting(_))
    }

    pub fn is_irrelevant(&self) -> bool {
        matches!(self.kind, NodeKind::Irrelevant { .. })
    }

    /// Structural children, or `None` for leaves and formatting elements.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.kind {
            NodeKind::Structured { children }
            | NodeKind::Irrelevant { children }
            | NodeKind::List { children, .. }
            | NodeKind::ListItem { children } => Some(children),
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match &mut self.kind {
            NodeKind::Structured { children }
            | NodeKind::Irrelevant { children }
            | NodeKind::List { children, .. }
            | NodeKind::ListItem { children } => Some(children),
            _ => None,
        }
    }

    /// Text container of a leaf, if one has been attached.
    pub fn text_container(&self) -> Option<&TextContainer> {
        match &self.kind {
            NodeKind::Heading { text, .. } | NodeKind::Paragraph { text, .. } => text.as_ref(),
            _ => None,
        }
    }

    /// Text container of a leaf, created on first access. `None` for non-leaves.
    pub(crate) fn text_container_mut(&mut self) -> Option<&mut TextContainer> {
        match &mut self.kind {
            NodeKind::Heading { text, .. } | NodeKind::Paragraph { text, .. } => {
                Some(text.get_or_insert_with(TextContainer::default))
            }
            _ => None,
        }
    }

    pub fn formatting_element(&self) -> Option<&FormattingElement> {
        match &self.kind {
            NodeKind::Formatting(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn formatting_element_mut(&mut self) -> Option<&mut FormattingElement> {
        match &mut self.kind {
            NodeKind::Formatting(element) => Some(element),
            _ => None,
        }
    }

    /// Get an attribute value (first match).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}
