//! Text plus inline formatting spans, owned by a leaf node.

use super::node::NodeId;

/// Literal text of a paragraph or heading, with the formatting elements that
/// annotate it.
///
/// `formatting` is flat: nested inline markup is hoisted into this list in
/// document order, each element keeping its semantic parent on the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextContainer {
    pub text: String,
    pub formatting: Vec<NodeId>,
}

impl TextContainer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            formatting: Vec::new(),
        }
    }

    /// Append text verbatim. Returns the new text length in bytes.
    pub fn append_text(&mut self, text: &str) -> usize {
        self.text.push_str(text);
        self.text.len()
    }

    pub fn push_formatting(&mut self, element: NodeId) {
        self.formatting.push(element);
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
