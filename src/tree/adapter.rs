//! Tree construction rules.
//!
//! [`TreeAdapter`] receives element creation, text and append events in
//! document order and turns them into a [`Tree`]:
//!
//! - text reaching a container lands in its trailing paragraph, or in a new
//!   implicit paragraph when the last child is anything else;
//! - inline markup appended to a container is wrapped in a new implicit
//!   paragraph;
//! - inline markup nested in inline markup is hoisted into the nearest
//!   paragraph or heading, keeping its semantic parent.
//!
//! The adapter trusts its event source to balance tags and never reports
//! errors. Paths that only malformed input can reach fall back to attaching
//! at the nearest sensible container.

use log::{debug, warn};

use super::arena::Tree;
use super::node::{Attribute, Node, NodeId, NodeKind, normalize_tag};
use super::text::TextContainer;

/// Builds a [`Tree`] from element, text and append events.
#[derive(Debug, Default)]
pub struct TreeAdapter {
    tree: Tree,
}

impl TreeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Root of the tree under construction.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Read access to the tree under construction.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Finish building and return the tree.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Allocate a detached node for `tag`. See [`NodeKind::for_tag`].
    pub fn create_element(&mut self, tag: &str, attributes: Vec<Attribute>) -> NodeId {
        let tag = normalize_tag(tag);
        let mut node = Node::new(tag.as_str(), NodeKind::for_tag(&tag));
        node.attributes = attributes;
        self.tree.alloc(node)
    }

    /// Insert text into `node`.
    pub fn insert_text(&mut self, node: NodeId, text: &str) {
        let Some(target) = self.tree.get(node) else {
            return;
        };

        if target.is_leaf() {
            self.append_leaf_text(node, text);
        } else if target.is_formatting() {
            self.insert_formatting_text(node, text);
        } else if matches!(target.kind, NodeKind::List { .. }) {
            self.insert_list_text(node, text);
        } else {
            self.insert_container_text(node, text);
        }
    }

    /// Attach `child` under `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let (Some(parent_node), Some(child_node)) = (self.tree.get(parent), self.tree.get(child))
        else {
            return;
        };

        let child_is_formatting = child_node.is_formatting();
        if parent_node.is_formatting() {
            self.append_to_formatting(parent, child, child_is_formatting);
        } else if parent_node.is_leaf() {
            if child_is_formatting {
                self.attach_formatting(parent, parent, child);
            } else {
                // Block content inside a paragraph or heading: continue after it
                debug!("block <{}> inside leaf {parent}; placing after it", child_node.tag);
                let container = self.tree.parent(parent).unwrap_or(self.tree.root());
                self.append_child(container, child);
            }
        } else if child_is_formatting {
            let paragraph = self.new_paragraph(None);
            self.append_structural(parent, paragraph);
            self.attach_formatting(paragraph, paragraph, child);
        } else {
            self.append_structural(parent, child);
        }
    }

    /// Attach `child` in `sibling`'s container, just before `sibling`.
    ///
    /// Inline markup gets its own implicit paragraph there. Falls back to
    /// [`append_child`](Self::append_child) on the sibling's parent when the
    /// sibling is not a container's child.
    pub fn insert_before(&mut self, sibling: NodeId, child: NodeId) {
        let Some((parent, index)) = self.container_slot(sibling) else {
            let parent = self.tree.parent(sibling).unwrap_or(self.tree.root());
            self.append_child(parent, child);
            return;
        };
        let Some(child_node) = self.tree.get(child) else {
            return;
        };

        if child_node.is_formatting() {
            let paragraph = self.new_paragraph(None);
            self.insert_structural(parent, index, paragraph);
            self.attach_formatting(paragraph, paragraph, child);
        } else {
            self.insert_structural(parent, index, child);
        }
    }

    /// Insert text in `sibling`'s container, just before `sibling`.
    ///
    /// The text joins the preceding paragraph when there is one.
    pub fn insert_text_before(&mut self, sibling: NodeId, text: &str) {
        let Some((parent, index)) = self.container_slot(sibling) else {
            let parent = self.tree.parent(sibling).unwrap_or(self.tree.root());
            self.insert_text(parent, text);
            return;
        };

        if matches!(self.tree.get(parent).map(|n| &n.kind), Some(NodeKind::List { .. })) {
            if text.trim().is_empty() {
                return;
            }
            let item = self.create_element("li", Vec::new());
            self.insert_child_at(parent, index, item);
            self.insert_container_text(item, text);
            return;
        }

        let previous = index
            .checked_sub(1)
            .and_then(|i| self.tree.children(parent).get(i).copied());
        match previous {
            Some(previous) if self.tree.get(previous).is_some_and(Node::is_paragraph) => {
                self.append_leaf_text(previous, text);
            }
            _ => {
                let paragraph = self.new_paragraph(Some(text));
                self.insert_child_at(parent, index, paragraph);
            }
        }
    }

    /// Remove `node` from wherever it is stored, leaving it detached.
    pub fn detach(&mut self, node: NodeId) {
        self.tree.detach(node);
    }

    fn append_to_formatting(&mut self, parent: NodeId, child: NodeId, child_is_formatting: bool) {
        match self.hoist_target(parent) {
            Some(leaf) if child_is_formatting => self.attach_formatting(leaf, parent, child),
            Some(leaf) => {
                debug!("block node {child} inside inline {parent}; placing after its leaf");
                let container = self.tree.parent(leaf).unwrap_or(self.tree.root());
                self.append_child(container, child);
            }
            None => {
                warn!("no paragraph or heading above inline {parent}; attaching {child} to root");
                let root = self.tree.root();
                self.append_child(root, child);
            }
        }
    }

    /// Nearest paragraph or heading at or above a formatting element.
    fn hoist_target(&self, element: NodeId) -> Option<NodeId> {
        let stored = self
            .tree
            .get(element)
            .and_then(Node::formatting_element)
            .map(|f| f.leaf)
            .filter(|&leaf| self.tree.is_leaf(leaf));
        stored.or_else(|| self.tree.owning_leaf(element))
    }

    /// Store `element` in `leaf`'s formatting list, nested under `parent`.
    fn attach_formatting(&mut self, leaf: NodeId, parent: NodeId, element: NodeId) {
        let Some(container) = self.tree.get_mut(leaf).and_then(Node::text_container_mut) else {
            return;
        };
        container.push_formatting(element);
        let offset = container.len();

        if let Some(node) = self.tree.get_mut(element) {
            node.parent = parent;
            if let Some(formatting) = node.formatting_element_mut() {
                formatting.leaf = leaf;
                formatting.text_start = offset;
                formatting.text_end = offset;
            }
        }
    }

    /// Parent and position of `node` when it is a container's child.
    fn container_slot(&self, node: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.tree.parent(node)?;
        let index = self
            .tree
            .get(parent)?
            .children()?
            .iter()
            .position(|&child| child == node)?;
        Some((parent, index))
    }

    fn append_structural(&mut self, parent: NodeId, child: NodeId) {
        let index = self.tree.children(parent).len();
        self.insert_structural(parent, index, child);
    }

    fn insert_structural(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if matches!(
            self.tree.get(parent).map(|n| &n.kind),
            Some(NodeKind::List { .. })
        ) && !matches!(
            self.tree.get(child).map(|n| &n.kind),
            Some(NodeKind::ListItem { .. })
        ) {
            debug!("wrapping list child {child} in an implicit list item");
            let item = self.create_element("li", Vec::new());
            self.insert_child_at(parent, index, item);
            self.push_child(item, child);
            return;
        }
        self.insert_child_at(parent, index, child);
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.tree.children(parent).len();
        self.insert_child_at(parent, index, child);
    }

    fn insert_child_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        let Some(children) = self.tree.get_mut(parent).and_then(Node::children_mut) else {
            return;
        };
        children.insert(index.min(children.len()), child);
        if let Some(node) = self.tree.get_mut(child) {
            node.parent = parent;
        }
    }

    fn new_paragraph(&mut self, text: Option<&str>) -> NodeId {
        let container = text.map(TextContainer::new);
        self.tree
            .alloc(Node::new("p", NodeKind::implicit_paragraph(container)))
    }

    /// Append to a leaf's text container, creating it if absent. Returns the
    /// new text length.
    fn append_leaf_text(&mut self, leaf: NodeId, text: &str) -> Option<usize> {
        self.tree
            .get_mut(leaf)
            .and_then(Node::text_container_mut)
            .map(|container| container.append_text(text))
    }

    fn insert_formatting_text(&mut self, element: NodeId, text: &str) {
        let Some(leaf) = self.hoist_target(element) else {
            warn!("no paragraph or heading above inline {element}; text goes to root");
            let root = self.tree.root();
            self.insert_text(root, text);
            return;
        };
        let Some(end) = self.append_leaf_text(leaf, text) else {
            return;
        };

        // The span grows with the text, and so does every enclosing span
        // still open at the insertion point
        let before = end - text.len();
        let mut current = element;
        while current != leaf && current.is_some() {
            let Some(node) = self.tree.get_mut(current) else {
                break;
            };
            if let Some(formatting) = node.formatting_element_mut() {
                if current != element && formatting.text_end < before {
                    break;
                }
                formatting.text_end = end;
            }
            current = node.parent;
        }
    }

    fn insert_container_text(&mut self, container: NodeId, text: &str) {
        let last = self.tree.children(container).last().copied();
        match last {
            Some(last) if self.tree.get(last).is_some_and(Node::is_paragraph) => {
                self.append_leaf_text(last, text);
            }
            _ => {
                let paragraph = self.new_paragraph(Some(text));
                self.push_child(container, paragraph);
            }
        }
    }

    fn insert_list_text(&mut self, list: NodeId, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let item = match self.tree.children(list).last().copied() {
            Some(item) => item,
            None => {
                debug!("text directly inside list {list}; adding an implicit list item");
                let item = self.create_element("li", Vec::new());
                self.push_child(list, item);
                item
            }
        };
        self.insert_container_text(item, text);
    }
}
