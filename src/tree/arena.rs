//! Arena-backed document tree.
//!
//! All nodes are stored in a contiguous vector. Ownership is expressed by the
//! `children` lists of containers and the `formatting` lists of leaves; the
//! `parent` links are plain indices used for upward search only.

use super::node::{Node, NodeId, NodeKind};
use super::text::TextContainer;

/// A built document tree.
///
/// Mutated only by [`TreeAdapter`](super::TreeAdapter) during the build; once
/// handed out it is read-only and can be shared across threads.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only a root structured node with an empty tag.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId::NONE,
        };
        tree.root = tree.alloc(Node::new("", NodeKind::for_tag("")));
        tree
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_none() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of allocated nodes, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree only has its root.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Structural children of a node; empty for leaves and formatting elements.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).and_then(Node::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_some)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id).and_then(|n| n.attribute(name))
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_leaf)
    }

    pub fn is_formatting(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_formatting)
    }

    pub fn is_irrelevant(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_irrelevant)
    }

    pub fn text_container(&self, id: NodeId) -> Option<&TextContainer> {
        self.get(id).and_then(Node::text_container)
    }

    /// Formatting elements stored in a leaf, in document order.
    pub fn formatting(&self, id: NodeId) -> &[NodeId] {
        self.text_container(id)
            .map(|c| c.formatting.as_slice())
            .unwrap_or(&[])
    }

    /// Text of a leaf, or the slice of its owning leaf's text covered by a
    /// formatting element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        let node = self.get(id)?;
        if let Some(element) = node.formatting_element() {
            let container = self.text_container(element.leaf)?;
            return container.text.get(element.text_start..element.text_end);
        }
        node.text_container().map(|c| c.text.as_str())
    }

    /// Nearest paragraph or heading on the parent chain, starting above `id`.
    pub fn owning_leaf(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            if self.is_leaf(candidate) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Find the first node matching a predicate, depth-first and
    /// left-to-right. Formatting elements are visited after their leaf.
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        self.descendants(self.root)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find a node by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| node.tag == tag)
    }

    /// `start` and everything reachable from it, in document order.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            if let Some(container) = node.text_container() {
                out.extend_from_slice(&container.formatting);
            }
            // Push children in reverse order for left-to-right traversal
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Remove a node from wherever it is stored. Formatting elements are
    /// dropped from their leaf's formatting list; structural nodes from their
    /// parent's children.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let parent = node.parent;
        let storage = match node.formatting_element() {
            Some(element) => element.leaf,
            None => parent,
        };

        if let Some(owner) = self.get_mut(storage) {
            if let Some(children) = owner.children_mut() {
                children.retain(|&c| c != id);
            } else if let Some(container) = owner.text_container_mut() {
                container.formatting.retain(|&f| f != id);
            }
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            if let Some(element) = node.formatting_element_mut() {
                element.leaf = NodeId::NONE;
            }
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_child(tree: &mut Tree, parent: NodeId, tag: &str) -> NodeId {
        let mut node = Node::new(tag, NodeKind::for_tag(tag));
        node.parent = parent;
        let id = tree.alloc(node);
        tree.get_mut(parent)
            .and_then(Node::children_mut)
            .expect("parent is a container")
            .push(id);
        id
    }

    #[test]
    fn test_new_tree_has_empty_root() {
        let tree = Tree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert_eq!(tree.tag(tree.root()), Some(""));
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn test_children_and_parent() {
        let mut tree = Tree::new();
        let root = tree.root();
        let div = push_child(&mut tree, root, "div");
        let h2 = push_child(&mut tree, div, "h2");

        assert_eq!(tree.children(root), &[div]);
        assert_eq!(tree.children(div), &[h2]);
        assert!(tree.children(h2).is_empty());
        assert_eq!(tree.parent(h2), Some(div));
    }

    #[test]
    fn test_descendants_document_order() {
        let mut tree = Tree::new();
        let root = tree.root();
        let a = push_child(&mut tree, root, "section");
        let a1 = push_child(&mut tree, a, "p");
        let b = push_child(&mut tree, root, "ul");
        let b1 = push_child(&mut tree, b, "li");

        assert_eq!(tree.descendants(root), vec![root, a, a1, b, b1]);
        assert_eq!(tree.find_by_tag("li"), Some(b1));
        assert_eq!(tree.find_by_tag("table"), None);
    }

    #[test]
    fn test_detach_structural() {
        let mut tree = Tree::new();
        let root = tree.root();
        let div = push_child(&mut tree, root, "div");
        tree.detach(div);
        assert!(tree.children(root).is_empty());
        assert!(tree.parent(div).is_none());
    }
}
