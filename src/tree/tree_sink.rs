//! html5ever TreeSink implementation driving the [`TreeAdapter`].
//!
//! html5ever performs tokenization and tag balancing; every element and text
//! event it emits goes through the same adapter rules as a plain token
//! stream.

use std::cell::RefCell;
use std::collections::HashMap;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};
use log::debug;

use super::adapter::TreeAdapter;
use super::arena::Tree;
use super::node::{Attribute, NodeId};

/// Handle used by TreeSink to reference nodes.
///
/// Comments, doctypes and processing instructions get [`NodeId::NONE`] and are
/// dropped when appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub NodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(NodeId::NONE)
    }
}

/// TreeSink implementation that builds a [`Tree`].
///
/// Uses interior mutability (RefCell) because html5ever's TreeSink trait
/// requires methods to take `&self` but we need to mutate the tree.
pub struct AdapterSink {
    adapter: RefCell<TreeAdapter>,
    /// Qualified names of created elements. Boxed so references stay valid
    /// while the map grows.
    names: RefCell<HashMap<NodeId, Box<QualName>>>,
}

impl Default for AdapterSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AdapterSink {
    pub fn new() -> Self {
        Self {
            adapter: RefCell::new(TreeAdapter::new()),
            names: RefCell::new(HashMap::new()),
        }
    }

    /// Consume the sink and return the tree.
    pub fn into_tree(self) -> Tree {
        self.adapter.into_inner().into_tree()
    }

    fn append_node_or_text(&self, parent: NodeId, child: NodeOrText<NodeHandle>) {
        let mut adapter = self.adapter.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) if node.0.is_some() => {
                adapter.append_child(parent, node.0);
            }
            NodeOrText::AppendNode(_) => {}
            NodeOrText::AppendText(text) => {
                adapter.insert_text(parent, &text);
            }
        }
    }
}

impl TreeSink for AdapterSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: std::borrow::Cow<'static, str>) {
        // Lenient like browsers; the tree builder recovers on its own
        debug!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.adapter.borrow().root())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let names = self.names.borrow();
        match names.get(&target.0) {
            Some(name) => {
                let ptr: *const QualName = &**name;
                // SAFETY: names are boxed and never removed, so the QualName
                // lives at a stable address for as long as self.
                unsafe { &*ptr }
            }
            None => &EMPTY,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let converted_attrs: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute::new(a.name.local.as_ref(), a.value.to_string()))
            .collect();

        let id = self
            .adapter
            .borrow_mut()
            .create_element(name.local.as_ref(), converted_attrs);
        self.names.borrow_mut().insert(id, Box::new(name));
        NodeHandle(id)
    }

    fn create_comment(&self, _text: StrTendril) -> Self::Handle {
        NodeHandle::default()
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        NodeHandle::default()
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.append_node_or_text(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        // Foster parenting: before the table when it is attached, otherwise
        // under the element below it on the stack
        let has_parent = self.adapter.borrow().tree().parent(element.0).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are irrelevant to research; keep them in place
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {
        // Quirks only affect layout
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        debug!("fostering content before {}", sibling.0);
        let mut adapter = self.adapter.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) if node.0.is_some() => {
                adapter.insert_before(sibling.0, node.0);
            }
            NodeOrText::AppendNode(_) => {}
            NodeOrText::AppendText(text) => {
                adapter.insert_text_before(sibling.0, &text);
            }
        }
    }

    fn add_attrs_if_missing(&self, _target: &Self::Handle, _attrs: Vec<Html5Attribute>) {
        // Only issued for html/body re-opening, whose attributes research
        // never reads
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.adapter.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        // Collect children first to avoid borrow issues
        let children: Vec<NodeId> = {
            let adapter = self.adapter.borrow();
            let tree = adapter.tree();
            let mut children = tree.children(node.0).to_vec();
            if let Some(leaf) = tree
                .get(node.0)
                .and_then(|n| n.formatting_element())
                .map(|f| f.leaf)
            {
                children.extend(
                    tree.formatting(leaf)
                        .iter()
                        .filter(|&&f| tree.parent(f) == Some(node.0)),
                );
            }
            children
        };

        let mut adapter = self.adapter.borrow_mut();
        for child in children {
            adapter.detach(child);
            adapter.append_child(new_parent.0, child);
        }
    }
}

/// Parse an HTML document into a tree.
///
/// The `html`, `head` and `body` elements html5ever synthesizes become
/// structured nodes.
pub fn parse_html(html: &str) -> Tree {
    let sink = AdapterSink::new();
    parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_tree()
}

/// Parse a fragment of HTML (not a full document).
pub fn parse_fragment(html: &str) -> Tree {
    // Wrap in a minimal document structure for parsing
    let wrapped = format!("<!DOCTYPE html><html><head></head><body>{html}</body></html>");
    parse_html(&wrapped)
}
