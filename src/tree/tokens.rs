//! Token-stream driver for the tree adapter.
//!
//! A tokenizer that already balances its tags can feed [`Token`]s straight into
//! a [`TreeBuilder`]; [`build_tree`] does this for a complete stream.

use log::debug;

use super::adapter::TreeAdapter;
use super::arena::Tree;
use super::node::{Attribute, NodeId, normalize_tag};

/// Elements that never have content or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A single tokenizer event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open {
        name: String,
        attributes: Vec<Attribute>,
    },
    Text(String),
    Close(String),
}

impl Token {
    pub fn open(name: impl Into<String>) -> Self {
        Token::Open {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn open_with(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Token::Open {
            name: name.into(),
            attributes,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Token::Text(content.into())
    }

    pub fn close(name: impl Into<String>) -> Self {
        Token::Close(name.into())
    }
}

/// Incremental tree builder keeping the stack of open elements.
#[derive(Debug)]
pub struct TreeBuilder {
    adapter: TreeAdapter,
    open: Vec<(NodeId, String)>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        let adapter = TreeAdapter::new();
        let root = adapter.root();
        Self {
            adapter,
            open: vec![(root, String::new())],
        }
    }

    /// Node that receives the next token.
    pub fn current(&self) -> NodeId {
        self.open
            .last()
            .map(|(id, _)| *id)
            .unwrap_or_else(|| self.adapter.root())
    }

    /// Consume one token.
    pub fn push(&mut self, token: Token) {
        match token {
            Token::Open { name, attributes } => {
                let tag = normalize_tag(&name);
                let node = self.adapter.create_element(&tag, attributes);
                self.adapter.append_child(self.current(), node);
                if !VOID_TAGS.contains(&tag.as_str()) {
                    self.open.push((node, tag));
                }
            }
            Token::Text(content) => {
                if !content.is_empty() {
                    self.adapter.insert_text(self.current(), &content);
                }
            }
            Token::Close(name) => {
                let tag = normalize_tag(&name);
                // Index 0 is the root, which is never closed
                match self.open.iter().skip(1).rposition(|(_, t)| *t == tag) {
                    Some(pos) => self.open.truncate(pos + 1),
                    None => debug!("ignoring unmatched close tag </{tag}>"),
                }
            }
        }
    }

    pub fn finish(self) -> Tree {
        self.adapter.into_tree()
    }
}

/// Build a tree from a complete token stream.
pub fn build_tree<I>(tokens: I) -> Tree
where
    I: IntoIterator<Item = Token>,
{
    let mut builder = TreeBuilder::new();
    for token in tokens {
        builder.push(token);
    }
    builder.finish()
}
