//! Document tree: node model, text containers and the builder.
//!
//! # Example
//!
//! ```
//! use parsed_paper::tree::{Token, build_tree};
//!
//! let tree = build_tree([
//!     Token::open("div"),
//!     Token::text("Hello"),
//!     Token::close("div"),
//! ]);
//!
//! let div = tree.find_by_tag("div").unwrap();
//! let paragraph = tree.children(div)[0];
//! assert_eq!(tree.text(paragraph), Some("Hello"));
//! ```

mod adapter;
mod arena;
mod node;
mod text;
mod tokens;
mod tree_sink;

pub use adapter::TreeAdapter;
pub use arena::Tree;
pub use node::{Attribute, FormattingElement, Node, NodeId, NodeKind, normalize_tag};
pub use text::TextContainer;
pub use tokens::{Token, TreeBuilder, build_tree};
pub use tree_sink::{AdapterSink, NodeHandle, parse_fragment, parse_html};
