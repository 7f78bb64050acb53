//! # parsed-paper
//!
//! Builds a typed document tree from parsed HTML and runs research passes
//! (link classification, word counts) over it.
//!
//! ## Features
//!
//! - Closed set of node variants: structured containers, irrelevant blocks,
//!   headings, paragraphs, lists and list items
//! - Inline markup flattened into the text container of its paragraph or
//!   heading, keeping the semantic nesting
//! - Feed it an html5ever parse or any balanced token stream
//! - Research protocol with order-preserving, fail-fast merging
//!
//! ## Quick Start
//!
//! ```
//! use futures::executor::block_on;
//! use parsed_paper::{ResearchConfig, Researcher, parse_html};
//!
//! let tree = parse_html(r#"<p>Read <a href="https://yoast.com/seo">this</a>.</p>"#);
//! let config = ResearchConfig::new().with_site_domain("yoast.com");
//!
//! let results = block_on(Researcher::with_defaults().do_all(&tree, &config));
//! let links = results["linkStatistics"].as_ref().unwrap();
//! assert_eq!(links[0]["target"], "internal");
//! ```
//!
//! ## Building Trees by Hand
//!
//! ```
//! use parsed_paper::tree::TreeAdapter;
//!
//! let mut adapter = TreeAdapter::new();
//! let section = adapter.create_element("section", Vec::new());
//! let strong = adapter.create_element("strong", Vec::new());
//! adapter.append_child(adapter.root(), section);
//! adapter.append_child(section, strong);
//! adapter.insert_text(strong, "bold");
//!
//! let tree = adapter.into_tree();
//! let paragraph = tree.children(section)[0];
//! assert_eq!(tree.formatting(paragraph), &[strong]);
//! ```

pub mod config;
pub mod error;
pub mod research;
pub mod tree;

pub use config::ResearchConfig;
pub use error::{Error, ResearchError, Result};
pub use research::{Research, Researcher};
pub use tree::{Tree, build_tree, parse_fragment, parse_html};
