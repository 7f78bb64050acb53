//! Research: statistics computed over a built tree.
//!
//! A research computes a result for every paragraph and heading
//! ([`Research::calculate_for`]) and combines the results of each container's
//! children ([`Research::merge_children_results`]). The walker in
//! [`run_research`] drives both, skipping irrelevant subtrees.
//!
//! # Example
//!
//! ```
//! use futures::executor::block_on;
//! use parsed_paper::ResearchConfig;
//! use parsed_paper::research::{LinkStatistics, LinkTarget, ResearchContext, run_research};
//! use parsed_paper::tree::parse_fragment;
//!
//! let tree = parse_fragment(r#"<p><a href="https://yoast.com/about">About</a></p>"#);
//! let config = ResearchConfig::new().with_site_domain("yoast.com");
//! let context = ResearchContext::new(&tree, &config);
//!
//! let links = block_on(run_research(&LinkStatistics, context, tree.root())).unwrap();
//! assert_eq!(links[0].target, LinkTarget::Internal);
//! ```

mod link_statistics;
mod researcher;
mod walker;
mod word_count;

use futures::future::BoxFuture;
use serde::Serialize;

use crate::config::ResearchConfig;
use crate::error::ResearchError;
use crate::tree::{NodeId, Tree};

pub use link_statistics::{LinkRecord, LinkStatistics, LinkTarget, classify_target, is_no_follow};
pub use researcher::Researcher;
pub use walker::run_research;
pub use word_count::WordCount;

/// Everything a research may read during a run.
#[derive(Debug, Clone, Copy)]
pub struct ResearchContext<'a> {
    pub tree: &'a Tree,
    pub config: &'a ResearchConfig,
}

impl<'a> ResearchContext<'a> {
    pub fn new(tree: &'a Tree, config: &'a ResearchConfig) -> Self {
        Self { tree, config }
    }
}

/// A statistic computed per leaf and merged bottom-up.
///
/// Implementations must not depend on the order in which leaves are
/// calculated. The walker always hands children's results to
/// [`merge_children_results`](Research::merge_children_results) in document
/// order, whatever order they completed in.
pub trait Research: Send + Sync {
    type Output: Serialize + Send;

    /// Compute the result for one paragraph or heading.
    fn calculate_for<'a>(
        &'a self,
        leaf: NodeId,
        context: ResearchContext<'a>,
    ) -> BoxFuture<'a, Result<Self::Output, ResearchError>>;

    /// Combine the results of a container's children, given in document order.
    fn merge_children_results(
        &self,
        results: Vec<Self::Output>,
    ) -> Result<Self::Output, ResearchError>;
}
