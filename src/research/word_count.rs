//! Word count over paragraphs and headings.

use futures::FutureExt;
use futures::future::{BoxFuture, ready};

use super::{Research, ResearchContext};
use crate::error::ResearchError;
use crate::tree::NodeId;

/// Counts whitespace-separated words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCount;

impl Research for WordCount {
    type Output = usize;

    fn calculate_for<'a>(
        &'a self,
        leaf: NodeId,
        context: ResearchContext<'a>,
    ) -> BoxFuture<'a, Result<Self::Output, ResearchError>> {
        let words = context
            .tree
            .text(leaf)
            .map_or(0, |text| text.split_whitespace().count());
        ready(Ok(words)).boxed()
    }

    fn merge_children_results(
        &self,
        results: Vec<Self::Output>,
    ) -> Result<Self::Output, ResearchError> {
        Ok(results.into_iter().sum())
    }
}
