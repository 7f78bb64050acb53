//! Depth-first walker running a research over a tree.
//!
//! The walk is planned up front as a post-order list of steps, so nesting
//! depth only grows heap buffers, never the call stack.

use futures::future::try_join_all;
use log::trace;

use super::{Research, ResearchContext};
use crate::error::ResearchError;
use crate::tree::{NodeId, Tree};

/// One post-order step of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Calculate a paragraph or heading.
    Leaf(NodeId),
    /// Merge the results of the last `count` relevant children of a node.
    Merge(NodeId, usize),
}

/// Run `research` over the subtree rooted at `start`.
///
/// Leaves are passed to `calculate_for`; every other node merges its
/// children's results. Irrelevant subtrees contribute nothing, as if absent.
/// Leaves are computed concurrently, but each merge receives its inputs by
/// position. The first error aborts the whole run.
pub async fn run_research<R>(
    research: &R,
    context: ResearchContext<'_>,
    start: NodeId,
) -> Result<R::Output, ResearchError>
where
    R: Research + ?Sized,
{
    if context.tree.is_irrelevant(start) {
        return research.merge_children_results(Vec::new());
    }

    let steps = plan(context.tree, start);
    let leaves = steps.iter().filter_map(|step| match *step {
        Step::Leaf(leaf) => {
            trace!("calculating leaf {leaf}");
            Some(research.calculate_for(leaf, context))
        }
        Step::Merge(..) => None,
    });
    let mut leaf_results = try_join_all(leaves).await?.into_iter();

    let mut results = Vec::new();
    for step in steps {
        match step {
            Step::Leaf(_) => results.extend(leaf_results.next()),
            Step::Merge(node, count) => {
                let children = results.split_off(results.len().saturating_sub(count));
                trace!("merging {} results at {node}", children.len());
                results.push(research.merge_children_results(children)?);
            }
        }
    }

    match results.pop() {
        Some(result) => Ok(result),
        None => research.merge_children_results(Vec::new()),
    }
}

/// Post-order steps for the relevant part of the subtree at `start`.
fn plan(tree: &Tree, start: NodeId) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut pending = vec![(start, false)];

    while let Some((node, expanded)) = pending.pop() {
        if tree.is_leaf(node) {
            steps.push(Step::Leaf(node));
            continue;
        }

        let children = tree
            .children(node)
            .iter()
            .copied()
            .filter(|&child| !tree.is_irrelevant(child));
        if expanded {
            steps.push(Step::Merge(node, children.count()));
        } else {
            pending.push((node, true));
            pending.extend(children.rev().map(|child| (child, false)));
        }
    }

    steps
}
