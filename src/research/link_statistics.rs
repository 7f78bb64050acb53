//! Link statistics.
//!
//! Collects the links in a subtree and classifies each one:
//!
//! - **internal**: points to a page on the configured site domain;
//! - **external**: points to a page on another domain;
//! - **other**: not an http(s) page, e.g. `ftp://`, `mailto:` or a fragment.
//!
//! Each link is also marked as no-follow when its `rel` attribute says
//! search engines should not follow it.

use futures::FutureExt;
use futures::future::{BoxFuture, ready};
use serde::Serialize;
use url::Url;

use super::{Research, ResearchContext};
use crate::error::ResearchError;
use crate::tree::NodeId;

/// Where a link points, relative to the analysed site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkTarget {
    Internal,
    External,
    Other,
}

/// One classified link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// The `a` formatting element.
    pub link: NodeId,
    pub href: Option<String>,
    pub no_follow: bool,
    pub target: LinkTarget,
}

/// Research collecting [`LinkRecord`]s in document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkStatistics;

impl Research for LinkStatistics {
    type Output = Vec<LinkRecord>;

    fn calculate_for<'a>(
        &'a self,
        leaf: NodeId,
        context: ResearchContext<'a>,
    ) -> BoxFuture<'a, Result<Self::Output, ResearchError>> {
        let tree = context.tree;
        let domain = context.config.site_domain();

        let records: Vec<LinkRecord> = tree
            .formatting(leaf)
            .iter()
            .filter(|&&element| tree.tag(element) == Some("a"))
            .map(|&element| {
                let href = tree.attribute(element, "href");
                LinkRecord {
                    link: element,
                    href: href.map(str::to_string),
                    no_follow: is_no_follow(tree.attribute(element, "rel")),
                    target: classify_target(href, domain),
                }
            })
            .collect();

        ready(Ok(records)).boxed()
    }

    fn merge_children_results(
        &self,
        results: Vec<Self::Output>,
    ) -> Result<Self::Output, ResearchError> {
        Ok(results.into_iter().flatten().collect())
    }
}

/// Whether a `rel` attribute value contains the `nofollow` token.
pub fn is_no_follow(rel: Option<&str>) -> bool {
    rel.is_some_and(|rel| rel.split_whitespace().any(|token| token == "nofollow"))
}

/// Classify a link target against the site domain.
///
/// Relative and fragment-carrying URLs are "other": neither identifies a
/// distinct page by host.
pub fn classify_target(href: Option<&str>, domain: Option<&str>) -> LinkTarget {
    let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
        return LinkTarget::Other;
    };
    let Ok(url) = Url::parse(href) else {
        return LinkTarget::Other;
    };

    if !matches!(url.scheme(), "http" | "https") || url.fragment().is_some() {
        return LinkTarget::Other;
    }

    match (url.host_str(), domain) {
        (Some(host), Some(domain)) if host.eq_ignore_ascii_case(domain) => LinkTarget::Internal,
        _ => LinkTarget::External,
    }
}
