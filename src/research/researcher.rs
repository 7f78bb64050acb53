//! Registry of named researches.

use std::collections::BTreeMap;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use log::{debug, warn};
use serde_json::Value;

use super::{LinkStatistics, Research, ResearchContext, WordCount, run_research};
use crate::config::ResearchConfig;
use crate::error::ResearchError;
use crate::tree::Tree;

/// Object-safe view of a [`Research`] with its output serialized to JSON.
trait DynResearch: Send + Sync {
    fn run<'a>(&'a self, context: ResearchContext<'a>) -> BoxFuture<'a, Result<Value, ResearchError>>;
}

impl<R> DynResearch for R
where
    R: Research,
{
    fn run<'a>(&'a self, context: ResearchContext<'a>) -> BoxFuture<'a, Result<Value, ResearchError>> {
        async move {
            let output = run_research(self, context, context.tree.root()).await?;
            Ok(serde_json::to_value(output)?)
        }
        .boxed()
    }
}

/// Named researches run over a tree.
///
/// ```
/// use futures::executor::block_on;
/// use parsed_paper::{ResearchConfig, Researcher};
/// use parsed_paper::tree::parse_fragment;
///
/// let tree = parse_fragment("<p>One two three</p>");
/// let researcher = Researcher::with_defaults();
///
/// let count = block_on(researcher.do_research("wordCount", &tree, &ResearchConfig::new())).unwrap();
/// assert_eq!(count, serde_json::json!(3));
/// ```
#[derive(Default)]
pub struct Researcher {
    researches: BTreeMap<String, Box<dyn DynResearch>>,
}

impl Researcher {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `linkStatistics` and `wordCount`.
    pub fn with_defaults() -> Self {
        let mut researcher = Self::new();
        researcher.add_research("linkStatistics", LinkStatistics);
        researcher.add_research("wordCount", WordCount);
        researcher
    }

    /// Register a research under `name`, replacing any previous one.
    pub fn add_research<R>(&mut self, name: impl Into<String>, research: R)
    where
        R: Research + 'static,
    {
        let name = name.into();
        if self.researches.insert(name.clone(), Box::new(research)).is_some() {
            warn!("research '{name}' registered twice; keeping the latest");
        }
    }

    pub fn has_research(&self, name: &str) -> bool {
        self.researches.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn research_names(&self) -> impl Iterator<Item = &str> {
        self.researches.keys().map(String::as_str)
    }

    /// Run one research over the whole tree.
    pub async fn do_research(
        &self,
        name: &str,
        tree: &Tree,
        config: &ResearchConfig,
    ) -> Result<Value, ResearchError> {
        let research = self
            .researches
            .get(name)
            .ok_or_else(|| ResearchError::UnknownResearch(name.to_string()))?;
        debug!("running research '{name}'");
        research.run(ResearchContext::new(tree, config)).await
    }

    /// Run every registered research concurrently.
    ///
    /// Each research succeeds or fails on its own; a failure only affects the
    /// entry of the research that raised it.
    pub async fn do_all(
        &self,
        tree: &Tree,
        config: &ResearchConfig,
    ) -> BTreeMap<String, Result<Value, ResearchError>> {
        let context = ResearchContext::new(tree, config);
        let runs = self.researches.iter().map(|(name, research)| async move {
            let result = research.run(context).await;
            if let Err(err) = &result {
                debug!("research '{name}' failed: {err}");
            }
            (name.clone(), result)
        });
        join_all(runs).await.into_iter().collect()
    }
}
