use crate::PageId;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// A directed link graph over pages.
///
/// Uses petgraph's directed graph internally for efficient traversal and
/// keeps a side index for O(1) page lookup. Every link target is itself a
/// page of the corpus: [`Corpus::add_link`] creates missing endpoints on
/// demand, so a link can never dangle. A page with no outbound links is a
/// sink.
///
/// The corpus is treated as read-only for the lifetime of a ranking
/// computation; construction happens up front (see [`crate::formats`]).
///
/// # Example
///
/// ```rust
/// use surfrank_core::Corpus;
///
/// let mut corpus = Corpus::new();
/// corpus.add_link("1.html", "2.html");
/// corpus.add_link("2.html", "1.html");
/// corpus.add_page("3.html"); // a sink
///
/// assert_eq!(corpus.page_count(), 3);
/// assert_eq!(corpus.link_count(), 2);
/// assert_eq!(corpus.sink_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Corpus {
    /// The underlying directed graph; node weights are the page IDs.
    graph: DiGraph<PageId, ()>,

    /// Map from page ID to node index.
    page_index: HashMap<PageId, NodeIndex>,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::new()
    }
}

impl Corpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            page_index: HashMap::new(),
        }
    }

    /// Create a corpus with estimated capacity.
    pub fn with_capacity(pages: usize, links: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(pages, links),
            page_index: HashMap::with_capacity(pages),
        }
    }

    /// Register a page, with no links. Idempotent.
    pub fn add_page(&mut self, page: impl Into<PageId>) {
        self.get_or_create_page(page.into());
    }

    /// Add a link between two pages, creating either page if missing.
    ///
    /// Duplicate links are collapsed: adding the same link twice leaves a
    /// single edge.
    pub fn add_link(&mut self, from: impl Into<PageId>, to: impl Into<PageId>) {
        let from_idx = self.get_or_create_page(from.into());
        let to_idx = self.get_or_create_page(to.into());

        if self.graph.find_edge(from_idx, to_idx).is_none() {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Get or create a page node.
    fn get_or_create_page(&mut self, id: PageId) -> NodeIndex {
        if let Some(&idx) = self.page_index.get(&id) {
            return idx;
        }

        let idx = self.graph.add_node(id.clone());
        self.page_index.insert(id, idx);
        idx
    }

    /// Check whether a page is in the corpus.
    pub fn contains(&self, page: &PageId) -> bool {
        self.page_index.contains_key(page)
    }

    /// Get the node index for a page.
    pub fn node_index(&self, page: &PageId) -> Option<NodeIndex> {
        self.page_index.get(page).copied()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the corpus has no pages.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate over all pages, in insertion order.
    pub fn pages(&self) -> impl Iterator<Item = &PageId> {
        self.graph.node_weights()
    }

    /// Pages linked from a page (its outbound links). O(d).
    pub fn links_from(&self, page: &PageId) -> Vec<&PageId> {
        match self.page_index.get(page) {
            Some(&idx) => self.graph.neighbors(idx).map(|n| &self.graph[n]).collect(),
            None => vec![],
        }
    }

    /// Out-degree of a page. O(d).
    pub fn out_degree(&self, page: &PageId) -> usize {
        match self.page_index.get(page) {
            Some(&idx) => self.graph.neighbors(idx).count(),
            None => 0,
        }
    }

    /// Number of sink pages (pages with no outbound links).
    pub fn sink_count(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors(idx).next().is_none())
            .count()
    }

    /// Get the underlying petgraph for advanced operations.
    pub fn as_graph(&self) -> &DiGraph<PageId, ()> {
        &self.graph
    }
}

/// Statistics about a corpus.
#[derive(Debug, Clone, Serialize)]
pub struct CorpusStats {
    /// Number of pages.
    pub page_count: usize,
    /// Number of links.
    pub link_count: usize,
    /// Number of sink pages.
    pub sink_count: usize,
    /// Average out-degree (links per page).
    pub avg_out_degree: f64,
}

impl Corpus {
    /// Compute statistics about the corpus.
    pub fn stats(&self) -> CorpusStats {
        let page_count = self.page_count();
        let link_count = self.link_count();

        let avg_out_degree = if page_count > 0 {
            link_count as f64 / page_count as f64
        } else {
            0.0
        };

        CorpusStats {
            page_count,
            link_count,
            sink_count: self.sink_count(),
            avg_out_degree,
        }
    }
}
