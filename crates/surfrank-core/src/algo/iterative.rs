//! Deterministic power-iteration solver.
//!
//! Applies the `PageRank` recurrence over the whole corpus until the ranks
//! stabilize, without sampling. No randomness: two runs on the same corpus
//! and config return identical results.

use crate::algo::transition::check_damping;
use crate::{Corpus, Distribution, Error, Result};
use petgraph::Direction;

/// Configuration for the iterative solver.
#[derive(Debug, Clone, Copy)]
pub struct IterateConfig {
    /// Damping factor. Typically 0.85.
    pub damping: f64,
    /// Convergence threshold on a round's L1 delta (sum of absolute rank
    /// changes).
    pub tolerance: f64,
    /// Maximum rounds before giving up with [`Error::NonConvergence`].
    pub max_rounds: usize,
}

impl Default for IterateConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 1e-3,
            max_rounds: 100,
        }
    }
}

/// Solve `PageRank` by power iteration over the explicit recurrence.
///
/// Ranks start uniform at `1/N`. The incoming-links index and out-degree
/// table are precomputed once; each round then recomputes every page's rank
/// from the previous round's complete snapshot:
///
/// ```text
/// new(p) = (1 - d)/N  +  d·S/N  +  d · Σ over incoming q of old(q)/outdeg(q)
/// ```
///
/// where `S` is the summed rank of sink pages, spread uniformly as if a
/// sink linked to every page (itself included). The Σ term is zero for a
/// page with no inbound links; such a page simply keeps the base terms.
///
/// Rounds apply atomically: all new ranks are computed into a second buffer
/// and swapped in together, so no round ever reads a partially-updated
/// snapshot. Iteration stops once a round's delta is at most
/// `config.tolerance`; the result is validated and returned.
///
/// # Errors
///
/// - [`Error::EmptyCorpus`] if the corpus has no pages.
/// - [`Error::DampingOutOfRange`] if the damping factor is not in (0, 1).
/// - [`Error::NonConvergence`] if `max_rounds` rounds elapse without the
///   delta reaching the threshold.
pub fn iterate_pagerank(corpus: &Corpus, config: IterateConfig) -> Result<Distribution> {
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    check_damping(config.damping)?;

    let graph = corpus.as_graph();
    let n = graph.node_count();
    let n_f64 = n as f64;
    let d = config.damping;
    let teleport = (1.0 - d) / n_f64;

    let out_degrees: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors(idx).count())
        .collect();

    // Incoming-links index, built once and discarded after solving.
    let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); n];
    for idx in graph.node_indices() {
        for pred in graph.neighbors_directed(idx, Direction::Incoming) {
            incoming[idx.index()].push(pred.index());
        }
    }

    let mut ranks = vec![1.0 / n_f64; n];
    let mut new_ranks = vec![0.0; n];

    let mut delta = f64::INFINITY;
    for _round in 0..config.max_rounds {
        // Mass sitting on sinks, spread uniformly this round.
        let sink_mass: f64 = out_degrees
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| ranks[i])
            .sum();
        let sink_share = d * sink_mass / n_f64;

        for p in 0..n {
            let incoming_mass: f64 = incoming[p]
                .iter()
                .map(|&q| ranks[q] / out_degrees[q] as f64)
                .sum();
            new_ranks[p] = teleport + sink_share + d * incoming_mass;
        }

        delta = ranks
            .iter()
            .zip(new_ranks.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();

        std::mem::swap(&mut ranks, &mut new_ranks);

        if delta <= config.tolerance {
            let mut dist = Distribution::zeroed(corpus.pages());
            for idx in graph.node_indices() {
                dist.set(graph[idx].clone(), ranks[idx.index()]);
            }
            dist.validate()?;
            return Ok(dist);
        }
    }

    Err(Error::NonConvergence {
        rounds: config.max_rounds,
        delta,
    })
}
