//! Markov-chain sampling estimator.
//!
//! Estimates `PageRank` as the visit frequency of a long random-surfer walk:
//! each of `samples` visits credits the visited page `1/samples`, so the
//! accumulated credits form a probability distribution.
//!
//! The walk is inherently sequential (each step depends on the previous
//! page), but independent chains can run in parallel and be merged; see
//! [`sample_pagerank_parallel`].

use crate::algo::transition::{check_damping, transition_model};
use crate::{Corpus, Distribution, Error, PageId, Result};
use rand::prelude::*;
use rand_xorshift::XorShiftRng;
use rayon::prelude::*;

/// Configuration for the sampling estimator.
#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Typically 0.85.
    pub damping: f64,
    /// Total number of samples to draw. Must be at least 1.
    pub samples: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: 42,
        }
    }
}

/// Estimate `PageRank` by sampling, seeding a generator from the config.
///
/// Same seed, same corpus: identical output. Different seeds produce
/// different but statistically convergent estimates as `samples` grows.
pub fn sample_pagerank(corpus: &Corpus, config: SampleConfig) -> Result<Distribution> {
    let mut rng = XorShiftRng::seed_from_u64(config.seed);
    sample_pagerank_with_rng(corpus, config, &mut rng)
}

/// Estimate `PageRank` by sampling with a caller-supplied generator.
///
/// The first sampled page is chosen uniformly at random over all pages and
/// credited `1/samples`. Each subsequent step computes the current page's
/// transition distribution and picks the next page in two stages:
///
/// 1. with probability `damping`, a draw weighted by that distribution;
/// 2. otherwise, a uniform draw over *all* corpus pages, irrespective of the
///    transition weights.
///
/// The two-stage structure mirrors "pick a surfer action, then pick a
/// target" and is not equivalent to a single draw from the transition
/// distribution. Every drawn page is credited `1/samples` and becomes the
/// current page.
///
/// The result covers every corpus page and is checked against the
/// probability invariant before it is returned.
///
/// # Errors
///
/// - [`Error::EmptyCorpus`] if the corpus has no pages.
/// - [`Error::DampingOutOfRange`] if `damping` is not in (0, 1).
/// - [`Error::ZeroSamples`] if `config.samples` is 0.
pub fn sample_pagerank_with_rng<R: Rng>(
    corpus: &Corpus,
    config: SampleConfig,
    rng: &mut R,
) -> Result<Distribution> {
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    check_damping(config.damping)?;
    if config.samples == 0 {
        return Err(Error::ZeroSamples);
    }

    let pages: Vec<PageId> = corpus.pages().cloned().collect();
    let share = 1.0 / config.samples as f64;

    let mut credits = Distribution::zeroed(pages.iter());
    let mut current = pages[rng.random_range(0..pages.len())].clone();
    credits.credit(&current, share);

    for _ in 1..config.samples {
        let model = transition_model(corpus, &current, config.damping)?;

        // Two-stage surfer action: follow a link, or jump anywhere.
        current = if rng.random::<f64>() < config.damping {
            weighted_choice(&model, rng)
        } else {
            pages[rng.random_range(0..pages.len())].clone()
        };
        credits.credit(&current, share);
    }

    credits.validate()?;
    Ok(credits)
}

/// Estimate `PageRank` across independent parallel sample chains.
///
/// Splits `config.samples` over `chains` walks, each with its own generator
/// stream (`seed + chain index`), then merges by averaging the chains'
/// per-page credit. Each chain is a valid distribution, so the average is
/// too; the merged result is validated all the same.
///
/// With `chains == 1` this is exactly [`sample_pagerank`].
///
/// # Errors
///
/// As [`sample_pagerank_with_rng`], plus [`Error::ZeroChains`] if `chains`
/// is 0.
pub fn sample_pagerank_parallel(
    corpus: &Corpus,
    config: SampleConfig,
    chains: usize,
) -> Result<Distribution> {
    if corpus.is_empty() {
        return Err(Error::EmptyCorpus);
    }
    check_damping(config.damping)?;
    if config.samples == 0 {
        return Err(Error::ZeroSamples);
    }
    if chains == 0 {
        return Err(Error::ZeroChains);
    }

    let per_chain = (config.samples / chains).max(1);
    let results: Vec<Result<Distribution>> = (0..chains)
        .into_par_iter()
        .map(|chain| {
            let mut rng = XorShiftRng::seed_from_u64(config.seed + chain as u64);
            let chain_config = SampleConfig {
                samples: per_chain,
                ..config
            };
            sample_pagerank_with_rng(corpus, chain_config, &mut rng)
        })
        .collect();

    let weight = 1.0 / chains as f64;
    let mut merged = Distribution::zeroed(corpus.pages());
    for result in results {
        for (page, p) in result?.iter() {
            merged.credit(page, p * weight);
        }
    }

    merged.validate()?;
    Ok(merged)
}

/// Draw a page weighted by a transition distribution.
///
/// Walks the cumulative mass until it passes a uniform draw scaled to the
/// distribution's total; float drift in the total is absorbed by the last
/// page.
fn weighted_choice<R: Rng>(dist: &Distribution, rng: &mut R) -> PageId {
    let target = rng.random::<f64>() * dist.sum();

    let mut cumulative = 0.0;
    let mut last = None;
    for (page, p) in dist.iter() {
        cumulative += p;
        if target < cumulative {
            return page.clone();
        }
        last = Some(page);
    }

    last.cloned()
        .unwrap_or_else(|| panic!("distribution cannot be empty (validated by caller)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::iterative::{iterate_pagerank, IterateConfig};

    fn page(id: &str) -> PageId {
        PageId::from(id)
    }

    /// Four-page corpus with a hub and a loop back into it.
    fn small_corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.add_link("1.html", "2.html");
        corpus.add_link("2.html", "1.html");
        corpus.add_link("2.html", "3.html");
        corpus.add_link("3.html", "2.html");
        corpus.add_link("3.html", "4.html");
        corpus.add_link("4.html", "2.html");
        corpus
    }

    #[test]
    fn test_sample_sums_to_one_and_covers_all_pages() {
        let corpus = small_corpus();
        let config = SampleConfig {
            samples: 2_000,
            ..Default::default()
        };

        let ranks = sample_pagerank(&corpus, config).unwrap();

        assert_eq!(ranks.len(), corpus.page_count());
        assert!(ranks.validate().is_ok());
    }

    #[test]
    fn test_isolated_page_gets_full_rank() {
        let mut corpus = Corpus::new();
        corpus.add_page("only.html");

        let config = SampleConfig {
            samples: 1_000,
            ..Default::default()
        };
        let ranks = sample_pagerank(&corpus, config).unwrap();

        assert!((ranks.get(&page("only.html")).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_seed_reproduces() {
        let corpus = small_corpus();
        let config = SampleConfig {
            samples: 500,
            seed: 99,
            ..Default::default()
        };

        let a = sample_pagerank(&corpus, config).unwrap();
        let b = sample_pagerank(&corpus, config).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_tracks_iterative_result() {
        // Averaged over repeated n = 10000 trials, the sampled estimate
        // sits within a small statistical tolerance of the deterministic
        // solver.
        let corpus = small_corpus();
        let trials: u64 = 5;

        let iterated = iterate_pagerank(&corpus, IterateConfig::default()).unwrap();

        let mut mean = Distribution::zeroed(corpus.pages());
        for trial in 0..trials {
            let config = SampleConfig {
                seed: 42 + trial,
                ..Default::default()
            };
            let sampled = sample_pagerank(&corpus, config).unwrap();
            for (p, estimate) in sampled.iter() {
                mean.credit(p, estimate / trials as f64);
            }
        }

        for (p, rank) in iterated.iter() {
            let estimate = mean.get(p).unwrap();
            assert!(
                (estimate - rank).abs() < 0.02,
                "{p}: sampled {estimate} vs iterated {rank}"
            );
        }
    }

    #[test]
    fn test_parallel_single_chain_matches_sequential() {
        let corpus = small_corpus();
        let config = SampleConfig {
            samples: 500,
            ..Default::default()
        };

        let sequential = sample_pagerank(&corpus, config).unwrap();
        let parallel = sample_pagerank_parallel(&corpus, config, 1).unwrap();

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_parallel_chains_validate() {
        let corpus = small_corpus();
        let config = SampleConfig {
            samples: 2_000,
            ..Default::default()
        };

        let ranks = sample_pagerank_parallel(&corpus, config, 4).unwrap();

        assert_eq!(ranks.len(), corpus.page_count());
        assert!(ranks.validate().is_ok());
    }

    #[test]
    fn test_zero_samples_rejected() {
        let corpus = small_corpus();
        let config = SampleConfig {
            samples: 0,
            ..Default::default()
        };

        assert!(matches!(
            sample_pagerank(&corpus, config),
            Err(Error::ZeroSamples)
        ));
    }

    #[test]
    fn test_zero_chains_rejected() {
        let corpus = small_corpus();

        assert!(matches!(
            sample_pagerank_parallel(&corpus, SampleConfig::default(), 0),
            Err(Error::ZeroChains)
        ));
    }

    #[test]
    fn test_empty_corpus_rejected() {
        let corpus = Corpus::new();

        assert!(matches!(
            sample_pagerank(&corpus, SampleConfig::default()),
            Err(Error::EmptyCorpus)
        ));
    }

    #[test]
    fn test_bad_damping_rejected() {
        let corpus = small_corpus();
        let config = SampleConfig {
            damping: 1.0,
            ..Default::default()
        };

        assert!(matches!(
            sample_pagerank(&corpus, config),
            Err(Error::DampingOutOfRange(_))
        ));
    }
}
