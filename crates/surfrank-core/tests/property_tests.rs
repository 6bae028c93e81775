//! Property-based tests for surfrank distributions.
//!
//! Invariants that must hold for any corpus:
//! - every page's transition distribution is a valid probability distribution
//! - both estimators return valid distributions covering every page
//! - the iterative solver is deterministic

use proptest::prelude::*;
use surfrank_core::algo::iterative::{iterate_pagerank, IterateConfig};
use surfrank_core::algo::sampling::{sample_pagerank, SampleConfig};
use surfrank_core::algo::transition::transition_model;
use surfrank_core::Corpus;

/// Random small corpora from a boolean adjacency matrix.
fn arb_corpus() -> impl Strategy<Value = Corpus> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), n), n).prop_map(move |adj| {
            let mut corpus = Corpus::new();
            for i in 0..n {
                corpus.add_page(format!("{i}.html"));
            }
            for (i, row) in adj.iter().enumerate() {
                for (j, &linked) in row.iter().enumerate() {
                    if linked && i != j {
                        corpus.add_link(format!("{i}.html"), format!("{j}.html"));
                    }
                }
            }
            corpus
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn transition_valid_for_every_page(
        corpus in arb_corpus(),
        damping in 0.05f64..0.95,
    ) {
        for page in corpus.pages() {
            let dist = transition_model(&corpus, page, damping);
            prop_assert!(dist.is_ok(), "transition from {} failed: {:?}", page, dist.err());

            let dist = dist.unwrap();
            prop_assert_eq!(dist.len(), corpus.page_count());
            prop_assert!(dist.validate().is_ok());
        }
    }

    #[test]
    fn iterative_output_is_valid_and_deterministic(corpus in arb_corpus()) {
        let first = iterate_pagerank(&corpus, IterateConfig::default());
        prop_assert!(first.is_ok(), "solver failed: {:?}", first.err());

        let first = first.unwrap();
        prop_assert_eq!(first.len(), corpus.page_count());
        prop_assert!(first.validate().is_ok());

        let second = iterate_pagerank(&corpus, IterateConfig::default()).unwrap();
        prop_assert_eq!(first, second, "solver is not deterministic");
    }

    #[test]
    fn sampled_output_is_valid(
        corpus in arb_corpus(),
        seed in any::<u64>(),
    ) {
        let config = SampleConfig {
            samples: 300,
            seed,
            ..Default::default()
        };

        let ranks = sample_pagerank(&corpus, config);
        prop_assert!(ranks.is_ok(), "sampler failed: {:?}", ranks.err());

        let ranks = ranks.unwrap();
        prop_assert_eq!(ranks.len(), corpus.page_count());
        prop_assert!(ranks.validate().is_ok());
    }

    #[test]
    fn ranks_serialize_as_flat_page_map(corpus in arb_corpus()) {
        let ranks = iterate_pagerank(&corpus, IterateConfig::default()).unwrap();

        let json = serde_json::to_value(&ranks).expect("JSON serialization failed");
        let map = json.as_object().expect("should serialize as an object");

        prop_assert_eq!(map.len(), corpus.page_count());
        for page in corpus.pages() {
            prop_assert!(
                map.contains_key(page.as_str()),
                "page {} missing from JSON output",
                page
            );
        }
    }
}
