//! surfrank - PageRank over HTML corpora from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Crawl a directory and report both estimates
//! surfrank rank corpus/
//!
//! # Sampling estimate only, custom sample count and seed
//! surfrank sample corpus/ --samples 50000 --seed 7
//!
//! # Iterative estimate only
//! surfrank iterate corpus/ --top 10
//!
//! # Corpus statistics
//! surfrank stats corpus/
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::ProgressBar;
use std::path::PathBuf;
use std::time::Instant;
use surfrank_core::algo::iterative::{iterate_pagerank, IterateConfig};
use surfrank_core::algo::sampling::{sample_pagerank, SampleConfig};
use surfrank_core::formats::crawl_directory;
use surfrank_core::{Corpus, Distribution};

#[derive(Parser)]
#[command(name = "surfrank")]
#[command(about = "PageRank over HTML corpora", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a corpus and report both PageRank estimates
    Rank {
        /// Directory of HTML pages
        corpus: PathBuf,

        /// Damping factor
        #[arg(long, default_value = "0.85")]
        damping: f64,

        /// Number of samples for the sampling estimator
        #[arg(long, default_value = "10000")]
        samples: usize,

        /// Random seed for the sampling estimator
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Emit both distributions as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate PageRank by random-surfer sampling
    Sample {
        /// Directory of HTML pages
        corpus: PathBuf,

        /// Damping factor
        #[arg(long, default_value = "0.85")]
        damping: f64,

        /// Number of samples
        #[arg(long, default_value = "10000")]
        samples: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of top pages to show (all pages if omitted)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Solve PageRank by power iteration
    Iterate {
        /// Directory of HTML pages
        corpus: PathBuf,

        /// Damping factor
        #[arg(long, default_value = "0.85")]
        damping: f64,

        /// Convergence threshold on the per-round rank delta
        #[arg(long, default_value = "0.001")]
        tolerance: f64,

        /// Round cap before reporting non-convergence
        #[arg(long, default_value = "100")]
        max_rounds: usize,

        /// Number of top pages to show (all pages if omitted)
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Show statistics about a crawled corpus
    Stats {
        /// Directory of HTML pages
        corpus: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            corpus,
            damping,
            samples,
            seed,
            json,
        } => cmd_rank(&corpus, damping, samples, seed, json),
        Commands::Sample {
            corpus,
            damping,
            samples,
            seed,
            top,
        } => cmd_sample(&corpus, damping, samples, seed, top),
        Commands::Iterate {
            corpus,
            damping,
            tolerance,
            max_rounds,
            top,
        } => cmd_iterate(&corpus, damping, tolerance, max_rounds, top),
        Commands::Stats { corpus } => cmd_stats(&corpus),
    }
}

fn load_corpus(path: &PathBuf) -> Result<Corpus> {
    let start = Instant::now();
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Crawling {}...", path.display()));

    let corpus =
        crawl_directory(path).with_context(|| format!("Failed to crawl {}", path.display()))?;

    pb.finish_with_message(format!(
        "Crawled {} pages in {:.2?}",
        corpus.page_count(),
        start.elapsed()
    ));
    Ok(corpus)
}

fn cmd_rank(path: &PathBuf, damping: f64, samples: usize, seed: u64, json: bool) -> Result<()> {
    let corpus = load_corpus(path)?;

    let sample_config = SampleConfig {
        damping,
        samples,
        seed,
    };
    let iterate_config = IterateConfig {
        damping,
        ..Default::default()
    };

    let sampled = sample_pagerank(&corpus, sample_config)?;
    let iterated = iterate_pagerank(&corpus, iterate_config)?;

    if json {
        let out = serde_json::json!({
            "sampling": sampled,
            "iteration": iterated,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let mut pages: Vec<_> = corpus.pages().collect();
    pages.sort();
    for page in pages {
        let mut links: Vec<&str> = corpus.links_from(page).iter().map(|p| p.as_str()).collect();
        links.sort_unstable();
        println!("{page} links to: {links:?}");
    }

    println!("PageRank Results from Sampling (n = {samples})");
    print_ranks(&sampled);
    println!("PageRank Results from Iteration");
    print_ranks(&iterated);

    Ok(())
}

fn cmd_sample(
    path: &PathBuf,
    damping: f64,
    samples: usize,
    seed: u64,
    top: Option<usize>,
) -> Result<()> {
    let corpus = load_corpus(path)?;

    println!("Sampling PageRank (n = {samples}, damping = {damping}, seed = {seed})...");
    let start = Instant::now();
    let config = SampleConfig {
        damping,
        samples,
        seed,
    };
    let ranks = sample_pagerank(&corpus, config)?;
    println!("Sampled in {:.2?}", start.elapsed());

    print_top(&ranks, top);
    Ok(())
}

fn cmd_iterate(
    path: &PathBuf,
    damping: f64,
    tolerance: f64,
    max_rounds: usize,
    top: Option<usize>,
) -> Result<()> {
    let corpus = load_corpus(path)?;

    println!("Iterating PageRank (damping = {damping}, tolerance = {tolerance})...");
    let start = Instant::now();
    let config = IterateConfig {
        damping,
        tolerance,
        max_rounds,
    };
    let ranks = iterate_pagerank(&corpus, config)?;
    println!("Converged in {:.2?}", start.elapsed());

    print_top(&ranks, top);
    Ok(())
}

fn cmd_stats(path: &PathBuf) -> Result<()> {
    let corpus = load_corpus(path)?;
    let stats = corpus.stats();

    println!("Corpus Statistics");
    println!("=================");
    println!("Pages:          {}", stats.page_count);
    println!("Links:          {}", stats.link_count);
    println!("Sink pages:     {}", stats.sink_count);
    println!("Avg out-degree: {:.2}", stats.avg_out_degree);

    Ok(())
}

/// Print every page's rank, sorted by page.
fn print_ranks(ranks: &Distribution) {
    for (page, rank) in ranks.iter() {
        println!("  {page}: {rank:.4}");
    }
}

/// Print the highest-ranked pages first.
fn print_top(ranks: &Distribution, top: Option<usize>) {
    let mut sorted: Vec<_> = ranks.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

    let limit = top.unwrap_or(sorted.len());
    println!("Top {limit} pages by PageRank:");
    for (i, (page, rank)) in sorted.iter().take(limit).enumerate() {
        println!("{}. {} ({:.4})", i + 1, page, rank);
    }
}
