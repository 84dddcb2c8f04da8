//! Ranks the pages of a directory of HTML files, once by sampling and once
//! by iteration.

use anyhow::{Context, Result};
use clap::Parser;
use link_rank::{
    iterate_page_rank,
    page_rank::{iterated, sampled},
    report, sample_page_rank, Corpus,
};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "link-rank")]
#[command(author, version, about = "PageRank of a corpus of hyperlinked HTML pages")]
struct Cli {
    /// Directory holding the .html pages
    corpus: PathBuf,

    /// Probability of following a link rather than jumping to a random page
    #[arg(long, env = "LINK_RANK_DAMPING", default_value_t = 0.85)]
    damping: f64,

    /// Length of the random walk
    #[arg(long, env = "LINK_RANK_SAMPLES", default_value_t = 10_000)]
    samples: usize,

    /// Seed of the random walk
    #[arg(long, env = "LINK_RANK_SEED")]
    seed: Option<u64>,

    /// Largest change of any page at which iteration stops
    #[arg(long, env = "LINK_RANK_THRESHOLD", default_value_t = 0.001)]
    threshold: f64,

    /// Give up iterating after this many rounds
    #[arg(long, env = "LINK_RANK_MAX_ITERATIONS", default_value_t = 10_000)]
    max_iterations: usize,

    /// Decimals printed per rank
    #[arg(long, default_value_t = report::DEFAULT_PRECISION)]
    precision: usize,
}

/// `RUST_LOG` directives, falling back to WARN when none are given.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(directives.as_deref()))
        .init();

    let cli = Cli::parse();

    let corpus = Corpus::crawl(&cli.corpus)
        .with_context(|| format!("failed to crawl {}", cli.corpus.display()))?;

    let cfg = sampled::Config {
        damping: cli.damping,
        samples: cli.samples,
        seed: cli.seed,
    };
    let ranks = sample_page_rank(&corpus, &cfg).context("sampling failed")?;
    print!(
        "{}",
        report::render(
            &format!("PageRank Results from Sampling (n = {})", cli.samples),
            &ranks,
            cli.precision,
        )
    );

    let cfg = iterated::Config {
        damping: cli.damping,
        threshold: cli.threshold,
        max_iterations: cli.max_iterations,
    };
    let ranks = iterate_page_rank(&corpus, &cfg).context("iteration failed")?;
    print!(
        "{}",
        report::render("PageRank Results from Iteration", &ranks, cli.precision)
    );
    Ok(())
}
