mod common;
pub use self::common::*;
mod corpus;
pub use self::corpus::Corpus;
mod error;
pub use self::error::{Error, Result};

pub mod page_rank;
pub mod report;

use self::page_rank::{iterated, sampled, PageRank, PageRankOutcome, TransitionModel};
use std::collections::BTreeMap;

/// Probability of moving from `page` to each page of `corpus`, by page name.
///
/// Values are normalized to sum to 1, so a dangling page gives `1 / N` to every
/// page. The raw `damping / N` weights are available from
/// [`Distribution::weight`](page_rank::Distribution::weight).
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Result<BTreeMap<String, f64>> {
    let model = TransitionModel::new(corpus, damping)?;
    let dist = model.distribution(corpus.vertex(page)?)?;
    Ok(dist
        .iter()
        .filter_map(|(v, p)| corpus.name(v).map(|name| (name.to_string(), p)))
        .collect())
}

/// Estimates PageRank from a random walk of `samples` pages.
pub fn sample_page_rank(
    corpus: &Corpus,
    config: &sampled::Config,
) -> Result<BTreeMap<String, f64>> {
    let pr = sampled::SampledPageRank::new(corpus, config)?;
    let res = pr.calc(&uniform(corpus.pages()))?;
    Ok(corpus.named(res.page_rank()))
}

/// Computes PageRank by iterating the damped recurrence to convergence.
pub fn iterate_page_rank(
    corpus: &Corpus,
    config: &iterated::Config,
) -> Result<BTreeMap<String, f64>> {
    let pr = iterated::IteratedPageRank::new(corpus, config)?;
    let res = pr.calc(&uniform(corpus.pages()))?;
    Ok(corpus.named(res.page_rank()))
}

#[cfg(test)]
mod testing;
