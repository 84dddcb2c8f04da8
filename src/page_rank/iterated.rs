use super::*;
use crate::{error::check_damping, *};
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace, warn};

/// PageRank by repeatedly applying the damped recurrence until no page moves
/// by more than `threshold`.
pub struct IteratedPageRank<'a> {
    corpus: &'a Corpus,
    damping: f64,
    threshold: f64,
    max_iterations: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
    dangling: Vec<VertexId>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub threshold: f64,
    pub max_iterations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            threshold: 0.001,
            max_iterations: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub page_rank: RankVector,
    /// Change of every page during the last iteration.
    pub delta: RankVector,
    pub iterations: usize,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> Result<Self> {
        check_damping(config.damping)?;
        corpus.ensure_not_empty()?;
        let mut transitions = BTreeMap::new();
        let mut dangling = vec![];
        for u in corpus.pages() {
            let n = corpus.out_degree(u);
            if n == 0 {
                dangling.push(u);
                continue;
            }
            let unit = 1.0 / (n as f64);
            for v in corpus.links(u) {
                transitions.insert((u, v), unit);
            }
        }
        Ok(Self {
            corpus,
            damping: config.damping,
            threshold: config.threshold,
            max_iterations: config.max_iterations,
            transitions,
            dangling,
        })
    }

    /// One application of the recurrence. `p` is left untouched.
    fn step(&self, p: &RankVector) -> RankVector {
        let n = self.corpus.len() as f64;
        let dangling_mass: f64 = self.dangling.iter().map(|v| p[v]).sum();
        let base = (1.0 - self.damping) / n + self.damping * dangling_mass / n;
        let mut r: RankVector = self.corpus.pages().map(|v| (v, base)).collect();
        for ((u, v), w) in self.transitions.iter() {
            let from = p[u];
            if let Some(to) = r.get_mut(v) {
                *to += self.damping * from * w;
            }
        }
        r
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Outcome = self::Outcome;

    fn calc(&self, start: &RankVector) -> Result<Self::Outcome> {
        let mut p: RankVector = HashMap::with_hasher(ahash::RandomState::new());
        let mut p_sum = 0.0;
        for v in self.corpus.pages() {
            let w = start.get(&v).copied().unwrap_or(0.0);
            p.insert(v, w);
            p_sum += w;
        }
        if (p_sum - 1.0).abs() >= 1e-7 {
            return Err(Error::InvalidStart(p_sum));
        }

        let mut max_delta = f64::INFINITY;
        for iterations in 1..=self.max_iterations {
            let mut r = self.step(&p);
            let delta: RankVector = self
                .corpus
                .pages()
                .map(|v| (v, r[&v] - p[&v]))
                .collect();
            max_delta = norm_inf(&delta);
            trace!(iterations, delta = max_delta, "iterated");

            if max_delta <= self.threshold {
                normalize(&mut r);
                debug!(iterations, delta = max_delta, "page rank converged");
                return Ok(Self::Outcome {
                    page_rank: r,
                    delta,
                    iterations,
                });
            }
            p = r;
        }

        let iterations = self.max_iterations;
        warn!(iterations, delta = max_delta, "page rank did not converge");
        Err(Error::NonConvergence {
            iterations,
            delta: max_delta,
        })
    }
}

impl PageRankOutcome for self::Outcome {
    fn page_rank(&self) -> &RankVector {
        &self.page_rank
    }

    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a {
        OutcomeDebug {
            corpus,
            outcome: self,
        }
    }
}

pub struct OutcomeDebug<'a> {
    corpus: &'a Corpus,
    outcome: &'a self::Outcome,
}

impl std::fmt::Debug for OutcomeDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.corpus.pages() {
            let name = self.corpus.describe(v);
            let p = self.outcome.page_rank.get(&v).copied().unwrap_or(0.0);
            let d = self.outcome.delta.get(&v).copied().unwrap_or(0.0);
            writeln!(f, "{name}: {p:?}, {d:?}")?;
        }
        Ok(())
    }
}
