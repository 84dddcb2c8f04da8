use super::*;
use crate::*;
use algograph::graph::VertexId;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::HashMap;
use tracing::debug;

/// PageRank as the visit frequencies of a random surfer.
pub struct SampledPageRank<'a> {
    corpus: &'a Corpus,
    samples: usize,
    seed: Option<u64>,
    transitions: HashMap<VertexId, Distribution, ahash::RandomState>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
    /// Fixes the walk; a fresh one is taken on every run otherwise.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            samples: 10_000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub page_rank: RankVector,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
    pub samples: usize,
}

impl<'a> SampledPageRank<'a> {
    pub fn new(corpus: &'a Corpus, config: &Config) -> Result<Self> {
        if config.samples < 1 {
            return Err(Error::InvalidSampleCount(config.samples));
        }
        let model = TransitionModel::new(corpus, config.damping)?;
        let mut transitions = HashMap::with_hasher(ahash::RandomState::new());
        for u in corpus.pages() {
            transitions.insert(u, model.distribution(u)?);
        }
        Ok(Self {
            corpus,
            samples: config.samples,
            seed: config.seed,
            transitions,
        })
    }

    /// Walks `samples` pages, drawing the first one from `start`.
    ///
    /// Fails with `DegenerateTransition` only when the walk has to leave a page
    /// whose transition carries no mass (a dangling page under damping 0).
    pub fn walk<R: Rng>(&self, start: &RankVector, rng: &mut R) -> Result<Outcome> {
        let start_dist = Distribution::from_ranks(start);
        let mut cur = match start_dist.draw(rng) {
            Some(v) if self.corpus.contains(v) => v,
            Some(_) | None => return Err(Error::InvalidStart(start_dist.total())),
        };
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.corpus.pages().map(|v| (v, 0usize)).collect();
        *visits.entry(cur).or_default() += 1;

        for _ in 1..self.samples {
            let Some(next) = self.transitions.get(&cur).and_then(|d| d.draw(rng)) else {
                return Err(Error::DegenerateTransition(self.corpus.describe(cur)));
            };
            *visits.entry(next).or_default() += 1;
            cur = next;
        }

        let n = self.samples as f64;
        let page_rank = visits.iter().map(|(v, c)| (*v, *c as f64 / n)).collect();
        debug!(samples = self.samples, "page rank sampled");
        Ok(Outcome {
            page_rank,
            visits,
            samples: self.samples,
        })
    }
}

impl PageRank for SampledPageRank<'_> {
    type Outcome = self::Outcome;

    fn calc(&self, start: &RankVector) -> Result<Self::Outcome> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        self.walk(start, &mut rng)
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
            let c = self.outcome.visits.get(&v).copied().unwrap_or(0);
            writeln!(f, "{name}: {p:?}, {c}/{}", self.outcome.samples)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{corpus, rank_sum, RandomCorpus};
    use quickcheck_macros::quickcheck;

    fn run(c: &Corpus, samples: usize, seed: u64) -> Outcome {
        let cfg = Config {
            samples,
            seed: Some(seed),
            ..Config::default()
        };
        let pr = SampledPageRank::new(c, &cfg).unwrap();
        pr.calc(&uniform(c.pages())).unwrap()
    }

    #[test]
    fn single_page() {
        let c = corpus(&[("a.html", &[])]);
        let res = run(&c, 100, 3407);
        let ranks = c.named(&res.page_rank);
        assert_eq!(ranks.len(), 1);
        assert_eq!(ranks["a.html"], 1.0);
    }

    #[test]
    fn one_sample() {
        let c = corpus(&[("a", &["b"]), ("b", &[])]);
        let res = run(&c, 1, 3407);
        assert_eq!(res.visits.values().sum::<usize>(), 1);
        assert_eq!(res.page_rank.values().filter(|r| **r == 1.0).count(), 1);
    }

    #[test]
    fn seeded_walks_repeat() {
        let c = corpus(&[
            ("1.html", &["2.html"]),
            ("2.html", &["1.html", "3.html"]),
            ("3.html", &["2.html"]),
        ]);
        let a = run(&c, 1000, 7);
        let b = run(&c, 1000, 7);
        assert_eq!(a.visits, b.visits);
    }

    #[test]
    fn agrees_with_iteration() {
        let c = corpus(&[
            ("1.html", &["2.html"]),
            ("2.html", &["1.html", "3.html"]),
            ("3.html", &["2.html", "4.html"]),
            ("4.html", &[]),
        ]);
        let sampled = run(&c, 100_000, 3407);
        let iterated = iterated::IteratedPageRank::new(&c, &iterated::Config::default())
            .unwrap()
            .calc(&uniform(c.pages()))
            .unwrap();
        for v in c.pages() {
            let s = sampled.page_rank[&v];
            let i = iterated.page_rank[&v];
            assert!(
                (s - i).abs() < 0.02,
                "sampled:\n{:?}iterated:\n{:?}",
                sampled.debug(&c),
                iterated.debug(&c)
            );
        }
    }

    #[test]
    fn dangling_page_is_left_uniformly() {
        let c = corpus(&[("A", &[]), ("B", &["A"])]);
        let res = run(&c, 50_000, 3407);
        let ranks = c.named(&res.page_rank);
        assert!((ranks["A"] - 0.649).abs() < 0.02, "{ranks:?}");
        assert!((ranks["B"] - 0.351).abs() < 0.02, "{ranks:?}");
    }

    #[test]
    fn rejects_bad_input() {
        let c = corpus(&[("a", &["b"]), ("b", &[])]);
        let cfg = Config {
            samples: 0,
            ..Config::default()
        };
        assert!(matches!(
            SampledPageRank::new(&c, &cfg),
            Err(Error::InvalidSampleCount(0))
        ));

        let empty = Corpus::from_links(Vec::<(&str, Vec<&str>)>::new()).unwrap();
        assert!(matches!(
            SampledPageRank::new(&empty, &Config::default()),
            Err(Error::EmptyGraph)
        ));

        let cfg = Config {
            damping: 0.0,
            ..Config::default()
        };
        let pr = SampledPageRank::new(&c, &cfg).unwrap();
        let from_b: RankVector = [(c.vertex("b").unwrap(), 1.0)].into_iter().collect();
        assert!(matches!(
            pr.calc(&from_b),
            Err(Error::DegenerateTransition(p)) if p == "b"
        ));

        let pr = SampledPageRank::new(&c, &Config::default()).unwrap();
        let nowhere = RankVector::default();
        assert!(matches!(pr.calc(&nowhere), Err(Error::InvalidStart(_))));
    }

    #[test]
    fn stuck_page_is_fine_until_left() {
        let c = corpus(&[("a", &["b"]), ("b", &[])]);
        let cfg = Config {
            damping: 0.0,
            samples: 1,
            seed: Some(3407),
        };
        let pr = SampledPageRank::new(&c, &cfg).unwrap();
        let from_b: RankVector = [(c.vertex("b").unwrap(), 1.0)].into_iter().collect();
        let res = pr.calc(&from_b).unwrap();
        assert_eq!(c.named(&res.page_rank)["b"], 1.0);
    }

    #[quickcheck]
    fn visits_partition_samples(c: RandomCorpus) {
        let c = &c.corpus;
        let res = run(c, 500, 3407);
        assert_eq!(res.visits.len(), c.len());
        assert_eq!(res.visits.values().sum::<usize>(), 500);
        assert!(res.page_rank.values().all(|r| (0.0..=1.0).contains(r)));
        assert!((rank_sum(&res.page_rank) - 1.0).abs() < 1e-9);
    }
}
