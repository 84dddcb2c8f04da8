use crate::{error::check_damping, Corpus, Error, RankVector, Result};
use algograph::graph::VertexId;
use rand::Rng;
use std::collections::HashSet;

/// Where a random surfer goes next from one page.
#[derive(Debug, Clone)]
pub struct TransitionModel<'a> {
    corpus: &'a Corpus,
    damping: f64,
}

impl<'a> TransitionModel<'a> {
    pub fn new(corpus: &'a Corpus, damping: f64) -> Result<Self> {
        check_damping(damping)?;
        corpus.ensure_not_empty()?;
        Ok(Self { corpus, damping })
    }

    /// Distribution over every page of the corpus for the step leaving `page`.
    ///
    /// A page with links sends `damping / |links| + (1 - damping) / N` to each
    /// linked page and `(1 - damping) / N` to every other page.
    /// A dangling page sends `damping / N` to every page, itself included, so
    /// its raw weights sum to `damping`; `Distribution::probability` rescales.
    pub fn distribution(&self, page: VertexId) -> Result<Distribution> {
        if !self.corpus.contains(page) {
            return Err(Error::UnknownPage(format!("{page:?}")));
        }
        let n = self.corpus.len() as f64;
        let links: HashSet<VertexId, ahash::RandomState> = self.corpus.links(page).collect();
        let weights: Vec<(VertexId, f64)> = if links.is_empty() {
            let w = self.damping / n;
            self.corpus.pages().map(|v| (v, w)).collect()
        } else {
            let teleport = (1.0 - self.damping) / n;
            let follow = self.damping / (links.len() as f64) + teleport;
            self.corpus
                .pages()
                .map(|v| (v, if links.contains(&v) { follow } else { teleport }))
                .collect()
        };
        Ok(Distribution::from_weights(weights))
    }
}

/// Non-negative weights over pages, with a cumulative table for drawing.
#[derive(Debug, Clone)]
pub struct Distribution {
    pages: Vec<VertexId>,
    weights: Vec<f64>,
    cumulative: Vec<f64>,
}

impl Distribution {
    pub fn from_weights(mut weights: Vec<(VertexId, f64)>) -> Self {
        weights.sort_by_key(|(v, _)| *v);
        let mut acc = 0.0;
        let mut cumulative = Vec::with_capacity(weights.len());
        for (_, w) in weights.iter() {
            acc += w.max(0.0);
            cumulative.push(acc);
        }
        let (pages, weights): (Vec<_>, Vec<_>) = weights.into_iter().unzip();
        Self {
            pages,
            weights,
            cumulative,
        }
    }

    pub fn from_ranks(ranks: &RankVector) -> Self {
        Self::from_weights(ranks.iter().map(|(v, w)| (*v, *w)).collect())
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// The weight as produced, before normalization.
    pub fn weight(&self, page: VertexId) -> f64 {
        match self.pages.binary_search(&page) {
            Ok(i) => self.weights[i],
            Err(_) => 0.0,
        }
    }

    pub fn probability(&self, page: VertexId) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.weight(page) / total
        } else {
            0.0
        }
    }

    /// Pages and their normalized probabilities.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.pages.iter().map(|v| (*v, self.probability(*v)))
    }

    /// Draws a page with probability proportional to its weight.
    ///
    /// Returns `None` if no page carries any weight.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<VertexId> {
        let total = self.total();
        if total <= 0.0 {
            return None;
        }
        let x = rng.random::<f64>() * total;
        let idx = self.cumulative.partition_point(|c| *c <= x);
        // `x` may round up to `total`; fall back to the last page with weight.
        let idx = if idx < self.pages.len() {
            idx
        } else {
            self.cumulative.partition_point(|c| *c < total)
        };
        Some(self.pages[idx])
    }
}
