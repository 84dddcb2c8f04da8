use crate::{Corpus, RankVector, Result};

pub trait PageRank {
    type Outcome: PageRankOutcome;

    /// Runs the estimator from `start`, a distribution over the pages of the corpus.
    fn calc(&self, start: &RankVector) -> Result<Self::Outcome>;
}

pub trait PageRankOutcome {
    fn page_rank(&self) -> &RankVector;
    fn debug<'a>(&'a self, corpus: &'a Corpus) -> impl std::fmt::Debug + 'a;
}
