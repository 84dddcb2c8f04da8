use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("invalid sample count: {0}, at least one sample is required")]
    InvalidSampleCount(usize),

    #[error("the corpus contains no pages")]
    EmptyGraph,

    #[error("no convergence after {iterations} iterations, delta={delta}")]
    NonConvergence { iterations: usize, delta: f64 },

    #[error("damping factor {0} is out of [0, 1]")]
    InvalidDamping(f64),

    #[error("start vector sums to {0} instead of 1")]
    InvalidStart(f64),

    #[error("no page can be reached from {0}")]
    DegenerateTransition(String),

    #[error("page {page} links to {link}, which is not in the corpus")]
    UnknownLink { page: String, link: String },

    #[error("page {0} links to itself")]
    SelfLink(String),

    #[error("duplicate page: {0}")]
    DuplicatePage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if (0.0..=1.0).contains(&damping) {
        Ok(())
    } else {
        Err(Error::InvalidDamping(damping))
    }
}
