//! Two estimators of PageRank over a [`Corpus`](crate::Corpus), both built on
//! the same [`TransitionModel`].
//!
//! [`sampled::SampledPageRank`] follows a random surfer and counts visits.
//! [`iterated::IteratedPageRank`] applies the damped recurrence until it
//! settles. Both start from a rank vector, normally [`uniform`](crate::uniform).

mod traits;
pub use self::traits::*;
mod transition;
pub use self::transition::{Distribution, TransitionModel};

pub mod iterated;
pub mod sampled;
