use algograph::graph::VertexId;
use std::{collections::HashMap, hash::Hash};

/// Rank (or probability) of every page, keyed by vertex.
pub type RankVector = HashMap<VertexId, f64, ahash::RandomState>;

pub fn norm_1<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Eq + Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

pub fn uniform<I: Iterator<Item = VertexId>>(vertices: I) -> RankVector {
    let vs: Vec<_> = vertices.collect();
    let n = vs.len() as f64;
    vs.into_iter().map(|v| (v, 1.0 / n)).collect()
}

/// Rescales `v` in place so that it sums to 1. Vectors with no mass are left alone.
pub fn normalize(v: &mut RankVector) {
    let sum = norm_1(v);
    if sum > 0.0 {
        for x in v.values_mut() {
            *x /= sum;
        }
    }
}
