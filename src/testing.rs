use crate::Corpus;
use quickcheck::Arbitrary;

pub fn corpus(pages: &[(&str, &[&str])]) -> Corpus {
    Corpus::from_links(
        pages
            .iter()
            .map(|(page, links)| (*page, links.iter().copied())),
    )
    .unwrap()
}

pub fn rank_sum(ranks: &crate::RankVector) -> f64 {
    ranks.values().sum()
}

/// Corpora of up to 10 pages with random links; self links are skipped.
#[derive(Debug, Clone)]
pub struct RandomCorpus {
    pub corpus: Corpus,
}

impl Arbitrary for RandomCorpus {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        const N: usize = 10;

        let n: usize = usize::arbitrary(g) % N + 1;
        let names: Vec<String> = (0..n).map(|i| format!("{i}.html")).collect();
        let mut links: Vec<Vec<String>> = vec![vec![]; n];
        for _ in 0..(n * 2) {
            let u = usize::arbitrary(g) % n;
            let v = usize::arbitrary(g) % n;
            if u != v {
                links[u].push(names[v].clone());
            }
        }
        let corpus = Corpus::from_links(names.into_iter().zip(links)).unwrap();
        Self { corpus }
    }
}
