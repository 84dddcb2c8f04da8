use crate::{Error, RankVector, Result};
use algograph::graph::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fs,
    path::Path,
};
use tracing::{debug, info};
use walkdir::WalkDir;

lazy_static! {
    static ref HREF: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// A closed universe of named pages and the links between them.
///
/// Pages are vertices of a directed graph, added in lexicographic order of
/// their names, so that vertex order (and thus every seeded computation over
/// the corpus) does not depend on the order pages were supplied in.
#[derive(Debug, Clone)]
pub struct Corpus {
    graph: directed::TreeBackedGraph,
    names: BTreeMap<VertexId, String>,
    ids: HashMap<String, VertexId, ahash::RandomState>,
}

impl Corpus {
    /// Builds a corpus from `(page, links)` pairs.
    ///
    /// Every link must name another page of the corpus. Repeated links collapse.
    pub fn from_links<I, S, L, T>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, L)>,
        S: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut pages: Vec<(String, Vec<String>)> = pages
            .into_iter()
            .map(|(page, links)| (page.into(), links.into_iter().map(Into::into).collect()))
            .collect();
        pages.sort_by(|a, b| a.0.cmp(&b.0));

        let mut graph = directed::TreeBackedGraph::new();
        let mut names = BTreeMap::new();
        let mut ids: HashMap<_, _, ahash::RandomState> = HashMap::default();
        for (page, _) in pages.iter() {
            if ids.contains_key(page) {
                return Err(Error::DuplicatePage(page.clone()));
            }
            let v = graph.add_vertex();
            names.insert(v, page.clone());
            ids.insert(page.clone(), v);
        }
        for (page, links) in pages.iter() {
            let u = ids[page];
            let mut seen: HashSet<VertexId, ahash::RandomState> = HashSet::default();
            for link in links.iter() {
                if link == page {
                    return Err(Error::SelfLink(page.clone()));
                }
                let Some(v) = ids.get(link) else {
                    return Err(Error::UnknownLink {
                        page: page.clone(),
                        link: link.clone(),
                    });
                };
                if seen.insert(*v) {
                    graph.add_edge(u, *v);
                }
            }
        }
        Ok(Self { graph, names, ids })
    }

    /// Reads every `.html` file directly inside `dir` and collects the pages
    /// each one links to with `<a href="...">`.
    ///
    /// Self links and links to pages outside the directory are dropped.
    pub fn crawl<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut pages: HashMap<String, HashSet<String, ahash::RandomState>, ahash::RandomState> =
            HashMap::default();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !name.ends_with(".html") {
                continue;
            }
            let contents = fs::read(entry.path())?;
            let contents = String::from_utf8_lossy(&contents);
            let links: HashSet<_, ahash::RandomState> = HREF
                .captures_iter(&contents)
                .map(|c| c[1].to_string())
                .filter(|link| link != name)
                .collect();
            debug!(page = name, links = links.len(), "crawled page");
            pages.insert(name.to_string(), links);
        }

        let pages: Vec<(String, Vec<String>)> = pages
            .iter()
            .map(|(page, links)| {
                let links = links
                    .iter()
                    .filter(|link| pages.contains_key(*link))
                    .cloned()
                    .collect();
                (page.clone(), links)
            })
            .collect();
        info!(dir = %dir.display(), pages = pages.len(), "crawled corpus");
        Self::from_links(pages)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            Err(Error::EmptyGraph)
        } else {
            Ok(())
        }
    }

    pub fn vertex(&self, page: &str) -> Result<VertexId> {
        self.ids
            .get(page)
            .copied()
            .ok_or_else(|| Error::UnknownPage(page.to_string()))
    }

    pub fn name(&self, v: VertexId) -> Option<&str> {
        self.names.get(&v).map(String::as_str)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.names.contains_key(&v)
    }

    /// All pages, in lexicographic order of their names.
    pub fn pages(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.names.keys().copied()
    }

    /// Pages linked to by `v`.
    pub fn links(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&v).map(|e| e.sink)
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.graph.out_edges(&v).count()
    }

    /// Replaces vertices by page names; the result iterates in lexicographic order.
    pub fn named(&self, ranks: &RankVector) -> BTreeMap<String, f64> {
        ranks
            .iter()
            .filter_map(|(v, r)| self.name(*v).map(|name| (name.to_string(), *r)))
            .collect()
    }

    pub(crate) fn describe(&self, v: VertexId) -> String {
        match self.name(v) {
            Some(name) => name.to_string(),
            None => format!("{v:?}"),
        }
    }
}
