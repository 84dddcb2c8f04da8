use std::{collections::BTreeMap, fmt::Write};

pub const DEFAULT_PRECISION: usize = 4;

/// Renders `title` followed by one `  page: rank` line per page, in
/// lexicographic page order, with `precision` decimals.
pub fn render(title: &str, ranks: &BTreeMap<String, f64>, precision: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    for (page, rank) in ranks.iter() {
        let _ = writeln!(out, "  {page}: {rank:.precision$}");
    }
    out
}
