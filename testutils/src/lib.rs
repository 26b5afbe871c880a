//! Utilities used in tests in multiple crates within the workspace.

/// Wraps `body` in a minimal HTML page.
pub fn page(body: &str) -> String {
    format!("<!DOCTYPE html><html><head></head><body>{body}</body></html>")
}

/// Concatenates `count` generated snippets. Handy for lists of same-shaped
/// elements.
pub fn repeat_html(count: usize, item: impl Fn(usize) -> String) -> String {
    (0..count).map(item).collect()
}

/// Converts a literal grid into owned rows.
pub fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

/// A small property listing page: navigation, a definition list, four
/// listing cards and a fee table.
pub fn listing_page() -> String {
    let cards = repeat_html(4, |i| {
        format!(
            r#"<article class="card"><p>Grünerløkka {i}, Oslo</p><h2>Bright flat number {i}</h2><span>{}&nbsp;700&nbsp;000&nbsp;kr</span><span>5{i} m²</span></article>"#,
            i + 3
        )
    });
    page(&format!(
        r#"<header><nav><a href="/">Home</a><a href="/search">Search</a></nav></header>
<main>
<h1>Homes for sale in Oslo</h1>
<dl><dt>Boligtype</dt><dd>Leilighet</dd><dt>Eierform</dt><dd>Selveier</dd></dl>
<div class="results">{cards}</div>
<table id="fees">
<tr><th>Fee</th><th>Amount</th></tr>
<tr><td>Common costs</td><td>3200</td></tr>
<tr><td>Property tax</td><td>1200</td></tr>
</table>
</main>"#
    ))
}
