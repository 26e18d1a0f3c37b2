//! Sitemap XML output

use std::fmt::Write as _;

const URLSET_OPEN: &str = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">"#;

/// Crawl priority for a route
#[inline]
#[must_use]
pub fn priority(route: &str) -> &'static str {
    if route == "/" {
        "1.0"
    } else {
        "0.8"
    }
}

/// Put `/` first, adding it if missing
#[must_use]
pub fn with_root_first(routes: Vec<String>) -> Vec<String> {
    let mut ordered = Vec::with_capacity(routes.len() + 1);
    ordered.push("/".to_string());
    ordered.extend(routes.into_iter().filter(|r| r != "/"));
    ordered
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a sitemap for `routes` under `base_url`
#[must_use]
pub fn render_sitemap(base_url: &str, routes: &[String]) -> String {
    let base = base_url.trim_end_matches('/');
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(URLSET_OPEN);
    xml.push('\n');
    for route in routes {
        // Writing to a String cannot fail
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <changefreq>monthly</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape(&format!("{base}{route}")),
            priority(route),
        );
    }
    xml.push_str("</urlset>\n");
    xml
}
