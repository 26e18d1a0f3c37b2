//! Route discovery in the site's source tree

use crate::error::SitemapError;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Extensions of files that may declare routes
pub const SOURCE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

const ROUTE_PATTERN: &str = r#"<Route\s+path=["'`]([^"'`]+)["'`]"#;

/// Script and component files under `root`, sorted by path
pub fn source_files(root: &Path) -> Result<Vec<PathBuf>, SitemapError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| SitemapError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_source = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if is_source {
            files.push(entry.into_path());
        }
    }
    debug!(root = %root.display(), files = files.len(), "collected source files");
    Ok(files)
}

/// Finds `<Route path="...">` declarations
#[derive(Debug, Clone)]
pub struct RouteScanner {
    pattern: Regex,
}

impl RouteScanner {
    /// Compile the route pattern
    pub fn new() -> Result<Self, SitemapError> {
        Ok(Self {
            pattern: Regex::new(ROUTE_PATTERN)?,
        })
    }

    /// Route paths in source text, in order of appearance
    #[must_use]
    pub fn extract<'a>(&self, source: &'a str) -> Vec<&'a str> {
        self.pattern
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Routes declared anywhere under `root`
    ///
    /// Excluded routes (exact match) are dropped and duplicates keep their
    /// first position.
    pub fn scan(&self, root: &Path, exclude: &[String]) -> Result<Vec<String>, SitemapError> {
        let mut routes: Vec<String> = Vec::new();
        for file in source_files(root)? {
            let content =
                std::fs::read_to_string(&file).map_err(|e| SitemapError::io(&file, e))?;
            for route in self.extract(&content) {
                if exclude.iter().any(|ex| ex == route) || routes.iter().any(|r| r == route) {
                    continue;
                }
                routes.push(route.to_string());
            }
        }
        Ok(routes)
    }
}
