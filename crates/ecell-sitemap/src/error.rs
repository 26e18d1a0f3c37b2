//! Error types for sitemap generation

use std::path::PathBuf;

/// Errors generating a sitemap
#[derive(Debug, thiserror::Error)]
pub enum SitemapError {
    /// Source tree could not be walked
    #[error("failed to scan {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// File could not be read or written
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Route pattern failed to compile
    #[error("invalid route pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl SitemapError {
    /// Create IO error for path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
