//! Generator settings

use std::path::PathBuf;

/// Public origin of the site
pub const DEFAULT_BASE_URL: &str = "https://ecell-davv.vercel.app";

/// Routes never listed in the sitemap
pub const DEFAULT_EXCLUDES: [&str; 7] = [
    "/admin",
    "/admin/*",
    "/dashboard",
    "/login",
    "/settings",
    "/bulletin",
    "*",
];

/// Where to scan, where to write, what to skip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapConfig {
    /// Origin prefixed to every route
    pub base_url: String,
    /// Root of the scanned source tree
    pub src_dir: PathBuf,
    /// Sitemap file to write
    pub out_path: PathBuf,
    /// Routes dropped by exact match
    pub exclude: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            src_dir: PathBuf::from("src"),
            out_path: PathBuf::from("public/sitemap.xml"),
            exclude: DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl SitemapConfig {
    /// Set base URL (trailing slash dropped)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set source directory
    #[must_use]
    pub fn with_src_dir(mut self, src_dir: impl Into<PathBuf>) -> Self {
        self.src_dir = src_dir.into();
        self
    }

    /// Set output file
    #[must_use]
    pub fn with_out_path(mut self, out_path: impl Into<PathBuf>) -> Self {
        self.out_path = out_path.into();
        self
    }

    /// Add routes to the exclusion list
    #[must_use]
    pub fn with_excluded<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for route in routes {
            let route = route.into();
            if !self.exclude.contains(&route) {
                self.exclude.push(route);
            }
        }
        self
    }
}
