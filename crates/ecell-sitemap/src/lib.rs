//! Sitemap generator for the E-Cell site
//!
//! Scans the site's source tree for `<Route path="...">` declarations and
//! writes a `sitemap.xml` listing every public route.
//!
//! # Core Operations
//!
//! - [`RouteScanner::scan`]: collect routes, dropping excluded ones
//! - [`render_sitemap`]: render the XML document
//! - [`generate`]: scan, render and write in one step

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod render;
pub mod scan;

pub use config::{SitemapConfig, DEFAULT_BASE_URL, DEFAULT_EXCLUDES};
pub use error::SitemapError;
pub use render::{render_sitemap, with_root_first};
pub use scan::{source_files, RouteScanner};

use tracing::info;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Write the sitemap described by `config`, returning the listed routes
pub fn generate(config: &SitemapConfig) -> Result<Vec<String>, SitemapError> {
    let scanner = RouteScanner::new()?;
    let routes = with_root_first(scanner.scan(&config.src_dir, &config.exclude)?);
    let xml = render_sitemap(&config.base_url, &routes);

    if let Some(parent) = config.out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SitemapError::io(parent, e))?;
    }
    std::fs::write(&config.out_path, xml).map_err(|e| SitemapError::io(&config.out_path, e))?;

    info!(
        path = %config.out_path.display(),
        routes = routes.len(),
        "sitemap generated"
    );
    Ok(routes)
}
