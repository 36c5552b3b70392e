//! Traits and interfaces for site-specific extraction and page acquisition

use async_trait::async_trait;
use scraper::Html;

use crate::classifier::SiteProfile;
use crate::error::ExtractionError;
use crate::models::RawFieldMap;
use crate::selector_chain::{Locate, SelectorChain};

/// Shown as the product name when a page yields nothing and has no `<title>`
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
/// Shown as the description when a page yields nothing at all
pub const EXTRACTION_FAILED_DESCRIPTION: &str = "Could not extract product details";

/// Configuration for one site profile
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Profile this configuration belongs to
    pub profile: SiteProfile,
    /// CSS selector chains for each field
    pub selectors: SiteSelectors,
}

/// The three selector chains every profile defines
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    /// Product title chain
    pub title: SelectorChain,
    /// Price chain
    pub price: SelectorChain,
    /// Where descriptive content lives
    pub details: DetailsSelector,
}

/// How descriptive content is located on a page
#[derive(Debug, Clone)]
pub enum DetailsSelector {
    /// A container whose child items each become one feature
    FeatureList { container: String, item: String },
    /// A single block of text used as the description
    Description {
        chain: SelectorChain,
        truncate_limit: Option<usize>,
    },
}

/// Trait for site-specific field extractors
pub trait SiteScraper: Send + Sync {
    /// Get the configuration for this scraper
    fn config(&self) -> &ScraperConfig;

    /// Run this profile's selector chains over a parsed page.
    ///
    /// Missing elements are simply absent from the returned map.
    fn extract_fields(&self, document: &Html) -> RawFieldMap;

    /// Extract fields, substituting a minimal map when nothing matched
    fn extract(&self, document: &Html) -> RawFieldMap {
        let fields = self.extract_fields(document);
        if fields.is_empty() {
            fallback_fields(document)
        } else {
            fields
        }
    }
}

/// Minimal map for pages where no selector chain matched
pub fn fallback_fields(document: &Html) -> RawFieldMap {
    let product = document
        .locate_text("title")
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

    RawFieldMap {
        product: Some(product),
        description: Some(EXTRACTION_FAILED_DESCRIPTION.to_string()),
        ..RawFieldMap::default()
    }
}

/// Acquires the HTML of a product page.
///
/// Implementations own whatever connection or rendering session they open
/// and must release it before returning, on success and on failure.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the page at `url`
    ///
    /// # Returns
    /// * `Result<String, ExtractionError>` - Page HTML, or a `Timeout`/`Fetch`/`Parse` failure
    async fn fetch(&self, url: &str) -> Result<String, ExtractionError>;
}
