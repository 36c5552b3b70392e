//! Site-specific field extractors
//!
//! Each profile has its own scraper with a fixed set of selector chains.
//! [`scraper_for`] picks the one matching a classified URL.

mod amazon;
mod flipkart;
mod generic;

pub use amazon::AmazonScraper;
pub use flipkart::FlipkartScraper;
pub use generic::GenericScraper;

use scraper::Html;
use tracing::debug;

use crate::classifier::SiteProfile;
use crate::models::RawFieldMap;
use crate::traits::SiteScraper;

/// Scraper implementing the given profile
pub fn scraper_for(profile: SiteProfile) -> Box<dyn SiteScraper> {
    match profile {
        SiteProfile::Amazon => Box::new(AmazonScraper::new()),
        SiteProfile::Flipkart => Box::new(FlipkartScraper::new()),
        SiteProfile::Generic => Box::new(GenericScraper::new()),
    }
}

/// Parse `html` and run the profile's extractor over it
pub fn extract_html(profile: SiteProfile, html: &str) -> RawFieldMap {
    let document = Html::parse_document(html);
    let scraper = scraper_for(profile);

    debug!(
        "Extracting with {} profile ({} parse warnings)",
        scraper.config().profile,
        document.errors.len()
    );

    scraper.extract(&document)
}
