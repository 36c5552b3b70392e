//! Flipkart product page extractor

use scraper::Html;

use crate::classifier::SiteProfile;
use crate::models::RawFieldMap;
use crate::selector_chain::{SelectorChain, evaluate};
use crate::traits::{DetailsSelector, ScraperConfig, SiteScraper, SiteSelectors};

/// Extractor for Flipkart product pages. Class names cover the old and current layouts.
pub struct FlipkartScraper {
    config: ScraperConfig,
}

impl FlipkartScraper {
    pub fn new() -> Self {
        let config = ScraperConfig {
            profile: SiteProfile::Flipkart,
            selectors: SiteSelectors {
                title: SelectorChain::new(&["span.B_NuCI", "span.VU-ZEz"]),
                price: SelectorChain::new(&["div._30jeq3", "div.Nx9bqj"]),
                details: DetailsSelector::Description {
                    chain: SelectorChain::new(&["div._1mXnXO", "div._1AN87F"]),
                    truncate_limit: None,
                },
            },
        };

        Self { config }
    }
}

impl SiteScraper for FlipkartScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    fn extract_fields(&self, document: &Html) -> RawFieldMap {
        let selectors = &self.config.selectors;

        let description = match &selectors.details {
            DetailsSelector::Description {
                chain,
                truncate_limit,
            } => evaluate(document, chain, *truncate_limit),
            DetailsSelector::FeatureList { .. } => None,
        };

        RawFieldMap {
            product: evaluate(document, &selectors.title, None),
            price: evaluate(document, &selectors.price, None),
            description,
            ..RawFieldMap::default()
        }
    }
}
