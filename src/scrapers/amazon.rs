//! Amazon product page extractor

use scraper::Html;

use crate::classifier::SiteProfile;
use crate::models::{FeatureValue, RawFieldMap};
use crate::selector_chain::{SelectorChain, element_text, evaluate, parse_selector};
use crate::traits::{DetailsSelector, ScraperConfig, SiteScraper, SiteSelectors};

/// Extractor for Amazon product pages
pub struct AmazonScraper {
    config: ScraperConfig,
}

impl AmazonScraper {
    pub fn new() -> Self {
        let config = ScraperConfig {
            profile: SiteProfile::Amazon,
            selectors: SiteSelectors {
                title: SelectorChain::new(&["#productTitle"]),
                price: SelectorChain::new(&[
                    ".a-price .a-offscreen",
                    "#priceblock_ourprice",
                    "#priceblock_dealprice",
                    "#price_inside_buybox",
                ]),
                details: DetailsSelector::FeatureList {
                    container: "#feature-bullets".to_string(),
                    item: "li".to_string(),
                },
            },
        };

        Self { config }
    }

    /// Bullet points under the feature container, one feature per list item
    fn feature_bullets(&self, document: &Html) -> Option<Vec<String>> {
        let DetailsSelector::FeatureList { container, item } = &self.config.selectors.details
        else {
            return None;
        };

        let container_selector = parse_selector(container)?;
        let item_selector = parse_selector(item)?;
        let container = document.select(&container_selector).next()?;

        let bullets: Vec<String> = container
            .select(&item_selector)
            .map(|el| element_text(&el))
            .filter(|text| !text.is_empty())
            .collect();

        if bullets.is_empty() { None } else { Some(bullets) }
    }
}

impl SiteScraper for AmazonScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    fn extract_fields(&self, document: &Html) -> RawFieldMap {
        RawFieldMap {
            product: evaluate(document, &self.config.selectors.title, None),
            price: evaluate(document, &self.config.selectors.price, None),
            features: self.feature_bullets(document).map(FeatureValue::List),
            ..RawFieldMap::default()
        }
    }
}
