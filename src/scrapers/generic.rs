//! Heuristic extractor for sites without a dedicated profile

use scraper::{ElementRef, Html};

use crate::classifier::SiteProfile;
use crate::models::{FeatureValue, RawFieldMap};
use crate::selector_chain::{SelectorChain, element_text, evaluate, parse_selector, truncate_text};
use crate::traits::{DetailsSelector, ScraperConfig, SiteScraper, SiteSelectors};

/// Only this many lists, in document order, are considered for features
const MAX_CANDIDATE_LISTS: usize = 3;
/// Maximum number of features taken from a list
const MAX_FEATURES: usize = 5;
/// Character cap per feature item
const FEATURE_ITEM_LIMIT: usize = 200;
/// Character cap for the description
const DESCRIPTION_LIMIT: usize = 500;

/// Best-effort extractor driven by common markup conventions
pub struct GenericScraper {
    config: ScraperConfig,
}

impl GenericScraper {
    pub fn new() -> Self {
        let config = ScraperConfig {
            profile: SiteProfile::Generic,
            selectors: SiteSelectors {
                // One grouped selector: the first heading in document order
                title: SelectorChain::new(&["h1, h2, h3"]),
                price: SelectorChain::new(&[
                    "[itemprop='price']",
                    ".price",
                    "#price",
                    "[class*='price']",
                ]),
                details: DetailsSelector::Description {
                    chain: SelectorChain::new(&[
                        "[itemprop='description']",
                        "#description",
                        ".product-description",
                        ".description",
                    ]),
                    truncate_limit: Some(DESCRIPTION_LIMIT),
                },
            },
        };

        Self { config }
    }

    fn description(&self, document: &Html) -> Option<String> {
        let from_chain = match &self.config.selectors.details {
            DetailsSelector::Description {
                chain,
                truncate_limit,
            } => evaluate(document, chain, *truncate_limit),
            DetailsSelector::FeatureList { .. } => None,
        };

        from_chain.or_else(|| meta_description(document))
    }
}

impl SiteScraper for GenericScraper {
    fn config(&self) -> &ScraperConfig {
        &self.config
    }

    fn extract_fields(&self, document: &Html) -> RawFieldMap {
        RawFieldMap {
            product: evaluate(document, &self.config.selectors.title, None),
            price: evaluate(document, &self.config.selectors.price, None),
            description: self.description(document),
            features: list_features(document).map(FeatureValue::List),
            ..RawFieldMap::default()
        }
    }
}

/// `<meta name="description">` content, trimmed and capped
fn meta_description(document: &Html) -> Option<String> {
    let selector = parse_selector("meta[name='description']")?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(|content| truncate_text(content, DESCRIPTION_LIMIT))
}

/// Items of the first early list that has more than one entry
fn list_features(document: &Html) -> Option<Vec<String>> {
    let list_selector = parse_selector("ul, ol")?;

    document
        .select(&list_selector)
        .take(MAX_CANDIDATE_LISTS)
        .find_map(|list| plausible_list_items(&list))
}

fn plausible_list_items(list: &ElementRef<'_>) -> Option<Vec<String>> {
    let item_selector = parse_selector("li")?;
    let items: Vec<ElementRef<'_>> = list.select(&item_selector).collect();

    // A single bullet is usually navigation or a breadcrumb, not a feature list
    if items.len() <= 1 {
        return None;
    }

    let features: Vec<String> = items
        .iter()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(MAX_FEATURES)
        .map(|text| truncate_text(&text, FEATURE_ITEM_LIMIT))
        .collect();

    if features.is_empty() { None } else { Some(features) }
}
