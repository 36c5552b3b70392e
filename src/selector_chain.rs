//! Ordered selector chains with short-circuit fallback
//!
//! A chain lists CSS selectors for one field, most specific first. The first
//! selector that resolves to a node with non-empty text wins and the rest are
//! never tried.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Marker appended to text cut at a truncation limit
pub const ELLIPSIS: &str = "...";

/// Ordered CSS selectors for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    locators: Vec<String>,
}

impl SelectorChain {
    pub fn new(locators: &[&str]) -> Self {
        Self {
            locators: locators.iter().map(ToString::to_string).collect(),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locators.iter().map(String::as_str)
    }
}

/// Anything a locator can be resolved against
pub trait Locate {
    /// Normalized text of the first node matching `locator`, or `None`
    /// when nothing matches or the match has no text.
    fn locate_text(&self, locator: &str) -> Option<String>;
}

impl Locate for Html {
    fn locate_text(&self, locator: &str) -> Option<String> {
        let selector = parse_selector(locator)?;
        self.select(&selector)
            .next()
            .and_then(|el| non_empty(element_text(&el)))
    }
}

/// Walk `chain` in order and return the first match, truncated to `truncate_limit` if set.
pub fn evaluate<L: Locate + ?Sized>(
    document: &L,
    chain: &SelectorChain,
    truncate_limit: Option<usize>,
) -> Option<String> {
    let (locator, text) = chain
        .iter()
        .find_map(|locator| document.locate_text(locator).map(|text| (locator, text)))?;

    debug!("Selector '{}' matched", locator);

    Some(match truncate_limit {
        Some(limit) => truncate_text(&text, limit),
        None => text,
    })
}

/// Parse a locator, logging instead of failing on bad syntax
pub fn parse_selector(locator: &str) -> Option<Selector> {
    match Selector::parse(locator) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Invalid selector '{}': {:?}", locator, e);
            None
        }
    }
}

/// Whitespace-collapsed text content of an element.
///
/// Text nodes are joined with a space so block boundaries and `<br>` stay word breaks.
pub fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to `limit` characters, appending [`ELLIPSIS`] when anything was dropped
pub fn truncate_text(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
