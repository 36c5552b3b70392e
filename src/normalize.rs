//! Mapping raw extractor output onto the canonical record

use crate::models::{CanonicalRecord, FeatureValue, RawFieldMap};

pub const DEFAULT_PRODUCT: &str = "Unnamed Product";
pub const DEFAULT_PRICE: &str = "No price found";
pub const DEFAULT_DESCRIPTION: &str = "No description found";
pub const DEFAULT_FEATURE: &str = "No features found";

/// Build a canonical record from any raw field map. Never fails.
///
/// `Product` prefers the product field, then the page title. Features are always
/// a non-empty list. Normalizing an already-canonical record changes nothing.
pub fn normalize(raw: &RawFieldMap) -> CanonicalRecord {
    CanonicalRecord {
        product: first_present(&[raw.product.as_deref(), raw.title.as_deref()])
            .unwrap_or(DEFAULT_PRODUCT)
            .to_string(),
        description: first_present(&[raw.description.as_deref()])
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        features: normalize_features(raw.features.as_ref()),
        price: first_present(&[raw.price.as_deref()])
            .unwrap_or(DEFAULT_PRICE)
            .to_string(),
    }
}

fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.trim().is_empty())
}

fn normalize_features(features: Option<&FeatureValue>) -> Vec<String> {
    let items: Vec<String> = match features {
        Some(FeatureValue::Single(value)) => vec![value.clone()],
        Some(FeatureValue::List(values)) => values.clone(),
        None => Vec::new(),
    };

    let items: Vec<String> = items
        .into_iter()
        .filter(|item| !item.trim().is_empty())
        .collect();

    if items.is_empty() {
        vec![DEFAULT_FEATURE.to_string()]
    } else {
        items
    }
}
