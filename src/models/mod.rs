//! Data models for extracted product fields and HTTP payloads

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Feature data as a site extractor found it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureValue {
    #[cfg_attr(not(test), allow(dead_code))]
    Single(String),
    List(Vec<String>),
}

/// Fields located on a product page before normalization.
///
/// Each key is optional; extractors fill in only what their selector chains matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldMap {
    pub product: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub description: Option<String>,
    pub features: Option<FeatureValue>,
}

impl RawFieldMap {
    pub fn is_empty(&self) -> bool {
        self.product.is_none()
            && self.title.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.features.is_none()
    }
}

/// The normalized product record returned to callers. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecord {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Features")]
    pub features: Vec<String>,
    #[serde(rename = "Price")]
    pub price: String,
}

impl From<CanonicalRecord> for RawFieldMap {
    fn from(record: CanonicalRecord) -> Self {
        Self {
            product: Some(record.product),
            title: None,
            price: Some(record.price),
            description: Some(record.description),
            features: Some(FeatureValue::List(record.features)),
        }
    }
}

/// Two normalized records, in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonPair {
    pub data1: CanonicalRecord,
    pub data2: CanonicalRecord,
}

/// Incoming body for `POST /compare`
#[derive(Debug, Default, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub url1: Option<String>,
    #[serde(default)]
    pub url2: Option<String>,
}

/// Single-URL mode response
#[derive(Debug, Serialize)]
pub struct SingleResponse {
    pub comparison: Vec<CanonicalRecord>,
}

/// Per-URL failures, keyed by the request field that failed
#[derive(Debug, Serialize)]
pub struct ExtractionErrorResponse {
    pub errors: BTreeMap<&'static str, ExtractionError>,
}

/// Whole-request failure (validation or internal)
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Liveness payload for `GET /health`
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}
