use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::classifier::classify;
use crate::error::{ExtractionError, ValidationError};
use crate::models::{CanonicalRecord, ComparisonPair};
use crate::normalize::normalize;
use crate::scrapers::extract_html;
use crate::traits::DocumentFetcher;

const ACCEPTED_SCHEMES: &[&str] = &["http://", "https://"];

/// Why a comparison produced no records
#[derive(Error, Debug)]
pub enum CompareError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{} URL(s) could not be extracted", .0.len())]
    Extraction(BTreeMap<&'static str, ExtractionError>),
}

/// Runs fetch, extraction and normalization for one or two product URLs
#[derive(Clone)]
pub struct ProductComparator {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl ProductComparator {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch, classify, extract and normalize a single URL.
    ///
    /// The URL is assumed to be validated already.
    pub async fn extract_one(&self, url: &str) -> Result<CanonicalRecord, ExtractionError> {
        let html = self.fetcher.fetch(url).await?;

        let profile = classify(url);
        info!("Extracting {} as {}", url, profile);

        // Html is not Send, so parsing stays on its own blocking task
        let raw = tokio::task::spawn_blocking(move || extract_html(profile, &html))
            .await
            .map_err(|e| ExtractionError::parse(url, format!("Extraction failed: {e}")))?;

        Ok(normalize(&raw))
    }

    /// Validate and extract a single URL reported under `field`
    pub async fn extract_single(
        &self,
        field: &'static str,
        url: Option<&str>,
    ) -> Result<CanonicalRecord, CompareError> {
        let url = validate_url(field, url)?;

        self.extract_one(&url).await.map_err(|e| {
            warn!("{} failed: {}", field, e);
            CompareError::Extraction(BTreeMap::from([(field, e)]))
        })
    }

    /// Extract both URLs and return them side by side.
    ///
    /// Both URLs are validated before anything is fetched. Both sides are always
    /// attempted, and if either fails only the failures are returned.
    pub async fn compare(
        &self,
        url1: Option<&str>,
        url2: Option<&str>,
    ) -> Result<ComparisonPair, CompareError> {
        let url1 = validate_url("url1", url1)?;
        let url2 = validate_url("url2", url2)?;

        info!("Comparing {} with {}", url1, url2);

        let (first, second) = tokio::join!(self.extract_one(&url1), self.extract_one(&url2));

        match (first, second) {
            (Ok(data1), Ok(data2)) => Ok(ComparisonPair { data1, data2 }),
            (first, second) => {
                let mut errors = BTreeMap::new();
                for (field, result) in [("url1", first), ("url2", second)] {
                    if let Err(e) = result {
                        warn!("{} failed: {}", field, e);
                        errors.insert(field, e);
                    }
                }
                Err(CompareError::Extraction(errors))
            }
        }
    }
}

/// Trim `url` and check it is present with an accepted scheme
pub fn validate_url(field: &'static str, url: Option<&str>) -> Result<String, ValidationError> {
    let url = url.map(str::trim).unwrap_or_default();

    if url.is_empty() {
        return Err(ValidationError::MissingUrl { field });
    }

    if !ACCEPTED_SCHEMES
        .iter()
        .any(|scheme| url.starts_with(scheme))
    {
        return Err(ValidationError::InvalidScheme {
            field,
            url: url.to_string(),
        });
    }

    Ok(url.to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::normalize::{DEFAULT_DESCRIPTION, DEFAULT_FEATURE};

    /// Serves canned pages and counts fetch attempts
    #[derive(Default)]
    pub(crate) struct MockFetcher {
        pub pages: HashMap<String, Result<String, ExtractionError>>,
        pub calls: AtomicUsize,
    }

    impl MockFetcher {
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Ok(html.to_string()));
            self
        }

        pub fn with_error(mut self, url: &str, error: ExtractionError) -> Self {
            self.pages.insert(url.to_string(), Err(error));
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(ExtractionError::fetch(url, "Unexpected status: 404")))
        }
    }

    pub(crate) const AMAZON_URL: &str = "https://www.amazon.com/dp/B000WIDGET";
    pub(crate) const AMAZON_PAGE: &str = r#"
        <html><body>
            <span id="productTitle">Widget</span>
            <span class="a-price"><span class="a-offscreen">$9.99</span></span>
        </body></html>
    "#;

    pub(crate) const FLIPKART_URL: &str = "https://www.flipkart.com/gadget/p/itm123";
    pub(crate) const FLIPKART_PAGE: &str = r#"
        <span class="B_NuCI">Gadget</span>
        <div class="_30jeq3">₹499</div>
        <div class="_1mXnXO">Compact gadget.</div>
    "#;

    fn comparator(fetcher: &Arc<MockFetcher>) -> ProductComparator {
        ProductComparator::new(fetcher.clone())
    }

    #[test]
    fn test_validate_url() {
        assert_eq!(
            validate_url("url1", Some("  https://a.test/x  ")).unwrap(),
            "https://a.test/x"
        );
        assert!(validate_url("url1", Some("http://a.test")).is_ok());
        assert_eq!(
            validate_url("url2", None),
            Err(ValidationError::MissingUrl { field: "url2" })
        );
        assert_eq!(
            validate_url("url2", Some("   ")),
            Err(ValidationError::MissingUrl { field: "url2" })
        );
        assert!(matches!(
            validate_url("url1", Some("ftp://a.test")),
            Err(ValidationError::InvalidScheme { field: "url1", .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_urls_never_fetch() {
        let fetcher = Arc::new(MockFetcher::default());
        let comparator = comparator(&fetcher);

        for (a, b) in [
            ("www.amazon.com/dp/1", AMAZON_URL),
            (AMAZON_URL, "javascript:alert(1)"),
            ("file:///etc/passwd", "mailto:x@y.z"),
        ] {
            let result = comparator.compare(Some(a), Some(b)).await;
            assert!(matches!(result, Err(CompareError::Validation(_))));
        }

        let result = comparator.extract_single("url1", Some("amazon.com")).await;
        assert!(matches!(result, Err(CompareError::Validation(_))));

        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn test_compare_success() {
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page(AMAZON_URL, AMAZON_PAGE)
                .with_page(FLIPKART_URL, FLIPKART_PAGE),
        );

        let pair = comparator(&fetcher)
            .compare(Some(AMAZON_URL), Some(FLIPKART_URL))
            .await
            .unwrap();

        assert_eq!(
            pair.data1,
            CanonicalRecord {
                product: "Widget".to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
                features: vec![DEFAULT_FEATURE.to_string()],
                price: "$9.99".to_string(),
            }
        );
        assert_eq!(pair.data2.product, "Gadget");
        assert_eq!(pair.data2.price, "₹499");
        assert_eq!(pair.data2.description, "Compact gadget.");
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_timeout_on_one_side_returns_only_errors() {
        let slow = "https://slow.example.com/item";
        let fetcher = Arc::new(
            MockFetcher::default()
                .with_page(AMAZON_URL, AMAZON_PAGE)
                .with_error(slow, ExtractionError::timeout(slow, "operation timed out")),
        );

        let result = comparator(&fetcher)
            .compare(Some(AMAZON_URL), Some(slow))
            .await;

        let Err(CompareError::Extraction(errors)) = result else {
            panic!("expected extraction errors");
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["url2"].kind(), "timeout");
        assert_eq!(errors["url2"].url(), slow);
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_both_sides_attempted_when_first_fails() {
        let fetcher = Arc::new(MockFetcher::default());

        let result = comparator(&fetcher)
            .compare(Some("https://a.test/1"), Some("https://b.test/2"))
            .await;

        let Err(CompareError::Extraction(errors)) = result else {
            panic!("expected extraction errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["url1"].kind(), "fetch");
        assert_eq!(errors["url2"].kind(), "fetch");
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_unrecognised_page_is_degraded_not_failed() {
        let url = "https://shop.test/blank";
        let fetcher =
            Arc::new(MockFetcher::default().with_page(url, "<html><body></body></html>"));

        let record = comparator(&fetcher).extract_one(url).await.unwrap();

        assert_eq!(record.product, crate::traits::UNKNOWN_PRODUCT);
        assert_eq!(
            record.description,
            crate::traits::EXTRACTION_FAILED_DESCRIPTION
        );
        assert_eq!(record.features, vec![DEFAULT_FEATURE.to_string()]);
    }

    #[tokio::test]
    async fn test_extract_single_reports_failure_under_field() {
        let fetcher = Arc::new(MockFetcher::default());

        let result = comparator(&fetcher)
            .extract_single("url2", Some("https://gone.test/x"))
            .await;

        let Err(CompareError::Extraction(errors)) = result else {
            panic!("expected extraction errors");
        };
        assert!(errors.contains_key("url2"));
        assert_eq!(fetcher.call_count(), 1);
    }
}
