//! Static HTML acquisition over HTTP

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ExtractionError;
use crate::traits::DocumentFetcher;

/// Fetches pages with a shared reqwest client
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    fn classify_error(url: &str, error: &reqwest::Error) -> ExtractionError {
        if error.is_timeout() {
            ExtractionError::timeout(url, error.to_string())
        } else {
            ExtractionError::fetch(url, error.to_string())
        }
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ExtractionError> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Fetching {} returned {}", url, status);
            return Err(ExtractionError::fetch(
                url,
                format!("Unexpected status: {status}"),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Self::classify_error(url, &e))?;

        if html.trim().is_empty() {
            return Err(ExtractionError::parse(url, "Empty response body"));
        }

        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn fetcher(timeout_secs: u64) -> HttpFetcher {
        let config = Config {
            fetch_timeout_secs: timeout_secs,
            ..Config::default()
        };
        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_returns_page_html() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/item");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<html><body><h1>Lamp</h1></body></html>");
            })
            .await;

        let html = fetcher(5).fetch(&server.url("/item")).await.unwrap();

        mock.assert_async().await;
        assert!(html.contains("<h1>Lamp</h1>"));
    }

    #[tokio::test]
    async fn test_error_status_is_fetch_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/broken");
                then.status(500);
            })
            .await;

        let url = server.url("/broken");
        let err = fetcher(5).fetch(&url).await.unwrap_err();

        assert_eq!(err.kind(), "fetch");
        assert_eq!(err.url(), url);
        assert!(err.message().contains("500"));
    }

    #[tokio::test]
    async fn test_blank_body_is_parse_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/blank");
                then.status(200).body("   \n ");
            })
            .await;

        let err = fetcher(5).fetch(&server.url("/blank")).await.unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_slow_response_is_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .body("<html></html>")
                    .delay(Duration::from_millis(2500));
            })
            .await;

        let err = fetcher(1).fetch(&server.url("/slow")).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test]
    async fn test_refused_connection_is_fetch_failure() {
        // Reserve a free port, then close it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = format!("http://127.0.0.1:{port}/item");

        let err = fetcher(5).fetch(&url).await.unwrap_err();
        assert_eq!(err.kind(), "fetch");
    }
}
