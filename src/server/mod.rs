//! # HTTP Interface
//!
//! Thin actix-web layer over [`ProductComparator`].
//!
//! ## Routes
//!
//! - `POST /compare` with `{"url1": "...", "url2": "..."}`
//!   - both URLs: `{"data1": record, "data2": record}`
//!   - one URL: `{"comparison": [record]}`
//!   - no URL or a bad scheme: 400 `{"error": "..."}`
//!   - extraction failures: 502 `{"errors": {"url1": {...}, "url2": {...}}}`
//! - `GET /health`, `GET /`: liveness info, never touches the network
//!
//! Every response carries permissive CORS headers so a browser front end on
//! another origin can call the API.

use std::panic::AssertUnwindSafe;

use actix_web::error::InternalError;
use actix_web::middleware::DefaultHeaders;
use actix_web::{HttpResponse, Responder, get, options, post, web};
use chrono::Utc;
use futures::FutureExt;
use tracing::{error, info};

use crate::comparator::{CompareError, ProductComparator};
use crate::error::ValidationError;
use crate::models::{
    CompareRequest, ErrorResponse, ExtractionErrorResponse, ServiceInfo, SingleResponse,
};

/// Register all routes and the JSON body config
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(health)
        .service(compare)
        .service(compare_preflight);
}

/// Headers added to every response
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, POST, OPTIONS"))
        .add(("Access-Control-Allow-Headers", "Content-Type"))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("Invalid request body: {err}"),
        });
        InternalError::from_response(err, response).into()
    })
}

fn service_info() -> ServiceInfo {
    ServiceInfo {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().json(service_info())
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(service_info())
}

#[options("/compare")]
async fn compare_preflight() -> impl Responder {
    HttpResponse::NoContent().finish()
}

#[post("/compare")]
async fn compare(
    comparator: web::Data<ProductComparator>,
    body: web::Json<CompareRequest>,
) -> HttpResponse {
    let request = body.into_inner();

    match AssertUnwindSafe(handle_compare(&comparator, &request))
        .catch_unwind()
        .await
    {
        Ok(response) => response,
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown failure".to_string());
            error!("Compare request panicked: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: format!("Internal server error: {message}"),
            })
        }
    }
}

async fn handle_compare(comparator: &ProductComparator, request: &CompareRequest) -> HttpResponse {
    let url1 = provided(request.url1.as_deref());
    let url2 = provided(request.url2.as_deref());

    match (url1, url2) {
        (None, None) => validation_failed(&ValidationError::NoUrls),
        (Some(_), Some(_)) => {
            info!("Comparison request received");
            match comparator.compare(url1, url2).await {
                Ok(pair) => HttpResponse::Ok().json(pair),
                Err(e) => compare_failed(e),
            }
        }
        (Some(url), None) => single(comparator, "url1", url).await,
        (None, Some(url)) => single(comparator, "url2", url).await,
    }
}

async fn single(comparator: &ProductComparator, field: &'static str, url: &str) -> HttpResponse {
    info!("Single URL request received for {}", field);
    match comparator.extract_single(field, Some(url)).await {
        Ok(record) => HttpResponse::Ok().json(SingleResponse {
            comparison: vec![record],
        }),
        Err(e) => compare_failed(e),
    }
}

fn provided(url: Option<&str>) -> Option<&str> {
    url.map(str::trim).filter(|url| !url.is_empty())
}

fn compare_failed(error: CompareError) -> HttpResponse {
    match error {
        CompareError::Validation(e) => validation_failed(&e),
        CompareError::Extraction(errors) => {
            HttpResponse::BadGateway().json(ExtractionErrorResponse { errors })
        }
    }
}

fn validation_failed(error: &ValidationError) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
    })
}
