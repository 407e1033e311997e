// ============================================================================
// Prometheus Metrics
// ============================================================================
//
// ## Metrics Collected:
//
// 1. **HTTP Request Duration** - mlr_http_request_duration_seconds (method, path, status)
// 2. **HTTP Request Total** - mlr_http_requests_total (method, path, status)
// 3. **Citation Documents** - mlr_citation_documents_total (outcome)
// 4. **Unresolved Claim Markers** - mlr_unresolved_claim_markers_total
//
// Scraped from GET /metrics.
//
// ============================================================================

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec, register_histogram_vec, register_int_counter, CounterVec, Encoder,
    HistogramVec, IntCounter, TextEncoder,
};
use std::time::Instant;

lazy_static! {
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "mlr_http_request_duration_seconds",
        "HTTP request latency in seconds",
        &["method", "path", "status"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    ).unwrap();

    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = register_counter_vec!(
        "mlr_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    ).unwrap();

    /// Documents run through the citation processor, by outcome
    pub static ref CITATION_DOCUMENTS_TOTAL: CounterVec = register_counter_vec!(
        "mlr_citation_documents_total",
        "Documents processed for claim citations",
        &["outcome"]
    ).unwrap();

    pub static ref UNRESOLVED_MARKERS_TOTAL: IntCounter = register_int_counter!(
        "mlr_unresolved_claim_markers_total",
        "Distinct claim markers left unresolved in processed documents"
    ).unwrap();
}

/// Outcome label for a citation processing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationOutcome {
    Annotated,
    NoMarkers,
    NoClaimsFound,
    StoreError,
}

impl CitationOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CitationOutcome::Annotated => "annotated",
            CitationOutcome::NoMarkers => "no_markers",
            CitationOutcome::NoClaimsFound => "no_claims_found",
            CitationOutcome::StoreError => "store_error",
        }
    }
}

/// Collapse id-like path segments so label cardinality stays bounded.
fn normalize_path(path: &str) -> String {
    let normalized: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if uuid::Uuid::parse_str(segment).is_ok() || segment.parse::<i64>().is_ok() {
                ":id"
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", normalized.join("/"))
}

pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = normalize_path(request.uri().path());

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status().as_u16().to_string();

    HTTP_REQUEST_DURATION
        .with_label_values(&[method.as_str(), &path, &status])
        .observe(duration.as_secs_f64());
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), &path, &status])
        .inc();

    tracing::debug!(
        target: "metrics",
        method = %method,
        path = %path,
        status = %status,
        duration_ms = %duration.as_millis(),
        "HTTP request completed"
    );

    response
}

pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = vec![];

    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            buffer,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                format!("Failed to encode metrics: {}", e).into_bytes(),
            )
        }
    }
}

pub fn record_citation_outcome(outcome: CitationOutcome) {
    CITATION_DOCUMENTS_TOTAL
        .with_label_values(&[outcome.as_str()])
        .inc();
}

pub fn record_unresolved_markers(count: usize) {
    if count > 0 {
        UNRESOLVED_MARKERS_TOTAL.inc_by(count as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let response = metrics_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/api/brands/123"), "/api/brands/:id");
        assert_eq!(
            normalize_path("/api/brands/550e8400-e29b-41d4-a716-446655440000/claims"),
            "/api/brands/:id/claims"
        );
        assert_eq!(normalize_path("/api/citations/process"), "/api/citations/process");
    }

    #[test]
    fn test_record_citation_outcome() {
        let before = CITATION_DOCUMENTS_TOTAL
            .with_label_values(&["store_error"])
            .get();
        record_citation_outcome(CitationOutcome::StoreError);
        let after = CITATION_DOCUMENTS_TOTAL
            .with_label_values(&["store_error"])
            .get();
        assert!(after >= before + 1.0);
    }
}
