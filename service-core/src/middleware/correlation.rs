use crate::error::AppError;
use axum::async_trait;
use axum::extract::{FromRequestParts, Request};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use tracing::Span;

pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// Caller-supplied correlation id, required on data endpoints.
///
/// Rejects with [`AppError::MissingHeader`] when the header is absent or
/// blank, so the handler body never runs. Non-ASCII bytes are decoded
/// leniently as UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = read_correlation_id(&parts.headers)
            .ok_or(AppError::MissingHeader(CORRELATION_ID_HEADER))?;

        Span::current().record("correlation_id", value.as_str());

        Ok(CorrelationId(value))
    }
}

/// Trimmed header value, `None` when absent or blank.
fn read_correlation_id(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(CORRELATION_ID_HEADER)?;
    let value = String::from_utf8_lossy(raw.as_bytes());
    let value = value.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Span factory for `TraceLayer::make_span_with`.
///
/// Leaves `correlation_id` empty when the header is missing; the extractor
/// fills it in for routes that require it.
pub fn correlation_span(req: &Request) -> Span {
    let correlation_id = read_correlation_id(req.headers());

    let span = tracing::info_span!(
        "http_request",
        method = %req.method(),
        path = %req.uri().path(),
        correlation_id = tracing::field::Empty,
    );

    if let Some(id) = correlation_id {
        span.record("correlation_id", id.as_str());
    }

    span
}
