use crate::models::Person;
use crate::services::PersonStore;
use crate::startup::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use service_core::error::AppError;
use service_core::middleware::CorrelationId;

pub const LOCATION_HEADER: &str = "MyLocation";
pub const LOCATION: &str = "http://example.com/some/uri";
pub const NULL_PERSON_MESSAGE: &str = "person is null and that is just not cool!";

pub async fn list_personer(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(correlation_id = %correlation_id, "GET /personer called");

    let people = state.store.find_all().await.map_err(|e| {
        tracing::error!(correlation_id = %correlation_id, "Failed to fetch people: {}", e);
        e
    })?;

    tracing::info!(correlation_id = %correlation_id, count = people.len(), "Fetched people");
    Ok((StatusCode::OK, [(LOCATION_HEADER, LOCATION)], Json(people)))
}

pub async fn save_person(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(correlation_id = %correlation_id, "POST /personer called");

    let person = parse_person(&body).map_err(|e| {
        tracing::info!(correlation_id = %correlation_id, "{}", e);
        e
    })?;

    let saved = state.store.save(person).await.map_err(|e| {
        tracing::error!(correlation_id = %correlation_id, "Failed to save person: {}", e);
        e
    })?;

    tracing::info!(correlation_id = %correlation_id, id = ?saved.id, "Saved person");
    Ok((StatusCode::OK, [(LOCATION_HEADER, LOCATION)], Json(saved)))
}

/// An empty body and a JSON `null` both mean "no person".
fn parse_person(body: &[u8]) -> Result<Person, AppError> {
    let value: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid person payload: {}", e)))?
    };

    match value {
        Value::Null => Err(AppError::BadRequest(NULL_PERSON_MESSAGE.to_string())),
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| AppError::BadRequest(format!("Invalid person payload: {}", e))),
        _ => Err(AppError::BadRequest(
            "Invalid person payload: expected a JSON object".to_string(),
        )),
    }
}
