//! Supervision decision handler.
//!
//! `POST /v1/:modulo/supervision?action=aprobar|rechazar` with a JSON body
//! carrying the record id under the module's primary-key column (or a
//! generic `id` fallback). Input problems are 4xx before any store is
//! touched; once input validates, the response is always 200 with the
//! reconciliation outcome, including `success:false` plus warnings when
//! nothing could be applied.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use tracing::info;

use crate::reconciliation::{ReconciliationOutcome, SupervisionAction};
use crate::registry::{self, TableSpec};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

pub async fn decide_supervision(
    State(state): State<AppState>,
    Path(modulo): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    body: Option<Json<Value>>,
) -> ApiResult<Json<ReconciliationOutcome>> {
    let spec = registry::find_module(&modulo)
        .filter(|spec| spec.supervised)
        .ok_or_else(|| ApiError::not_found(format!("Unknown supervised module: {modulo}")))?;

    let body = body.map(|Json(value)| value).unwrap_or(Value::Null);

    let action_raw = params
        .get("action")
        .cloned()
        .or_else(|| {
            body.get("action")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .ok_or_else(|| ApiError::bad_request("Missing action parameter"))?;

    let action = SupervisionAction::parse(&action_raw)
        .ok_or_else(|| ApiError::bad_request(format!("Unsupported action: {action_raw}")))?;

    let id = extract_id(spec, &body)?;

    info!(
        module = spec.slug,
        action = action.as_str(),
        id = %id,
        "Supervision decision requested"
    );

    let outcome = state.engine.decide(spec, action, &id).await;

    Ok(Json(outcome))
}

/// Pull the record id out of the body: the module's primary-key column
/// first, generic `id` as fallback. Numbers are accepted and rendered as
/// text; blank ids are rejected.
fn extract_id(spec: &TableSpec, body: &Value) -> Result<String, ApiError> {
    let raw = body.get(spec.primary_key).or_else(|| body.get("id"));

    let id = match raw {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    if id.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing record id: expected \"{}\" or \"id\" in the request body",
            spec.primary_key
        )));
    }

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> &'static TableSpec {
        registry::find_module("agronomia").unwrap()
    }

    #[test]
    fn test_extract_id_from_primary_key_column() {
        let id = extract_id(spec(), &json!({ "plagas_id": "42" })).unwrap();
        assert_eq!(id, "42");
    }

    #[test]
    fn test_extract_id_generic_fallback() {
        let id = extract_id(spec(), &json!({ "id": "7" })).unwrap();
        assert_eq!(id, "7");
    }

    #[test]
    fn test_extract_id_accepts_numbers() {
        let id = extract_id(spec(), &json!({ "plagas_id": 42 })).unwrap();
        assert_eq!(id, "42");
    }

    #[test]
    fn test_extract_id_trims_whitespace() {
        let id = extract_id(spec(), &json!({ "plagas_id": "  42  " })).unwrap();
        assert_eq!(id, "42");
    }

    #[test]
    fn test_extract_id_rejects_blank_and_missing() {
        assert!(extract_id(spec(), &json!({ "plagas_id": "   " })).is_err());
        assert!(extract_id(spec(), &json!({})).is_err());
        assert!(extract_id(spec(), &Value::Null).is_err());
    }

    #[test]
    fn test_primary_key_takes_precedence_over_id() {
        let id = extract_id(spec(), &json!({ "plagas_id": "42", "id": "99" })).unwrap();
        assert_eq!(id, "42");
    }
}
