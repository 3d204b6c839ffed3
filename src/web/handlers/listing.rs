//! Per-module listing handler.
//!
//! `GET /v1/:modulo/registros` with `page`/`pageSize` pagination, optional
//! `filtro_<column>` substring filters, and `ordenColumna`/`ordenAsc`
//! sorting. Reads the main store only; reflects current store state with
//! no further invariant.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::query::ListQuery;
use crate::registry;
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub datos: Vec<Value>,
    pub total: i64,
    pub page: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
}

pub async fn list_records(
    State(state): State<AppState>,
    Path(modulo): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListResponse>> {
    let spec = registry::find_module(&modulo)
        .ok_or_else(|| ApiError::not_found(format!("Unknown module: {modulo}")))?;

    let query = ListQuery::from_params(
        spec,
        &params,
        state.config.default_page_size,
        state.config.max_page_size,
    )
    .map_err(|e| ApiError::bad_request(e.to_string()))?;

    debug!(
        module = spec.slug,
        page = query.page,
        page_size = query.page_size,
        filters = query.filters.len(),
        order_by = %query.order_by,
        "Listing records"
    );

    let page = state
        .main_store
        .list_records(spec, &query)
        .await
        .map_err(|e| {
            error!(module = spec.slug, error = %e, "Failed to list records");
            ApiError::database_error("Failed to retrieve record list")
        })?;

    Ok(Json(ListResponse {
        success: true,
        datos: page.datos,
        total: page.total,
        page: query.page,
        page_size: query.page_size,
    }))
}
