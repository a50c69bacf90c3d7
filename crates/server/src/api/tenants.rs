//! Tenant listing API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use aperta_core::SelectableTenant;

use crate::state::AppState;

#[derive(Serialize)]
pub struct TenantsResponse {
    pub tenants: Vec<SelectableTenant>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /api/tenants
///
/// List selectable tenants with their last known campaign counts. Counts
/// come from the background refresh loop; before the first refresh lands
/// the listing is computed inline.
pub async fn list_tenants(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TenantsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let cached = state.cached_tenants().await;
    if !cached.is_empty() {
        return Ok(Json(TenantsResponse { tenants: cached }));
    }

    match state.runner().list_selectable_tenants().await {
        Ok(tenants) => {
            state.set_cached_tenants(tenants.clone()).await;
            Ok(Json(TenantsResponse { tenants }))
        }
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse { error: e.to_string() }),
        )),
    }
}
