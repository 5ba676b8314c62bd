use axum::Json;

use crate::dto::GenericMessageResponse;

/// GET /health - Liveness probe.
pub async fn health_handler() -> Json<GenericMessageResponse> {
    Json(GenericMessageResponse {
        message: "ok".to_owned(),
    })
}
