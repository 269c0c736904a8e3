//! Coordinate picker endpoint.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::overlay::picker::{self, PickResult, PointerEvent};

use super::HandlerError;

#[derive(Debug, Deserialize)]
pub struct PickRequest {
    /// Preview scale the events were captured at
    pub scale: f64,
    pub events: Vec<PointerEvent>,
}

#[derive(Debug, Serialize)]
pub struct PickResponse {
    pub picks: Vec<PickResult>,
    /// Human-readable line per pick
    pub lines: Vec<String>,
}

/// POST /api/debug/pick
pub async fn pick(Json(request): Json<PickRequest>) -> Result<Json<PickResponse>, HandlerError> {
    if !(request.scale.is_finite() && request.scale > 0.0) {
        return Err((StatusCode::BAD_REQUEST, format!("invalid scale {}", request.scale)));
    }
    let picks = picker::replay(request.scale, request.events);
    let lines = picks.iter().map(PickResult::describe).collect();
    Ok(Json(PickResponse { picks, lines }))
}
