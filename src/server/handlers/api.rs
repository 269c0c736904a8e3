//! JSON API handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;

use crate::form::{FieldSequence, FormInput, InputSpec};
use crate::room::{self, room_number};
use crate::schema::Resolved;
use crate::server::state::AppState;
use crate::templates::{self, TemplateInfo};

use super::{HandlerError, error_response, lookup, prepare_input};

/// GET /api/templates
pub async fn list() -> Json<Vec<TemplateInfo>> {
    Json(templates::all().iter().map(|t| TemplateInfo::of(*t)).collect())
}

/// Full description of one template.
#[derive(Debug, Serialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub info: TemplateInfo,
    pub page_images: Vec<String>,
    pub inputs: &'static [InputSpec],
    /// Initial state for a fresh form
    pub defaults: FormInput,
}

/// GET /api/templates/:id
pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<TemplateDetail>, HandlerError> {
    let template = lookup(&id)?;
    let ctx = state.form_context(template).await;
    Ok(Json(TemplateDetail {
        info: TemplateInfo::of(template),
        page_images: template.page_images().as_slice().to_vec(),
        inputs: template.inputs(),
        defaults: template.defaults(&ctx),
    }))
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// State after masks and defaults
    pub input: FormInput,
    pub resolved: Resolved,
    /// Cursor path through the visible inputs
    pub focus: Vec<&'static str>,
}

/// POST /api/templates/:id/resolve
pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(raw): Json<FormInput>,
) -> Result<Json<ResolveResponse>, HandlerError> {
    let template = lookup(&id)?;
    let ctx = state.form_context(template).await;
    let input = prepare_input(template, &raw, &template.defaults(&ctx));
    let resolved = template.resolve(&input);
    let focus = FieldSequence::new(template.inputs(), &input).names().to_vec();
    Ok(Json(ResolveResponse { input, resolved, focus }))
}

#[derive(Debug, Serialize)]
pub struct RoomStatus {
    pub index: usize,
    pub room: u16,
    pub rotation: usize,
}

/// GET /api/room
pub async fn room(State(state): State<Arc<AppState>>) -> Result<Json<RoomStatus>, HandlerError> {
    let index = state.peek_room().await.map_err(error_response)?;
    Ok(Json(RoomStatus {
        index,
        room: room_number(index),
        rotation: room::ROTATION_LEN,
    }))
}
