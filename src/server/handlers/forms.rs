//! Browser-facing form handlers: menu, editor, print document, completion.

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::OverprintError;
use crate::form::FormInput;
use crate::print::{ImageMode, PrintComposer};
use crate::room::{Advance, room_number};
use crate::server::pages::{self, FormPage, ROOM_CONFLICT_NOTICE};
use crate::server::state::AppState;
use crate::templates::{FormContext, Template};

use super::{HandlerError, error_response, lookup, prepare_input};

/// Query value marking a redirect after a lost room race.
const ROOM_CONFLICT: &str = "room-conflict";

/// GET /
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::home(state.boot_time))
}

/// Fresh context plus normalized state for one request.
async fn form_state(state: &AppState, template: &dyn Template, raw: &FormInput) -> (Option<usize>, FormInput) {
    let room_index = state.room_index(template).await;
    let ctx = FormContext::new(crate::format::today(), room_index.map(room_number));
    let input = prepare_input(template, raw, &template.defaults(&ctx));
    (room_index, input)
}

/// GET /templates/:id
///
/// The query string carries the whole form state; unknown keys are dropped
/// and `debug=1` turns on the coordinate picker.
pub async fn editor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(raw): Query<FormInput>,
) -> Result<Html<String>, HandlerError> {
    let template = lookup(&id)?;
    let (room_index, input) = form_state(&state, template, &raw).await;
    let resolved = template.resolve(&input);
    let load = state.preview_state(&template.page_images()).await;

    let page = FormPage {
        template,
        input: &input,
        resolved: &resolved,
        load: &load,
        debug: raw.text("debug") == "1",
        room_index,
        notice: (raw.text("notice") == ROOM_CONFLICT).then_some(ROOM_CONFLICT_NOTICE),
        asset_version: state.boot_time,
    };
    Ok(Html(page.render()))
}

/// GET /templates/:id/print
///
/// Waits for every page image before composing; `images=inline` embeds
/// them so the document prints without the server.
pub async fn print(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(raw): Query<FormInput>,
) -> Result<Html<String>, HandlerError> {
    let template = lookup(&id)?;
    let (_, input) = form_state(&state, template, &raw).await;
    let resolved = template.resolve(&input);

    let pages = state
        .print_gate
        .wait(&state.loader, &template.page_images())
        .await
        .map_err(error_response)?;

    let mode = if raw.text("images") == "inline" {
        ImageMode::Inline
    } else {
        ImageMode::Linked
    };
    tracing::info!(template = template.id(), pages = pages.len(), "print document composed");
    Ok(Html(PrintComposer::new(&resolved).auto_print(true).compose_pages(&pages, mode)))
}

/// Body of the completion form.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteForm {
    /// Rotation index the editor was showing
    #[serde(rename = "roomIndex")]
    pub room_index: Option<usize>,
}

/// POST /templates/:id/complete
///
/// Ends a print cycle. Templates on the room rotation advance it from the
/// index the editor showed; a lost race redirects with a notice.
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(body): Form<CompleteForm>,
) -> Result<Redirect, HandlerError> {
    let template = lookup(&id)?;
    let fresh = format!("/templates/{}", template.id());
    if !template.uses_room_counter() {
        return Ok(Redirect::to(&fresh));
    }

    let rooms = state.rooms.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let expected = match body.room_index {
            Some(index) => index,
            None => rooms.peek()?,
        };
        rooms.advance(expected)
    })
    .await
    .map_err(|e| error_response(OverprintError::Room(e.to_string())))?
    .map_err(error_response)?;

    match outcome {
        Advance::Advanced { index } => {
            tracing::info!(template = template.id(), room = room_number(index), "next room");
            Ok(Redirect::to(&fresh))
        }
        Advance::Conflict { current } => {
            tracing::warn!(template = template.id(), room = room_number(current), "room already taken");
            Ok(Redirect::to(&format!("{}?notice={}", fresh, ROOM_CONFLICT)))
        }
    }
}
