use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::ranking::EventRankings};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/rankings",
    params(
        ("event_id" = i64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Overall and category boards of the event", body = EventRankings),
        (status = 404, description = "Event not found")
    ),
    tag = "rankings"
)]
pub async fn get_event_rankings(
    State(db): State<Database>,
    Path(event_id): Path<i64>,
) -> Result<Response, WebError> {
    let rankings = services::get_event_rankings(db.pool(), event_id).await?;

    Ok(Json(rankings).into_response())
}
