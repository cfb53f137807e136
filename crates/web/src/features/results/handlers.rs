use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use importer::{ImportSummary, RowError};
use serde::Serialize;
use storage::{Database, dto::results::AthleteStanding, models::Cpf};
use utoipa::ToSchema;

use crate::error::WebError;

use super::services;

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    pub event_id: i64,
    pub persisted: usize,
    pub replaced: u64,
    #[schema(value_type = Object)]
    pub summary: ImportSummary,
    /// Rejected rows, in file order
    #[schema(value_type = Vec<Object>)]
    pub errors: Vec<RowError>,
}

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/results/{cpf}",
    params(
        ("event_id" = i64, Path, description = "Event id"),
        ("cpf" = String, Path, description = "Athlete CPF, punctuated or digits only")
    ),
    responses(
        (status = 200, description = "The athlete's placement in the event", body = AthleteStanding),
        (status = 400, description = "Invalid CPF"),
        (status = 404, description = "No result for this athlete in the event")
    ),
    tag = "results"
)]
pub async fn get_athlete_standing(
    State(db): State<Database>,
    Path((event_id, cpf)): Path<(i64, String)>,
) -> Result<Response, WebError> {
    let cpf = Cpf::parse(&cpf).map_err(|e| WebError::BadRequest(format!("invalid CPF: {}", e)))?;

    let standing = services::get_athlete_standing(db.pool(), &cpf, event_id)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Json(standing).into_response())
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/results/import",
    params(
        ("event_id" = i64, Path, description = "Event id")
    ),
    request_body(content = String, content_type = "text/csv", description = "Rows of `<cpf>,<HH:MM:SS>`, header optional"),
    responses(
        (status = 200, description = "Results stored, replacing the previous ones", body = ImportResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Event day has not started yet"),
        (status = 422, description = "No valid row in the file")
    ),
    security(("bearer_auth" = [])),
    tag = "results"
)]
pub async fn import_results(
    State(db): State<Database>,
    Path(event_id): Path<i64>,
    body: Bytes,
) -> Result<Response, WebError> {
    let report = services::import_results(&db, event_id, &body).await?;

    tracing::info!(
        "Event {}: imported {} results via API ({} rows rejected)",
        event_id,
        report.persisted,
        report.errors.len()
    );

    let response = ImportResponse {
        event_id: report.event_id,
        persisted: report.persisted,
        replaced: report.replaced,
        summary: report.summary(),
        errors: report.errors,
    };

    Ok(Json(response).into_response())
}
