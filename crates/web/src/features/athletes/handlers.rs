use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::results::AthleteHistoryEntry, models::Cpf};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/athletes/{cpf}/results",
    params(
        ("cpf" = String, Path, description = "Athlete CPF, punctuated or digits only")
    ),
    responses(
        (status = 200, description = "Results in events with published results", body = Vec<AthleteHistoryEntry>),
        (status = 400, description = "Invalid CPF")
    ),
    tag = "athletes"
)]
pub async fn get_athlete_history(
    State(db): State<Database>,
    Path(cpf): Path<String>,
) -> Result<Response, WebError> {
    let cpf = Cpf::parse(&cpf).map_err(|e| WebError::BadRequest(format!("invalid CPF: {}", e)))?;

    let history = services::get_athlete_history(db.pool(), &cpf).await?;

    Ok(Json(history).into_response())
}
