use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{Envelope, RequestBody};
use crate::error::AppError;
use crate::services::seating::{self, SeatPayload, TablePayload};
use crate::state::AppState;
use infra::repos::tables;

fn parse_table_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("Table {raw} cannot be found.")))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = tables::list(&state.db).await?;
    Ok(Json(Envelope::new(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let table_id = parse_table_id(&raw_id)?;
    let row = tables::get_by_id(&state.db, table_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {raw_id} cannot be found.")))?;
    Ok(Json(Envelope::new(row)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<RequestBody<TablePayload>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let row = seating::create_table(&state.db, &body.into_data()?).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(row))))
}

pub async fn seat(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<RequestBody<SeatPayload>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let table_id = parse_table_id(&raw_id)?;
    let Json(body) = body?;
    let row = seating::seat(&state.db, table_id, &body.into_data()?).await?;
    Ok(Json(Envelope::new(row)))
}

pub async fn finish(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let table_id = parse_table_id(&raw_id)?;
    let row = seating::finish(&state.db, table_id).await?;
    Ok(Json(Envelope::new(row)))
}
