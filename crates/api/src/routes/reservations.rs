use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{Envelope, RequestBody};
use crate::error::AppError;
use crate::services::reservations::{
    self as service, parse_date, parse_reservation_id, ReservationPayload, StatusPayload,
};
use crate::state::AppState;
use infra::repos::reservations;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub date: Option<String>,
    pub mobile_number: Option<String>,
}

/// `mobile_number` takes precedence over `date`; with neither, today's
/// reservations are listed.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let rows = match (query.mobile_number, query.date) {
        (Some(number), _) => reservations::search_by_phone(&state.db, &number).await?,
        (None, Some(date)) => reservations::search_by_date(&state.db, parse_date(&date)?).await?,
        (None, None) => {
            let today = chrono::Local::now().date_naive();
            reservations::search_by_date(&state.db, today).await?
        }
    };

    Ok(Json(Envelope::new(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let reservation_id = parse_reservation_id(&raw_id)?;
    let row = service::read_existing(&state.db, reservation_id).await?;
    Ok(Json(Envelope::new(row)))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<RequestBody<ReservationPayload>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let row = service::create(&state.db, &body.into_data()?).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new(row))))
}

pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<RequestBody<ReservationPayload>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let reservation_id = parse_reservation_id(&raw_id)?;
    let Json(body) = body?;
    let row = service::update(&state.db, reservation_id, &body.into_data()?).await?;
    Ok(Json(Envelope::new(row)))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<RequestBody<StatusPayload>>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let reservation_id = parse_reservation_id(&raw_id)?;
    let Json(body) = body?;
    let row = service::update_status(&state.db, reservation_id, &body.into_data()?).await?;
    Ok(Json(Envelope::new(row)))
}
