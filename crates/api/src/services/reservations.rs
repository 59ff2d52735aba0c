use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::AppError;
use infra::models::{time_of_day, ReservationFields, ReservationRow};
use infra::repos::{reservations, ReservationStatus};

/// Reservation body as sent by clients. Every field is optional here so that
/// a missing or malformed one yields a message naming it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub people: Option<Value>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusPayload {
    pub status: Option<String>,
}

impl ReservationPayload {
    pub fn validate(&self) -> Result<ReservationFields, AppError> {
        let first_name = required_text(&self.first_name, "first_name")?;
        let last_name = required_text(&self.last_name, "last_name")?;
        let mobile_number = required_text(&self.mobile_number, "mobile_number")?;

        let raw_date = required_text(&self.reservation_date, "reservation_date")?;
        let reservation_date = parse_date(raw_date.trim())?;

        let raw_time = required_text(&self.reservation_time, "reservation_time")?;
        let reservation_time = time_of_day::parse(raw_time.trim()).ok_or_else(|| {
            AppError::BadRequest(format!("reservation_time '{raw_time}' is not a valid time"))
        })?;

        let people = self
            .people
            .as_ref()
            .and_then(Value::as_i64)
            .filter(|n| *n >= 1)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| AppError::BadRequest("people must be a positive integer".to_string()))?;

        Ok(ReservationFields {
            first_name,
            last_name,
            mobile_number,
            reservation_date,
            reservation_time,
            people,
        })
    }

    /// New reservations always start out booked.
    pub fn initial_status(&self) -> Result<ReservationStatus, AppError> {
        match self.status.as_deref() {
            None | Some("booked") => Ok(ReservationStatus::Booked),
            Some(other) => Err(AppError::BadRequest(format!(
                "a new reservation cannot have status '{other}'"
            ))),
        }
    }
}

fn required_text(value: &Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.clone()),
        _ => Err(AppError::BadRequest(format!("{field} is required"))),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("reservation_date '{raw}' is not a valid date")))
}

/// Path ids are numeric; anything else cannot name a reservation.
pub fn parse_reservation_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::NotFound(format!("Reservation {raw} cannot be found.")))
}

pub async fn read_existing(pool: &PgPool, reservation_id: i32) -> Result<ReservationRow, AppError> {
    reservations::read(pool, reservation_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {reservation_id} cannot be found.")))
}

pub async fn create(pool: &PgPool, payload: &ReservationPayload) -> Result<ReservationRow, AppError> {
    let fields = payload.validate()?;
    let status = payload.initial_status()?;

    let row = reservations::create(pool, &fields, status).await?;
    tracing::info!(
        reservation_id = row.reservation_id,
        date = %row.reservation_date,
        "Reservation created"
    );
    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    reservation_id: i32,
    payload: &ReservationPayload,
) -> Result<ReservationRow, AppError> {
    let fields = payload.validate()?;

    reservations::update(pool, reservation_id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {reservation_id} cannot be found.")))
}

pub async fn update_status(
    pool: &PgPool,
    reservation_id: i32,
    payload: &StatusPayload,
) -> Result<ReservationRow, AppError> {
    let current = read_existing(pool, reservation_id).await?;
    if current.status == ReservationStatus::Finished {
        return Err(AppError::BadRequest(
            "a finished reservation cannot be updated".to_string(),
        ));
    }

    let raw = payload
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?;
    let status: ReservationStatus = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown status: {raw}")))?;

    let row = reservations::update_status(pool, reservation_id, status)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("Reservation {reservation_id} cannot be found.")))?;

    tracing::info!(reservation_id, status = %row.status, "Reservation status updated");
    Ok(row)
}
