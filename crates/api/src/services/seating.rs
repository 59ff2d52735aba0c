use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::AppError;
use infra::models::TableRow;
use infra::repos::{reservations, tables, CreateTable, ReservationStatus};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TablePayload {
    pub table_name: Option<String>,
    pub capacity: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatPayload {
    pub reservation_id: Option<i32>,
}

impl TablePayload {
    pub fn validate(&self) -> Result<CreateTable, AppError> {
        let table_name = self
            .table_name
            .as_deref()
            .map(str::trim)
            .filter(|name| name.chars().count() >= 2)
            .ok_or_else(|| {
                AppError::BadRequest("table_name must be at least 2 characters".to_string())
            })?
            .to_string();

        let capacity = self
            .capacity
            .as_ref()
            .and_then(Value::as_i64)
            .filter(|n| *n >= 1)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| AppError::BadRequest("capacity must be a positive integer".to_string()))?;

        Ok(CreateTable {
            table_name,
            capacity,
        })
    }
}

pub async fn create_table(pool: &PgPool, payload: &TablePayload) -> Result<TableRow, AppError> {
    let data = payload.validate()?;
    let row = tables::create(pool, data).await?;
    tracing::info!(table_id = row.table_id, name = %row.table_name, "Table created");
    Ok(row)
}

/// Seat a reservation at a table: the table takes the reservation and the
/// reservation becomes `seated`, both or neither. Only `booked` reservations
/// can be seated. Both rows are locked, so a second seating of the same
/// reservation waits and then sees it `seated`.
pub async fn seat(
    pool: &PgPool,
    table_id: i32,
    payload: &SeatPayload,
) -> Result<TableRow, AppError> {
    let reservation_id = payload
        .reservation_id
        .ok_or_else(|| AppError::BadRequest("reservation_id is required".to_string()))?;

    let mut tx = pool.begin().await?;

    let table = tables::get_for_update(&mut *tx, table_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {table_id} cannot be found.")))?;

    let reservation = reservations::read_for_update(&mut *tx, reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Reservation {reservation_id} cannot be found."))
        })?;

    if table.is_occupied() {
        return Err(AppError::BadRequest(format!(
            "Table {} is occupied",
            table.table_name
        )));
    }
    if reservation.people > table.capacity {
        return Err(AppError::BadRequest(format!(
            "Table {} does not have sufficient capacity for {} people",
            table.table_name, reservation.people
        )));
    }
    if reservation.status != ReservationStatus::Booked {
        return Err(AppError::BadRequest(format!(
            "Reservation {reservation_id} is {}",
            reservation.status
        )));
    }

    let seated = tables::seat(&mut *tx, table_id, reservation_id).await?;
    reservations::update_status(&mut *tx, reservation_id, ReservationStatus::Seated).await?;

    tx.commit().await?;

    tracing::info!(table_id, reservation_id, "Reservation seated");
    Ok(seated)
}

/// Free a table and mark its reservation `finished`.
pub async fn finish(pool: &PgPool, table_id: i32) -> Result<TableRow, AppError> {
    let mut tx = pool.begin().await?;

    let table = tables::get_for_update(&mut *tx, table_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {table_id} cannot be found.")))?;

    let reservation_id = table.reservation_id.ok_or_else(|| {
        AppError::BadRequest(format!("Table {} is not occupied", table.table_name))
    })?;

    let freed = tables::clear(&mut *tx, table_id).await?;
    reservations::update_status(&mut *tx, reservation_id, ReservationStatus::Finished).await?;

    tx.commit().await?;

    tracing::info!(table_id, reservation_id, "Table finished");
    Ok(freed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_payload_requires_name_and_capacity() {
        let ok: TablePayload =
            serde_json::from_value(json!({ "table_name": "Bar #1", "capacity": 4 })).unwrap();
        let data = ok.validate().unwrap();
        assert_eq!(data.table_name, "Bar #1");
        assert_eq!(data.capacity, 4);

        let short: TablePayload =
            serde_json::from_value(json!({ "table_name": "A", "capacity": 4 })).unwrap();
        assert!(short.validate().is_err());

        let empty: TablePayload =
            serde_json::from_value(json!({ "table_name": "Patio", "capacity": 0 })).unwrap();
        let err = empty.validate().unwrap_err();
        assert_eq!(err.to_string(), "capacity must be a positive integer");
    }
}
