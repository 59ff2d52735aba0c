use crate::models::{ReservationFields, ReservationRow};
use chrono::NaiveDate;
use sqlx::{PgExecutor, Result as SqlxResult};
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::Type, serde::Serialize, serde::Deserialize,
)]
#[sqlx(type_name = "reservation_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Booked,
    Seated,
    Finished,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Booked => "booked",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Finished => "finished",
            ReservationStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booked" => Ok(ReservationStatus::Booked),
            "seated" => Ok(ReservationStatus::Seated),
            "finished" => Ok(ReservationStatus::Finished),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            _ => Err(format!("Unknown reservation status: {}", s)),
        }
    }
}

/// `LIKE` pattern matching any stored number whose digits contain the
/// digits of `number`.
pub fn phone_pattern(number: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("%{digits}%")
}

/// Reservations on `date` that are still actionable, earliest first.
pub async fn search_by_date<'e>(
    executor: impl PgExecutor<'e>,
    date: NaiveDate,
) -> SqlxResult<Vec<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        SELECT reservation_id, first_name, last_name, mobile_number, reservation_date,
               reservation_time, people, status, created_at, updated_at
        FROM reservations
        WHERE reservation_date = $1 AND status <> 'finished'
        ORDER BY reservation_time ASC
        "#,
    )
    .bind(date)
    .fetch_all(executor)
    .await
}

/// Partial match on the digits of the stored mobile number.
pub async fn search_by_phone<'e>(
    executor: impl PgExecutor<'e>,
    mobile_number: &str,
) -> SqlxResult<Vec<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        SELECT reservation_id, first_name, last_name, mobile_number, reservation_date,
               reservation_time, people, status, created_at, updated_at
        FROM reservations
        WHERE translate(mobile_number, '() -', '') LIKE $1
        ORDER BY reservation_date ASC
        "#,
    )
    .bind(phone_pattern(mobile_number))
    .fetch_all(executor)
    .await
}

pub async fn read<'e>(
    executor: impl PgExecutor<'e>,
    reservation_id: i32,
) -> SqlxResult<Option<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        SELECT reservation_id, first_name, last_name, mobile_number, reservation_date,
               reservation_time, people, status, created_at, updated_at
        FROM reservations
        WHERE reservation_id = $1
        "#,
    )
    .bind(reservation_id)
    .fetch_optional(executor)
    .await
}

/// Same as `read` but locks the row for the rest of the transaction.
pub async fn read_for_update<'e>(
    executor: impl PgExecutor<'e>,
    reservation_id: i32,
) -> SqlxResult<Option<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        SELECT reservation_id, first_name, last_name, mobile_number, reservation_date,
               reservation_time, people, status, created_at, updated_at
        FROM reservations
        WHERE reservation_id = $1
        FOR UPDATE
        "#,
    )
    .bind(reservation_id)
    .fetch_optional(executor)
    .await
}

pub async fn create<'e>(
    executor: impl PgExecutor<'e>,
    data: &ReservationFields,
    status: ReservationStatus,
) -> SqlxResult<ReservationRow> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        INSERT INTO reservations (
            first_name, last_name, mobile_number, reservation_date,
            reservation_time, people, status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING reservation_id, first_name, last_name, mobile_number, reservation_date,
                  reservation_time, people, status, created_at, updated_at
        "#,
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(data.reservation_date)
    .bind(data.reservation_time)
    .bind(data.people)
    .bind(status)
    .fetch_one(executor)
    .await
}

/// Sets only the status column. No transition rules are applied here.
pub async fn update_status<'e>(
    executor: impl PgExecutor<'e>,
    reservation_id: i32,
    status: ReservationStatus,
) -> SqlxResult<Vec<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        UPDATE reservations
        SET status = $2, updated_at = NOW()
        WHERE reservation_id = $1
        RETURNING reservation_id, first_name, last_name, mobile_number, reservation_date,
                  reservation_time, people, status, created_at, updated_at
        "#,
    )
    .bind(reservation_id)
    .bind(status)
    .fetch_all(executor)
    .await
}

pub async fn update<'e>(
    executor: impl PgExecutor<'e>,
    reservation_id: i32,
    data: &ReservationFields,
) -> SqlxResult<Option<ReservationRow>> {
    sqlx::query_as::<_, ReservationRow>(
        r#"
        UPDATE reservations
        SET first_name = $2,
            last_name = $3,
            mobile_number = $4,
            reservation_date = $5,
            reservation_time = $6,
            people = $7,
            updated_at = NOW()
        WHERE reservation_id = $1
        RETURNING reservation_id, first_name, last_name, mobile_number, reservation_date,
                  reservation_time, people, status, created_at, updated_at
        "#,
    )
    .bind(reservation_id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.mobile_number)
    .bind(data.reservation_date)
    .bind(data.reservation_time)
    .bind(data.people)
    .fetch_optional(executor)
    .await
}
