use crate::repos::reservations::ReservationStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ReservationRow {
    pub reservation_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub reservation_time: NaiveTime,
    pub people: i32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReservationRow {
    /// The editable subset of this row.
    pub fn fields(&self) -> ReservationFields {
        ReservationFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            mobile_number: self.mobile_number.clone(),
            reservation_date: self.reservation_date,
            reservation_time: self.reservation_time,
            people: self.people,
        }
    }
}

/// Fields a caller may set on create or replace on update. Identifiers,
/// status and timestamps are owned by the store and never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationFields {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: NaiveDate,
    #[serde(with = "time_of_day")]
    pub reservation_time: NaiveTime,
    pub people: i32,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TableRow {
    pub table_id: i32,
    pub table_name: String,
    pub capacity: i32,
    pub reservation_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TableRow {
    pub fn is_occupied(&self) -> bool {
        self.reservation_id.is_some()
    }
}

/// `HH:MM` on the wire; `HH:MM:SS` is accepted when reading.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(s: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid time of day: {s}")))
    }
}
