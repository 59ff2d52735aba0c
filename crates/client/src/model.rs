use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Finished,
    Cancelled,
}

/// A reservation as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i32,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn fields(&self) -> ReservationFields {
        ReservationFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            mobile_number: self.mobile_number.clone(),
            reservation_date: self.reservation_date.clone(),
            reservation_time: self.reservation_time.clone(),
            people: self.people,
        }
    }
}

/// The fields a client may send on create or update. It has no id or status,
/// so an update can never carry them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReservationFields {
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub reservation_date: String,
    pub reservation_time: String,
    pub people: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub table_id: i32,
    pub table_name: String,
    pub capacity: i32,
    pub reservation_id: Option<i32>,
}
