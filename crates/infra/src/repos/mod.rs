pub mod reservations;
pub mod tables;

pub use reservations::ReservationStatus;
pub use tables::CreateTable;
