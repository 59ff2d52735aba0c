//! Client side of the reservation service: a typed HTTP client and the
//! controller behind the staff reservation form.

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod time;

pub use api::{HttpClient, ReservationsApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use form::{Field, FormMode, FormState, Navigation, ReservationForm, UnmountHandle};
pub use model::{Reservation, ReservationFields, ReservationStatus, Table};
