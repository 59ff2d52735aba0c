//! Controller for the create/edit reservation form.
//!
//! The form owns a [`CancellationToken`]. Every request it makes runs under a
//! child of that token, and unmounting the form (explicitly or by dropping
//! it) cancels the token, so a response that arrives after the view is gone
//! never touches form state.

use std::future::Future;
use std::str::FromStr;

use tokio_util::sync::CancellationToken;

use crate::api::ReservationsApi;
use crate::error::ClientError;
use crate::model::ReservationFields;
use crate::time::to_24_hour;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { reservation_id: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Loading,
    Submitting,
    Error(String),
}

/// Where the view should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Dashboard { date: String },
    Back,
}

impl Navigation {
    /// Route for the navigation, `None` for history back.
    pub fn path(&self) -> Option<String> {
        match self {
            Navigation::Dashboard { date } => Some(format!("/dashboard?date={date}")),
            Navigation::Back => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    MobileNumber,
    ReservationDate,
    ReservationTime,
    People,
}

impl FromStr for Field {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_name" => Ok(Field::FirstName),
            "last_name" => Ok(Field::LastName),
            "mobile_number" => Ok(Field::MobileNumber),
            "reservation_date" => Ok(Field::ReservationDate),
            "reservation_time" => Ok(Field::ReservationTime),
            "people" => Ok(Field::People),
            _ => Err(ClientError::InvalidField(s.to_string())),
        }
    }
}

/// Cancels the owning form's requests from outside the form.
#[derive(Debug, Clone)]
pub struct UnmountHandle(CancellationToken);

impl UnmountHandle {
    pub fn unmount(&self) {
        self.0.cancel();
    }
}

pub struct ReservationForm<A> {
    api: A,
    mode: FormMode,
    fields: ReservationFields,
    state: FormState,
    scope: CancellationToken,
}

/// Blank form: today's date, party of one.
pub fn initial_fields() -> ReservationFields {
    ReservationFields {
        reservation_date: chrono::Local::now().date_naive().format("%Y-%m-%d").to_string(),
        people: 1,
        ..ReservationFields::default()
    }
}

async fn scoped<T>(
    token: CancellationToken,
    request: impl Future<Output = Result<T, ClientError>>,
) -> Result<T, ClientError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = request => result,
    }
}

impl<A: ReservationsApi> ReservationForm<A> {
    pub fn new(api: A, mode: FormMode) -> Self {
        Self {
            api,
            mode,
            fields: initial_fields(),
            state: FormState::Idle,
            scope: CancellationToken::new(),
        }
    }

    pub fn create(api: A) -> Self {
        Self::new(api, FormMode::Create)
    }

    pub fn edit(api: A, reservation_id: i32) -> Self {
        Self::new(api, FormMode::Edit { reservation_id })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &ReservationFields {
        &self.fields
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Message for the alert region, if the last operation failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            FormState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn unmount_handle(&self) -> UnmountHandle {
        UnmountHandle(self.scope.clone())
    }

    pub fn unmount(&self) {
        self.scope.cancel();
    }

    /// Fetch the reservation being edited and fill every field from it.
    /// Does nothing in create mode.
    ///
    /// A request cancelled by unmount returns `ClientError::Cancelled` and
    /// leaves the form untouched, so an unmounted form stays `Loading`.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let FormMode::Edit { reservation_id } = self.mode else {
            return Ok(());
        };

        self.state = FormState::Loading;
        let result = scoped(
            self.scope.child_token(),
            self.api.get_reservation(reservation_id),
        )
        .await;

        match result {
            Ok(reservation) => {
                self.fields = reservation.fields();
                self.state = FormState::Idle;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::warn!(reservation_id, error = %e, "Failed to load reservation");
                self.state = FormState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Write text input into a field. Party size is coerced to an integer;
    /// text that is not a number becomes 0 and is rejected on submit.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.fields.first_name = value,
            Field::LastName => self.fields.last_name = value,
            Field::MobileNumber => self.fields.mobile_number = value,
            Field::ReservationDate => self.fields.reservation_date = value,
            Field::ReservationTime => self.fields.reservation_time = value,
            Field::People => self.fields.people = value.trim().parse().unwrap_or(0),
        }
    }

    /// Same as [`set`](Self::set) but addressed by input name.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), ClientError> {
        let field = name.parse()?;
        self.set(field, value);
        Ok(())
    }

    /// Normalize the time, then create or update the reservation.
    ///
    /// On success the form returns to idle and yields the dashboard for the
    /// reservation's date. On failure the error is kept for display and the
    /// form stays editable. A request cancelled by unmount returns
    /// `ClientError::Cancelled` and leaves the form untouched, so an unmounted
    /// form stays `Submitting`.
    pub async fn submit(&mut self) -> Result<Navigation, ClientError> {
        self.fields.reservation_time = to_24_hour(&self.fields.reservation_time);
        self.state = FormState::Submitting;

        let token = self.scope.child_token();
        let result = match self.mode {
            FormMode::Create => scoped(token, self.api.create_reservation(&self.fields)).await,
            FormMode::Edit { reservation_id } => {
                scoped(
                    token,
                    self.api.update_reservation(reservation_id, &self.fields),
                )
                .await
            }
        };

        match result {
            Ok(saved) => {
                tracing::info!(
                    reservation_id = saved.reservation_id,
                    date = %saved.reservation_date,
                    "Reservation saved"
                );
                self.state = FormState::Idle;
                Ok(Navigation::Dashboard {
                    date: self.fields.reservation_date.clone(),
                })
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                self.state = FormState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Leave the form without saving. Consumes the form, which cancels any
    /// request still in flight.
    pub fn cancel(self) -> Navigation {
        Navigation::Back
    }
}

impl<A> Drop for ReservationForm<A> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}
