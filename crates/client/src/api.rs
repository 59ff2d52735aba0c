use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::model::{Reservation, ReservationFields, ReservationStatus, Table};

/// Calls the reservation form depends on.
#[async_trait]
pub trait ReservationsApi: Send + Sync {
    async fn get_reservation(&self, reservation_id: i32) -> Result<Reservation, ClientError>;

    async fn create_reservation(
        &self,
        fields: &ReservationFields,
    ) -> Result<Reservation, ClientError>;

    async fn update_reservation(
        &self,
        reservation_id: i32,
        fields: &ReservationFields,
    ) -> Result<Reservation, ClientError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Serialize)]
struct RequestBody<'a, T> {
    data: &'a T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn search(&self, key: &str, value: &str) -> Result<RequestBuilder, ClientError> {
        let mut url = Url::parse(&format!("{}/reservations", self.base_url))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(self.http.get(url))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope<T> = response.json().await?;
            return Ok(envelope.data);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn list_by_date(&self, date: &str) -> Result<Vec<Reservation>, ClientError> {
        self.send(self.search("date", date)?).await
    }

    pub async fn search_by_phone(
        &self,
        mobile_number: &str,
    ) -> Result<Vec<Reservation>, ClientError> {
        self.send(self.search("mobile_number", mobile_number)?)
            .await
    }

    pub async fn update_status(
        &self,
        reservation_id: i32,
        status: ReservationStatus,
    ) -> Result<Reservation, ClientError> {
        self.send(
            self.request(Method::PUT, &format!("/reservations/{reservation_id}/status"))
                .json(&json!({ "data": { "status": status } })),
        )
        .await
    }

    pub async fn list_tables(&self) -> Result<Vec<Table>, ClientError> {
        self.send(self.request(Method::GET, "/tables")).await
    }

    pub async fn create_table(&self, table_name: &str, capacity: i32) -> Result<Table, ClientError> {
        self.send(
            self.request(Method::POST, "/tables")
                .json(&json!({ "data": { "table_name": table_name, "capacity": capacity } })),
        )
        .await
    }

    pub async fn seat_table(&self, table_id: i32, reservation_id: i32) -> Result<Table, ClientError> {
        self.send(
            self.request(Method::PUT, &format!("/tables/{table_id}/seat"))
                .json(&json!({ "data": { "reservation_id": reservation_id } })),
        )
        .await
    }

    pub async fn finish_table(&self, table_id: i32) -> Result<Table, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/tables/{table_id}/seat")))
            .await
    }
}

#[async_trait]
impl ReservationsApi for HttpClient {
    async fn get_reservation(&self, reservation_id: i32) -> Result<Reservation, ClientError> {
        self.send(self.request(Method::GET, &format!("/reservations/{reservation_id}")))
            .await
    }

    async fn create_reservation(
        &self,
        fields: &ReservationFields,
    ) -> Result<Reservation, ClientError> {
        self.send(
            self.request(Method::POST, "/reservations")
                .json(&RequestBody { data: fields }),
        )
        .await
    }

    async fn update_reservation(
        &self,
        reservation_id: i32,
        fields: &ReservationFields,
    ) -> Result<Reservation, ClientError> {
        self.send(
            self.request(Method::PUT, &format!("/reservations/{reservation_id}"))
                .json(&RequestBody { data: fields }),
        )
        .await
    }
}
