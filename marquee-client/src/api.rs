use async_trait::async_trait;
use marquee_core::booking::{CreateBookingRequest, LatestBooking};
use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No usable HTTP response (connect failure, timeout, bad body).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the booking as invalid.
    #[error("booking rejected: {0}")]
    Rejected(String),

    /// The service answered with a non-success status.
    #[error("server error (status {0})")]
    Server(StatusCode),
}

#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn latest(&self) -> Result<LatestBooking, ClientError>;
    async fn create(&self, request: &CreateBookingRequest) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed client for the booking service.
pub struct HttpBookingApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBookingApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn booking_url(&self) -> String {
        format!("{}/api/booking", self.base_url)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn latest(&self) -> Result<LatestBooking, ClientError> {
        let response = self.client.get(self.booking_url()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Server(response.status()));
        }
        Ok(response.json::<LatestBooking>().await?)
    }

    async fn create(&self, request: &CreateBookingRequest) -> Result<(), ClientError> {
        let response = self.client.post(self.booking_url()).json(request).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::BAD_REQUEST => {
                let message = response
                    .json::<ErrorBody>()
                    .await
                    .map(|body| body.error)
                    .unwrap_or_else(|_| "missing required fields".to_string());
                Err(ClientError::Rejected(message))
            }
            status => Err(ClientError::Server(status)),
        }
    }
}
